//! # Primitives
//!
//! Fixed runtime constants shared by the core and the app layer.

/// Maximum length, in bytes, of a field name used as a key selector.
///
/// Longer names are rejected when the selector is resolved.
pub const MAX_FIELD_NAME_LENGTH: usize = 256;

/// Maximum number of records accepted by `group_json`.
///
/// `group_by` itself accepts any finite sequence; the bound applies to
/// JSON input from the CLI and the HTTP service.
pub const MAX_GROUP_ITEMS: usize = 10_000;

/// Field carrying the syllable count of a Datamuse word record.
pub const SYLLABLES_FIELD: &str = "numSyllables";

/// Text shown for an empty saved-words list.
pub const NONE_SAVED: &str = "(none)";

/// Separator used when listing saved words.
pub const SAVED_SEPARATOR: &str = ", ";
