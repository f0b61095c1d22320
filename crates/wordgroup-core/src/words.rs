//! # Word Model
//!
//! Records returned by the Datamuse word API, the relation being asked
//! about, and the user's saved-words list.

use crate::primitives::{NONE_SAVED, SAVED_SEPARATOR, SYLLABLES_FIELD};
use crate::{Fields, GroupError, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// RELATION
// =============================================================================

/// The word relationship being queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    /// Words that rhyme with the query word.
    #[serde(rename = "rhymes")]
    Rhymes,
    /// Words with a meaning similar to the query word.
    #[serde(rename = "similar")]
    MeansLike,
}

impl Relation {
    /// Datamuse query parameter selecting this relation.
    #[must_use]
    pub const fn query_param(self) -> &'static str {
        match self {
            Self::Rhymes => "rel_rhy",
            Self::MeansLike => "ml",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rhymes => "rhymes",
            Self::MeansLike => "similar",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Relation {
    type Err = GroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rhymes" | "rhyme" | "rel_rhy" => Ok(Self::Rhymes),
            "similar" | "means-like" | "ml" => Ok(Self::MeansLike),
            other => Err(GroupError::InvalidArgument(format!(
                "unknown relation '{other}' (expected 'rhymes' or 'similar')"
            ))),
        }
    }
}

// =============================================================================
// WORD ENTRY
// =============================================================================

/// One word record from the Datamuse API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    /// Present for rhyme queries.
    #[serde(
        rename = "numSyllables",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub num_syllables: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl WordEntry {
    /// Create an entry with only a word.
    #[must_use]
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            num_syllables: None,
            score: None,
            tags: Vec::new(),
        }
    }

    /// Builder-style syllable count.
    #[must_use]
    pub fn with_syllables(mut self, count: u32) -> Self {
        self.num_syllables = Some(count);
        self
    }

    /// Builder-style score.
    #[must_use]
    pub fn with_score(mut self, score: i64) -> Self {
        self.score = Some(score);
        self
    }
}

/// Field names follow the Datamuse JSON keys.
impl Fields for WordEntry {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "word" => Some(Value::from(self.word.as_str())),
            SYLLABLES_FIELD => self.num_syllables.map(Value::from),
            "score" => self.score.map(Value::Int),
            "tags" => Some(Value::List(
                self.tags.iter().map(|t| Value::from(t.as_str())).collect(),
            )),
            _ => None,
        }
    }
}

// =============================================================================
// SAVED WORDS
// =============================================================================

/// Words the user chose to keep for the rest of the session.
///
/// Volatile: lives only as long as the session or server that owns it.
/// Duplicates are kept; the list records every save in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedWords {
    words: Vec<String>,
}

impl SavedWords {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a word. Surrounding whitespace is trimmed.
    ///
    /// Returns `GroupError::InvalidArgument` for a blank word.
    pub fn add(&mut self, word: &str) -> Result<(), GroupError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(GroupError::InvalidArgument(
                "cannot save an empty word".to_string(),
            ));
        }
        self.words.push(word.to_string());
        Ok(())
    }

    /// Saved words in the order they were saved.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }

    /// Display form: `(none)` or the words joined by `", "`.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.words.is_empty() {
            NONE_SAVED.to_string()
        } else {
            self.words.join(SAVED_SEPARATOR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relation_query_params() {
        assert_eq!(Relation::Rhymes.query_param(), "rel_rhy");
        assert_eq!(Relation::MeansLike.query_param(), "ml");
    }

    #[test]
    fn relation_parses_names() {
        assert_eq!("rhymes".parse::<Relation>(), Ok(Relation::Rhymes));
        assert_eq!(" Similar ".parse::<Relation>(), Ok(Relation::MeansLike));
        assert!(matches!(
            "antonyms".parse::<Relation>(),
            Err(GroupError::InvalidArgument(_))
        ));
    }

    #[test]
    fn word_entry_deserializes_datamuse_record() {
        let json = r#"{"word":"grime","score":3071,"numSyllables":1}"#;
        let entry: WordEntry = serde_json::from_str(json).expect("parse");

        assert_eq!(entry.word, "grime");
        assert_eq!(entry.num_syllables, Some(1));
        assert_eq!(entry.score, Some(3071));
        assert!(entry.tags.is_empty());
    }

    #[test]
    fn word_entry_tolerates_missing_optional_fields() {
        let json = r#"{"word":"period","tags":["n"]}"#;
        let entry: WordEntry = serde_json::from_str(json).expect("parse");

        assert_eq!(entry.num_syllables, None);
        assert_eq!(entry.tags, vec!["n".to_string()]);
    }

    #[test]
    fn word_entry_fields() {
        let entry = WordEntry::new("climb").with_syllables(1).with_score(42);

        assert_eq!(entry.field("word"), Some(Value::from("climb")));
        assert_eq!(entry.field("numSyllables"), Some(Value::Int(1)));
        assert_eq!(entry.field("score"), Some(Value::Int(42)));
        assert_eq!(entry.field("tags"), Some(Value::List(Vec::new())));
        assert_eq!(entry.field("unknown"), None);
    }

    #[test]
    fn saved_words_summary() {
        let mut saved = SavedWords::new();
        assert_eq!(saved.summary(), "(none)");

        saved.add("time").expect("save");
        saved.add("  rhyme ").expect("save");
        assert_eq!(saved.summary(), "time, rhyme");
        assert_eq!(saved.len(), 2);
    }

    #[test]
    fn saved_words_keeps_duplicates() {
        let mut saved = SavedWords::new();
        saved.add("time").expect("save");
        saved.add("time").expect("save");
        assert_eq!(saved.words(), ["time", "time"]);
    }

    #[test]
    fn saved_words_rejects_blank() {
        let mut saved = SavedWords::new();
        assert!(matches!(
            saved.add("   "),
            Err(GroupError::InvalidArgument(_))
        ));
        assert!(saved.is_empty());
    }

    #[test]
    fn saved_words_clear() {
        let mut saved = SavedWords::new();
        saved.add("slime").expect("save");
        saved.clear();
        assert_eq!(saved.summary(), "(none)");
    }
}
