//! # wordgroup-core
//!
//! The deterministic grouping engine for wordgroup - THE LOGIC.
//!
//! The heart of this crate is [`group_by`]: partition a collection by a key
//! derived from each item, then hand the partitions back in ascending key
//! order. Everything else here is the small word/page model that the app
//! layer feeds through it.
//!
//! ## Architectural Constraints
//!
//! - Has NO async, NO network dependencies (pure Rust)
//! - Never panics on caller input; every failure is a [`GroupError`]
//! - Output order is fully determined by the input and the key selector

// =============================================================================
// MODULES
// =============================================================================

pub mod grouping;
pub mod page;
pub mod primitives;
pub mod selector;
pub mod types;
pub mod words;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Fields, GroupError, Record, Value, ValueKind};

// =============================================================================
// RE-EXPORTS: Grouping Engine
// =============================================================================

pub use grouping::{Grouping, group_by, group_by_fn, group_by_key, group_json};
pub use selector::{KeyFn, KeySelector, ResolvedKey};

// =============================================================================
// RE-EXPORTS: Word & Page Model
// =============================================================================

pub use page::{Body, Page, RenderSink, Section};
pub use words::{Relation, SavedWords, WordEntry};
