//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use serde::{Deserialize, Serialize};
use wordgroup_core::{GroupError, Grouping, KeySelector, Record, SavedWords, Value, group_json};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Body of every non-2xx response produced by a handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

// =============================================================================
// GROUP REQUEST/RESPONSE
// =============================================================================

/// Group arbitrary records by a field.
///
/// `items` stays raw JSON so that a non-array payload is reported by the
/// grouping engine as an invalid argument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRequest {
    pub items: serde_json::Value,
    pub by: String,
}

impl GroupRequest {
    /// Run the grouping.
    pub fn execute(&self) -> Result<Grouping<Value, Record>, GroupError> {
        group_json(&self.items, &KeySelector::field(self.by.as_str()))
    }
}

/// One group in a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupJson {
    pub key: Value,
    pub items: Vec<Record>,
}

/// Groups in ascending key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupResponse {
    pub groups: Vec<GroupJson>,
}

impl From<Grouping<Value, Record>> for GroupResponse {
    fn from(grouping: Grouping<Value, Record>) -> Self {
        Self {
            groups: grouping
                .into_iter()
                .map(|(key, items)| GroupJson { key, items })
                .collect(),
        }
    }
}

// =============================================================================
// LOOKUP QUERY
// =============================================================================

/// `?word=` query string of the lookup endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupQuery {
    pub word: String,
}

// =============================================================================
// SAVED WORDS
// =============================================================================

/// Save a word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRequest {
    pub word: String,
}

/// Current saved-words list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedResponse {
    pub words: Vec<String>,
    pub summary: String,
}

impl From<&SavedWords> for SavedResponse {
    fn from(saved: &SavedWords) -> Self {
        Self {
            words: saved.words().to_vec(),
            summary: saved.summary(),
        }
    }
}
