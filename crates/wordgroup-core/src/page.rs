//! # Page Model
//!
//! Structured content handed to a rendering sink. A page has a one-line
//! description and a body; the body is either a placeholder, a set of
//! headed sections, or a flat word list.

use crate::primitives::SYLLABLES_FIELD;
use crate::{GroupError, KeySelector, Relation, SavedWords, WordEntry, group_by};
use serde::{Deserialize, Serialize};

/// A headed list of words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub words: Vec<String>,
}

/// Page body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum Body {
    Loading,
    NoResults,
    Sections(Vec<Section>),
    List(Vec<String>),
}

/// A renderable page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub description: String,
    pub body: Body,
}

impl Page {
    /// Placeholder shown while a lookup is in flight.
    #[must_use]
    pub fn loading() -> Self {
        Self {
            description: "...loading".to_string(),
            body: Body::Loading,
        }
    }

    /// Rhymes for `word`, one section per syllable count in ascending order.
    ///
    /// Entries without a syllable count cannot be placed and are left out.
    pub fn rhymes(word: &str, entries: Vec<WordEntry>) -> Result<Self, GroupError> {
        let description = format!("Words that rhyme with {word}:");

        let (counted, uncounted): (Vec<_>, Vec<_>) = entries
            .into_iter()
            .partition(|e| e.num_syllables.is_some());
        if !uncounted.is_empty() {
            tracing::debug!(
                omitted = uncounted.len(),
                "rhymes without a syllable count left off the page"
            );
        }

        if counted.is_empty() {
            return Ok(Self {
                description,
                body: Body::NoResults,
            });
        }

        let grouped = group_by(counted, &KeySelector::field(SYLLABLES_FIELD))?;
        let sections = grouped
            .into_iter()
            .map(|(syllables, entries)| Section {
                heading: format!("Syllables: {syllables}"),
                words: entries.into_iter().map(|e| e.word).collect(),
            })
            .collect();

        Ok(Self {
            description,
            body: Body::Sections(sections),
        })
    }

    /// Words similar in meaning to `word`, in the order the API ranked them.
    #[must_use]
    pub fn similar(word: &str, entries: Vec<WordEntry>) -> Self {
        let description = format!("Words with a similar meaning to {word}:");
        let body = if entries.is_empty() {
            Body::NoResults
        } else {
            Body::List(entries.into_iter().map(|e| e.word).collect())
        };
        Self { description, body }
    }

    /// Build the page for a relation lookup.
    pub fn for_relation(
        relation: Relation,
        word: &str,
        entries: Vec<WordEntry>,
    ) -> Result<Self, GroupError> {
        match relation {
            Relation::Rhymes => Self::rhymes(word, entries),
            Relation::MeansLike => Ok(Self::similar(word, entries)),
        }
    }

    /// Every word shown on the page, in display order.
    #[must_use]
    pub fn words(&self) -> Vec<&str> {
        match &self.body {
            Body::Loading | Body::NoResults => Vec::new(),
            Body::Sections(sections) => sections
                .iter()
                .flat_map(|s| s.words.iter().map(String::as_str))
                .collect(),
            Body::List(words) => words.iter().map(String::as_str).collect(),
        }
    }
}

// =============================================================================
// RENDER SINK TRAIT
// =============================================================================

/// Display surface for pages and the saved-words summary.
///
/// # Extension Point
///
/// The core ships no implementation; the app layer provides a terminal
/// sink, and the HTTP service returns pages as JSON instead.
pub trait RenderSink {
    type Error;

    /// Replace the current output with `page`.
    fn render(&mut self, page: &Page) -> Result<(), Self::Error>;

    /// Show the saved-words summary.
    fn render_saved(&mut self, saved: &SavedWords) -> Result<(), Self::Error>;
}
