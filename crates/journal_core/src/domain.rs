//! crates/journal_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or HTTP framework.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents one journal entry: what was done, what was hard, and what
/// comes next.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    pub id: Uuid,
    pub work: String,
    pub struggle: String,
    pub intention: String,
    /// Set once when the entry is created, immutable afterwards.
    pub created_at: DateTime<Utc>,
}

/// The payload for creating a new entry. The id and creation timestamp are
/// assigned by the store, never by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEntry {
    pub work: String,
    pub struggle: String,
    pub intention: String,
}

/// A partial update to an entry's text fields. `None` means "leave as is".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryPatch {
    pub work: Option<String>,
    pub struggle: Option<String>,
    pub intention: Option<String>,
}

/// The model's overall sentiment judgment for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

/// The structured object the language model is asked to produce.
///
/// `deny_unknown_fields` makes the schema strict: any extra key the model
/// invents fails validation rather than slipping through silently. The
/// 2-4 topic count is a prompt-level expectation, not validated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntryAnalysis {
    pub sentiment: Sentiment,
    /// Two sentences, per the prompt. Semantic constraint only.
    pub summary: String,
    pub topics: Vec<String>,
}

/// A completed analysis, annotated with the entry it describes and when the
/// analysis was produced. Built fresh per request and never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub entry_id: Uuid,
    pub sentiment: Sentiment,
    pub summary: String,
    pub topics: Vec<String>,
    /// When the analysis was assembled, distinct from the entry's own
    /// `created_at`.
    pub created_at: DateTime<Utc>,
}

impl AnalysisResult {
    /// Attaches the entry id and a fresh timestamp to a validated analysis.
    pub fn assemble(entry_id: Uuid, analysis: EntryAnalysis) -> Self {
        Self {
            entry_id,
            sentiment: analysis.sentiment,
            summary: analysis.summary,
            topics: analysis.topics,
            created_at: Utc::now(),
        }
    }
}
