//! crates/journal_core/src/analysis.rs
//!
//! The analysis orchestrator: fetch an entry, compose its text, run it
//! through the analysis service, and hand back an `AnalysisResult`.
//!
//! The flow is a straight line with no retries and no intermediate state;
//! re-running it re-executes every step from scratch. Two concurrent runs
//! on the same entry are fully independent.

use tracing::error;
use uuid::Uuid;

use crate::domain::{AnalysisResult, Entry};
use crate::ports::{EntryAnalysisService, EntryStore, PortError};

/// The caller-facing failure of one orchestration run.
///
/// Everything that is not a missing entry collapses into `Analysis` so that
/// provider-specific diagnostics never reach users. The underlying message
/// is logged where the collapse happens.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("Entry {0} not found")]
    EntryNotFound(Uuid),
    #[error("Could not analyze entry")]
    Analysis,
}

/// Concatenates an entry's fields into one prompt-ready blob.
///
/// Each field is labeled so the model can still tell work, struggle, and
/// intention apart after concatenation. Rebuilt on every call, never cached.
pub fn compose_entry_text(entry: &Entry) -> String {
    format!(
        "Work: {}\nStruggle: {}\nIntention: {}",
        entry.work, entry.struggle, entry.intention
    )
}

/// Analyzes the entry with the given id.
///
/// Steps: fetch the entry, compose its text, invoke the analysis service
/// once, then stamp the validated result with the entry id and the current
/// time. An unknown id fails before the analysis service is ever called.
pub async fn analyze_entry(
    store: &dyn EntryStore,
    analyzer: &dyn EntryAnalysisService,
    entry_id: Uuid,
) -> Result<AnalysisResult, AnalyzeError> {
    let entry = store.get(entry_id).await.map_err(|e| match e {
        PortError::NotFound(_) => AnalyzeError::EntryNotFound(entry_id),
        PortError::Unexpected(msg) => {
            error!(%entry_id, "entry lookup failed: {msg}");
            AnalyzeError::Analysis
        }
    })?;

    let entry_text = compose_entry_text(&entry);

    let analysis = analyzer.analyze(&entry_text).await.map_err(|e| {
        // Log the cause but surface only the opaque failure; the message may
        // name provider internals, never the entry text itself.
        error!(%entry_id, "analysis failed: {e}");
        AnalyzeError::Analysis
    })?;

    // Timestamp captured at assembly, not at invocation start.
    Ok(AnalysisResult::assemble(entry_id, analysis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry() -> Entry {
        Entry {
            id: Uuid::new_v4(),
            work: "Shipped feature X".to_string(),
            struggle: "Flaky tests".to_string(),
            intention: "Fix CI tomorrow".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn composed_text_keeps_field_boundaries() {
        let text = compose_entry_text(&entry());
        assert_eq!(
            text,
            "Work: Shipped feature X\nStruggle: Flaky tests\nIntention: Fix CI tomorrow"
        );
    }
}
