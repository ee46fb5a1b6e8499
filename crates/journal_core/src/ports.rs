//! crates/journal_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or APIs.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Entry, EntryAnalysis, EntryPatch, NewEntry};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Durable storage for journal entries, keyed by id.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Creates an entry, assigning its id and creation timestamp.
    async fn create(&self, new: NewEntry) -> PortResult<Entry>;

    /// Fetches an entry by id. Returns `PortError::NotFound` if absent.
    async fn get(&self, id: Uuid) -> PortResult<Entry>;

    /// Applies a partial update. Returns `PortError::NotFound` if absent.
    async fn update(&self, id: Uuid, patch: EntryPatch) -> PortResult<Entry>;

    /// Deletes one entry. Returns whether anything was deleted.
    async fn delete(&self, id: Uuid) -> PortResult<bool>;

    /// Deletes every entry.
    async fn delete_all(&self) -> PortResult<()>;

    /// Lists all entries, newest first.
    async fn list_all(&self) -> PortResult<Vec<Entry>>;
}

/// A remote model that turns entry text into a structured analysis.
///
/// Implementations issue exactly one outbound request per call: no retry,
/// no streaming. A caller wanting resilience re-invokes the whole operation.
#[async_trait]
pub trait EntryAnalysisService: Send + Sync {
    async fn analyze(&self, entry_text: &str) -> PortResult<EntryAnalysis>;
}
