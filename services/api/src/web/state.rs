//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use journal_core::ports::{EntryAnalysisService, EntryStore};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
///
/// Handlers see only the port traits; which database or model provider sits
/// behind them is wired up in the binary.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntryStore>,
    pub analyzer: Arc<dyn EntryAnalysisService>,
    pub config: Arc<Config>,
}
