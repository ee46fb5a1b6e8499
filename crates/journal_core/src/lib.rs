pub mod analysis;
pub mod domain;
pub mod ports;
pub mod schema;

pub use analysis::{analyze_entry, compose_entry_text, AnalyzeError};
pub use domain::{AnalysisResult, Entry, EntryAnalysis, EntryPatch, NewEntry, Sentiment};
pub use ports::{EntryAnalysisService, EntryStore, PortError, PortResult};
pub use schema::{parse_analysis, ValidationError};
