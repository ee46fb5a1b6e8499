pub mod rest;
pub mod state;

// Re-export the handlers so the binary can build the router without digging
// through the module tree.
pub use rest::{
    analyze_entry_handler, create_entry_handler, delete_all_entries_handler,
    delete_entry_handler, get_entry_handler, list_entries_handler, update_entry_handler,
    ApiDoc,
};
pub use state::AppState;
