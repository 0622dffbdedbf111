//! Core domain logic for CraftBook.
//! This crate is the single source of truth for contact book invariants,
//! undo/redo history and fuzzy contact search.

pub mod history;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;

pub use history::modification::Modification;
pub use history::snapshot::Snapshot;
pub use history::state_manager::{HistoryError, HistoryResult, StateManager};
pub use logging::{
    init_logging, init_logging_with, logging_status, LogConfig, LogLevel, LoggingError,
};
pub use model::book::{BookResult, ContactBook, ContactBookError};
pub use model::contact::{Address, Contact, ContactValidationError, Email, Name, Note, Phone, Tag};
pub use search::distance::{closeness, closeness_with, edit_distance};
pub use search::policy::{Aggregation, MatchPolicy};
pub use search::predicate::{
    AddressMatches, ContactPredicate, EmailIs, NameMatches, PhoneIs, ShowAll, TagMatches,
};
pub use service::contact_service::{ContactService, ImportOptions, ServiceError, ServiceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
