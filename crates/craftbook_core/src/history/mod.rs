//! Versioned contact book history.
//!
//! # Responsibility
//! - Describe every mutation as a typed `Modification`.
//! - Keep immutable snapshots and a cursor for undo/redo.
//!
//! # Invariants
//! - Snapshots are deep copies and are never mutated after capture.
//! - History is linear; a new commit after undo discards the redo branch.

pub mod modification;
pub mod snapshot;
pub mod state_manager;
