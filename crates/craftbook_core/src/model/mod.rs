//! Contact domain model.
//!
//! # Responsibility
//! - Define validated contact value types.
//! - Provide the mutable collection that history snapshots are taken from.
//!
//! # Invariants
//! - Phone and email each identify at most one contact in a book.
//! - Contacts are plain values; no two books share storage.

pub mod book;
pub mod contact;
