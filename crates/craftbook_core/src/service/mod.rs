//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate contact book mutations and their history records.
//! - Keep command/UI layers decoupled from history and matching details.

pub mod contact_service;
