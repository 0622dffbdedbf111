//! Approximate and exact contact matching.
//!
//! # Responsibility
//! - Score keyword closeness with case-insensitive edit distance.
//! - Wrap the scorer in per-field predicates with field-specific tolerance.
//!
//! # See also
//! - `search::policy::MatchPolicy` for thresholds.

pub mod distance;
pub mod policy;
pub mod predicate;
