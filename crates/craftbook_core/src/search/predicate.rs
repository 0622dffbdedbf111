//! Per-field contact match predicates.
//!
//! # Responsibility
//! - Provide exact predicates for unique identifiers (email, phone).
//! - Provide fuzzy predicates for descriptive fields (name, address, tag).
//!
//! # Invariants
//! - Numeric address tokens and short tokens never match fuzzily.
//! - Predicates are pure; evaluating one never mutates the contact.

use crate::model::contact::Contact;
use crate::search::distance::{closeness_with, fold};
use crate::search::policy::MatchPolicy;
use std::fmt::Debug;

/// Single-argument contact filter usable as a collection view predicate.
pub trait ContactPredicate: Debug {
    fn test(&self, contact: &Contact) -> bool;
}

/// Accepts every contact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShowAll;

impl ContactPredicate for ShowAll {
    fn test(&self, _contact: &Contact) -> bool {
        true
    }
}

/// Exact, case-insensitive email lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailIs {
    email: String,
}

impl EmailIs {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

impl ContactPredicate for EmailIs {
    fn test(&self, contact: &Contact) -> bool {
        contact.email.matches(&self.email)
    }
}

/// Exact phone lookup; surrounding whitespace in the keyword is ignored,
/// as in `ContactBook::find_by_phone`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneIs {
    phone: String,
}

impl PhoneIs {
    pub fn new(phone: impl AsRef<str>) -> Self {
        Self {
            phone: phone.as_ref().trim().to_string(),
        }
    }
}

impl ContactPredicate for PhoneIs {
    fn test(&self, contact: &Contact) -> bool {
        contact.phone.as_str() == self.phone
    }
}

/// Approximate, word-wise name match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMatches {
    keyword: String,
    policy: MatchPolicy,
}

impl NameMatches {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self::with_policy(keyword, MatchPolicy::default())
    }

    pub fn with_policy(keyword: impl Into<String>, policy: MatchPolicy) -> Self {
        Self {
            keyword: keyword.into(),
            policy,
        }
    }
}

impl ContactPredicate for NameMatches {
    fn test(&self, contact: &Contact) -> bool {
        closeness_with(
            contact.name.as_str(),
            &self.keyword,
            self.policy.aggregation,
        ) < self.policy.name_threshold
    }
}

/// Approximate address match that never forgives a wrong number.
///
/// Keyword tokens containing a digit (block, street or unit numbers) and
/// tokens shorter than `short_token_len` must equal an address word after
/// case folding and trimming of surrounding punctuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressMatches {
    keyword: String,
    policy: MatchPolicy,
}

impl AddressMatches {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self::with_policy(keyword, MatchPolicy::default())
    }

    pub fn with_policy(keyword: impl Into<String>, policy: MatchPolicy) -> Self {
        Self {
            keyword: keyword.into(),
            policy,
        }
    }
}

impl ContactPredicate for AddressMatches {
    fn test(&self, contact: &Contact) -> bool {
        let address = contact.address.as_str();
        let address_words = address
            .split_whitespace()
            .map(normalize_token)
            .collect::<Vec<_>>();

        let exact_tokens_present = self
            .keyword
            .split_whitespace()
            .map(normalize_token)
            .filter(|token| !token.is_empty())
            .filter(|token| {
                token.chars().any(|c| c.is_numeric())
                    || token.chars().count() < self.policy.short_token_len
            })
            .all(|token| address_words.contains(&token));
        if !exact_tokens_present {
            return false;
        }

        closeness_with(address, &self.keyword, self.policy.aggregation)
            < self.policy.address_threshold
    }
}

/// Approximate tag match; a contact matches when any of its tags does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatches {
    keyword: String,
    policy: MatchPolicy,
}

impl TagMatches {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self::with_policy(keyword, MatchPolicy::default())
    }

    pub fn with_policy(keyword: impl Into<String>, policy: MatchPolicy) -> Self {
        Self {
            keyword: keyword.into(),
            policy,
        }
    }

    fn tag_matches(&self, tag: &str) -> bool {
        let tag_folded = fold(tag);
        let short_tokens_present = self
            .keyword
            .split_whitespace()
            .filter(|token| token.chars().count() < self.policy.short_token_len)
            .all(|token| tag_folded.split_whitespace().any(|word| word == fold(token)));
        if !short_tokens_present {
            return false;
        }

        closeness_with(tag, &self.keyword, self.policy.aggregation) < self.policy.tag_threshold
    }
}

impl ContactPredicate for TagMatches {
    fn test(&self, contact: &Contact) -> bool {
        contact.tags.iter().any(|tag| self.tag_matches(tag.as_str()))
    }
}

/// Folds case and strips leading/trailing punctuation (`"31,"` -> `"31"`).
fn normalize_token(token: &str) -> String {
    fold(token.trim_matches(|c: char| !c.is_alphanumeric()))
}
