//! Contact domain model.
//!
//! # Responsibility
//! - Define validated value types for every contact field.
//! - Define the canonical `Contact` record carried by history entries.
//!
//! # Invariants
//! - Field values are validated on construction and on deserialization.
//! - Tags are lowercase and deduplicated; iteration order is stable.
//! - `Contact` equality is structural over all fields.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N}][\p{L}\p{N} '.,/-]*$").expect("valid name regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{3,}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9+_.-]*@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*$")
        .expect("valid email regex")
});
static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N}_-]+$").expect("valid tag regex"));

/// Validation error for contact field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    InvalidName(String),
    InvalidPhone(String),
    InvalidEmail(String),
    BlankAddress,
    InvalidTag(String),
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(value) => write!(
                f,
                "invalid name `{value}`: use letters, digits, spaces and ' . , / - only"
            ),
            Self::InvalidPhone(value) => write!(
                f,
                "invalid phone `{value}`: expected at least 3 digits and nothing else"
            ),
            Self::InvalidEmail(value) => write!(
                f,
                "invalid email `{value}`: expected local-part@domain"
            ),
            Self::BlankAddress => write!(f, "address cannot be blank"),
            Self::InvalidTag(value) => write!(
                f,
                "invalid tag `{value}`: tags must be a single word of letters, digits, `-` or `_`"
            ),
        }
    }
}

impl Error for ContactValidationError {}

/// Full display name of a contact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ContactValidationError> {
        let trimmed = value.as_ref().trim();
        if !NAME_RE.is_match(trimmed) {
            return Err(ContactValidationError::InvalidName(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Phone number; unique across a contact book.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ContactValidationError> {
        let trimmed = value.as_ref().trim();
        if !PHONE_RE.is_match(trimmed) {
            return Err(ContactValidationError::InvalidPhone(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Email address; unique across a contact book (case-insensitive).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ContactValidationError> {
        let trimmed = value.as_ref().trim();
        if !EMAIL_RE.is_match(trimmed) {
            return Err(ContactValidationError::InvalidEmail(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison used for identity checks and lookups.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

/// Free-text postal address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ContactValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ContactValidationError::BlankAddress);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Single-word label, normalized to lowercase.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ContactValidationError> {
        let trimmed = value.as_ref().trim();
        if !TAG_RE.is_match(trimmed) {
            return Err(ContactValidationError::InvalidTag(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Free-form note attached to a contact.
///
/// Two notes are equal when they match after collapsing whitespace runs and
/// folding case, so `"call  Monday"` equals `"Call monday"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Note(String);

impl Note {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn normalized(&self) -> String {
        self.0
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

impl PartialEq for Note {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for Note {}

macro_rules! string_field_conversions {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl TryFrom<String> for $ty {
                type Error = ContactValidationError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    Self::parse(value)
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.0
                }
            }

            impl Display for $ty {
                fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                    f.write_str(&self.0)
                }
            }
        )+
    };
}

string_field_conversions!(Name, Phone, Email, Address, Tag);

impl Display for Note {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical contact record.
///
/// Values are copied into history entries, so a `Contact` never refers to
/// shared mutable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: Name,
    pub phone: Phone,
    pub email: Email,
    pub address: Address,
    #[serde(default)]
    pub note: Note,
    #[serde(default)]
    pub tags: BTreeSet<Tag>,
}

impl Contact {
    /// Creates a contact with an empty note and no tags.
    pub fn new(name: Name, phone: Phone, email: Email, address: Address) -> Self {
        Self {
            name,
            phone,
            email,
            address,
            note: Note::default(),
            tags: BTreeSet::new(),
        }
    }

    /// Parses and validates every field from raw strings.
    ///
    /// # Errors
    /// - Returns the first field validation failure encountered.
    pub fn parse(
        name: &str,
        phone: &str,
        email: &str,
        address: &str,
        tags: &[&str],
    ) -> Result<Self, ContactValidationError> {
        let tags = tags
            .iter()
            .map(|tag| Tag::parse(tag))
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self::new(
            Name::parse(name)?,
            Phone::parse(phone)?,
            Email::parse(email)?,
            Address::parse(address)?,
        )
        .with_tags(tags))
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    pub fn with_note(mut self, note: Note) -> Self {
        self.note = note;
        self
    }

    /// Returns whether `other` shares this contact's phone or email.
    pub fn is_same_identity(&self, other: &Contact) -> bool {
        self.phone == other.phone || self.email.matches(other.email.as_str())
    }
}

impl Display for Contact {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}; Phone: {}; Email: {}; Address: {}; Tags: ",
            self.name, self.phone, self.email, self.address
        )?;
        for tag in &self.tags {
            write!(f, "[{tag}]")?;
        }
        Ok(())
    }
}
