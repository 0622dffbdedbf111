//! In-memory contact collection.
//!
//! # Responsibility
//! - Own the ordered list of contacts the history manager snapshots.
//! - Enforce phone/email identity uniqueness on every write path.
//!
//! # Invariants
//! - No two contacts share a phone number.
//! - No two contacts share an email address (case-insensitive).
//! - Insertion order is preserved; `replace` keeps the slot position.

use crate::history::snapshot::Snapshot;
use crate::model::contact::{Contact, Email, Phone};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BookResult<T> = Result<T, ContactBookError>;

/// Collection-level error for identity and lookup violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactBookError {
    /// Another contact already uses this phone number.
    DuplicatePhone(Phone),
    /// Another contact already uses this email address.
    DuplicateEmail(Email),
    /// Target contact is not in the collection.
    NotFound,
}

impl Display for ContactBookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicatePhone(phone) => {
                write!(f, "a contact with phone number {phone} already exists")
            }
            Self::DuplicateEmail(email) => {
                write!(f, "a contact with email {email} already exists")
            }
            Self::NotFound => write!(f, "contact not found"),
        }
    }
}

impl Error for ContactBookError {}

/// Mutable contact collection backing the live state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactBook {
    contacts: Vec<Contact>,
}

impl ContactBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a book from contacts, rejecting identity clashes.
    pub fn from_contacts(contacts: impl IntoIterator<Item = Contact>) -> BookResult<Self> {
        let mut book = Self::new();
        for contact in contacts {
            book.add(contact)?;
        }
        Ok(book)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter()
    }

    pub fn contains(&self, contact: &Contact) -> bool {
        self.contacts.iter().any(|existing| existing == contact)
    }

    /// Returns whether any contact shares phone or email with `contact`.
    pub fn has_identity(&self, contact: &Contact) -> bool {
        self.contacts
            .iter()
            .any(|existing| existing.is_same_identity(contact))
    }

    pub fn find_by_phone(&self, phone: &str) -> Option<&Contact> {
        let phone = phone.trim();
        self.contacts
            .iter()
            .find(|contact| contact.phone.as_str() == phone)
    }

    pub fn find_by_email(&self, email: &str) -> Option<&Contact> {
        self.contacts
            .iter()
            .find(|contact| contact.email.matches(email))
    }

    /// Appends a contact.
    ///
    /// # Errors
    /// - `DuplicatePhone` / `DuplicateEmail` when the identity is taken.
    pub fn add(&mut self, contact: Contact) -> BookResult<()> {
        self.check_identity_free(&contact, None)?;
        self.contacts.push(contact);
        Ok(())
    }

    /// Removes the contact equal to `target` and returns it.
    pub fn remove(&mut self, target: &Contact) -> BookResult<Contact> {
        let index = self.position_of(target)?;
        Ok(self.contacts.remove(index))
    }

    /// Replaces `target` in place with `replacement`.
    ///
    /// # Errors
    /// - `NotFound` when `target` is absent.
    /// - `DuplicatePhone` / `DuplicateEmail` when `replacement` clashes with
    ///   any contact other than `target`.
    pub fn replace(&mut self, target: &Contact, replacement: Contact) -> BookResult<()> {
        let index = self.position_of(target)?;
        self.check_identity_free(&replacement, Some(index))?;
        self.contacts[index] = replacement;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.contacts.clear();
    }

    /// Resets contents in place from a snapshot.
    ///
    /// The book value itself is kept, so holders of `&mut ContactBook`
    /// observe the restored contents.
    pub fn reset_from(&mut self, snapshot: &Snapshot) {
        self.contacts.clear();
        self.contacts.extend_from_slice(snapshot.contacts());
    }

    /// Replaces contents in place with those of `other`.
    pub fn reset_with(&mut self, other: ContactBook) {
        self.contacts = other.contacts;
    }

    /// Returns contacts accepted by `predicate`, in book order.
    pub fn filtered<F>(&self, predicate: F) -> Vec<&Contact>
    where
        F: Fn(&Contact) -> bool,
    {
        self.contacts
            .iter()
            .filter(|contact| predicate(contact))
            .collect()
    }

    fn position_of(&self, target: &Contact) -> BookResult<usize> {
        self.contacts
            .iter()
            .position(|existing| existing == target)
            .ok_or(ContactBookError::NotFound)
    }

    fn check_identity_free(&self, candidate: &Contact, skip: Option<usize>) -> BookResult<()> {
        for (index, existing) in self.contacts.iter().enumerate() {
            if Some(index) == skip {
                continue;
            }
            if existing.phone == candidate.phone {
                return Err(ContactBookError::DuplicatePhone(candidate.phone.clone()));
            }
            if existing.email.matches(candidate.email.as_str()) {
                return Err(ContactBookError::DuplicateEmail(candidate.email.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactBook, ContactBookError};
    use crate::model::contact::Contact;

    fn contact(name: &str, phone: &str, email: &str) -> Contact {
        Contact::parse(name, phone, email, "Blk 30 Geylang Street 29", &[]).unwrap()
    }

    #[test]
    fn add_rejects_duplicate_phone_and_email() {
        let mut book = ContactBook::new();
        book.add(contact("Alice", "111", "alice@example.com")).unwrap();

        let err = book
            .add(contact("Bob", "111", "bob@example.com"))
            .unwrap_err();
        assert!(matches!(err, ContactBookError::DuplicatePhone(_)));

        let err = book
            .add(contact("Bob", "222", "ALICE@example.com"))
            .unwrap_err();
        assert!(matches!(err, ContactBookError::DuplicateEmail(_)));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn replace_keeps_position_and_allows_own_identity() {
        let alice = contact("Alice", "111", "alice@example.com");
        let bob = contact("Bob", "222", "bob@example.com");
        let mut book = ContactBook::from_contacts([alice.clone(), bob]).unwrap();

        let renamed = contact("Alicia", "111", "alice@example.com");
        book.replace(&alice, renamed.clone()).unwrap();
        assert_eq!(book.contacts()[0], renamed);

        let clash = contact("Alicia", "222", "alice@example.com");
        assert!(matches!(
            book.replace(&renamed, clash),
            Err(ContactBookError::DuplicatePhone(_))
        ));
    }

    #[test]
    fn remove_missing_contact_is_not_found() {
        let mut book = ContactBook::new();
        let err = book
            .remove(&contact("Ghost", "999", "ghost@example.com"))
            .unwrap_err();
        assert_eq!(err, ContactBookError::NotFound);
    }

    #[test]
    fn lookups_by_identity() {
        let book =
            ContactBook::from_contacts([contact("Alice", "111", "alice@example.com")]).unwrap();
        assert!(book.find_by_phone(" 111 ").is_some());
        assert!(book.find_by_email("Alice@Example.com").is_some());
        assert!(book.find_by_phone("112").is_none());
    }
}
