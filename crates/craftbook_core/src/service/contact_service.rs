//! Contact book use-case service.
//!
//! # Responsibility
//! - Apply each contact mutation to the live book and commit exactly one
//!   matching `Modification`.
//! - Own the active display filter and resolve displayed indexes.
//! - Expose undo/redo to the command layer.
//!
//! # Invariants
//! - A failed use case leaves both the book and the history untouched.
//! - Email/phone deletion ignores the active filter.
//! - Every mutation and history transition resets the filter to `ShowAll`.

use crate::history::modification::Modification;
use crate::history::state_manager::{HistoryError, HistoryResult, StateManager};
use crate::model::book::{ContactBook, ContactBookError};
use crate::model::contact::{Contact, Note};
use crate::search::policy::MatchPolicy;
use crate::search::predicate::{
    AddressMatches, ContactPredicate, EmailIs, NameMatches, PhoneIs, ShowAll, TagMatches,
};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for contact use cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Displayed index is outside the filtered view.
    InvalidIndex { index: usize, displayed: usize },
    /// No contact has the requested email.
    NoContactWithEmail(String),
    /// No contact has the requested phone number.
    NoContactWithPhone(String),
    /// Identity or lookup violation in the collection.
    Book(ContactBookError),
    /// Undo/redo boundary reached.
    History(HistoryError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIndex { index, displayed } => write!(
                f,
                "the person index provided is invalid: {} (showing {displayed})",
                index + 1
            ),
            Self::NoContactWithEmail(email) => {
                write!(f, "no person with matching email address: {email}")
            }
            Self::NoContactWithPhone(phone) => {
                write!(f, "no person with matching phone number: {phone}")
            }
            Self::Book(err) => write!(f, "{err}"),
            Self::History(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Book(err) => Some(err),
            Self::History(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContactBookError> for ServiceError {
    fn from(value: ContactBookError) -> Self {
        Self::Book(value)
    }
}

impl From<HistoryError> for ServiceError {
    fn from(value: HistoryError) -> Self {
        Self::History(value)
    }
}

/// How [`ContactService::import`] merges incoming contacts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Replace the whole book instead of appending.
    pub overwrite: bool,
    /// Skip contacts whose phone or email is already taken instead of
    /// aborting the import.
    pub skip_duplicates: bool,
}

/// Facade the command layer drives for every contact operation.
#[derive(Debug)]
pub struct ContactService {
    state: StateManager,
    filter: Box<dyn ContactPredicate>,
    policy: MatchPolicy,
}

impl ContactService {
    /// Creates a service whose pristine history state is `initial`.
    pub fn new(initial: ContactBook) -> Self {
        Self::with_policy(initial, MatchPolicy::default())
    }

    /// Creates a service with custom fuzzy matching thresholds.
    pub fn with_policy(initial: ContactBook, policy: MatchPolicy) -> Self {
        Self {
            state: StateManager::new(initial),
            filter: Box::new(ShowAll),
            policy,
        }
    }

    pub fn book(&self) -> &ContactBook {
        self.state.current()
    }

    pub fn history(&self) -> &StateManager {
        &self.state
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Replaces the active display filter.
    pub fn update_filter(&mut self, predicate: impl ContactPredicate + 'static) {
        debug!(
            "event=filter_update module=service predicate={}",
            predicate_kind(&predicate)
        );
        self.filter = Box::new(predicate);
    }

    /// Contacts accepted by the active filter, in book order.
    pub fn filtered_contacts(&self) -> Vec<&Contact> {
        self.state
            .current()
            .filtered(|contact| self.filter.test(contact))
    }

    /// Resolves a zero-based index into the displayed list.
    ///
    /// # Errors
    /// - `InvalidIndex` when `index` is past the end of the filtered view.
    pub fn displayed_contact(&self, index: usize) -> ServiceResult<&Contact> {
        let displayed = self.filtered_contacts();
        let count = displayed.len();
        displayed
            .into_iter()
            .nth(index)
            .ok_or(ServiceError::InvalidIndex {
                index,
                displayed: count,
            })
    }

    /// Fuzzy name filter; returns the number of contacts listed.
    pub fn filter_by_name(&mut self, keyword: &str) -> usize {
        self.update_filter(NameMatches::with_policy(keyword, self.policy));
        self.filtered_contacts().len()
    }

    /// Fuzzy, numeric-aware address filter; returns the number listed.
    pub fn filter_by_address(&mut self, keyword: &str) -> usize {
        self.update_filter(AddressMatches::with_policy(keyword, self.policy));
        self.filtered_contacts().len()
    }

    /// Fuzzy tag filter; returns the number listed.
    pub fn filter_by_tag(&mut self, keyword: &str) -> usize {
        self.update_filter(TagMatches::with_policy(keyword, self.policy));
        self.filtered_contacts().len()
    }

    /// Exact email lookup; returns the number listed (0 or 1).
    pub fn find_by_email(&mut self, email: &str) -> usize {
        self.update_filter(EmailIs::new(email));
        self.filtered_contacts().len()
    }

    /// Exact phone lookup; returns the number listed (0 or 1).
    pub fn find_by_phone(&mut self, phone: &str) -> usize {
        self.update_filter(PhoneIs::new(phone));
        self.filtered_contacts().len()
    }

    pub fn show_all(&mut self) {
        self.update_filter(ShowAll);
    }

    /// Adds a new contact.
    ///
    /// # Errors
    /// - `Book(DuplicatePhone | DuplicateEmail)` on identity clash.
    pub fn add_contact(&mut self, contact: Contact) -> ServiceResult<()> {
        self.state.current_mut().add(contact.clone())?;
        self.commit(Modification::Add(contact));
        Ok(())
    }

    /// Deletes the contact at a displayed index and returns it.
    pub fn delete_at(&mut self, index: usize) -> ServiceResult<Contact> {
        let target = self.displayed_contact(index)?.clone();
        self.delete(target)
    }

    /// Deletes the contact with `email`, regardless of the active filter.
    pub fn delete_by_email(&mut self, email: &str) -> ServiceResult<Contact> {
        let target = self
            .state
            .current()
            .find_by_email(email)
            .cloned()
            .ok_or_else(|| ServiceError::NoContactWithEmail(email.to_string()))?;
        self.delete(target)
    }

    /// Deletes the contact with `phone`, regardless of the active filter.
    pub fn delete_by_phone(&mut self, phone: &str) -> ServiceResult<Contact> {
        let target = self
            .state
            .current()
            .find_by_phone(phone)
            .cloned()
            .ok_or_else(|| ServiceError::NoContactWithPhone(phone.to_string()))?;
        self.delete(target)
    }

    /// Replaces the contact at a displayed index with `edited`.
    ///
    /// # Errors
    /// - `InvalidIndex` for an out-of-range index.
    /// - `Book(DuplicatePhone | DuplicateEmail)` when `edited` clashes with
    ///   another contact.
    pub fn edit_at(&mut self, index: usize, edited: Contact) -> ServiceResult<Contact> {
        let target = self.displayed_contact(index)?.clone();
        self.state.current_mut().replace(&target, edited.clone())?;
        self.commit(Modification::Edit {
            old: target,
            new: edited.clone(),
        });
        Ok(edited)
    }

    /// Overwrites the note of the contact at a displayed index.
    pub fn set_note_at(&mut self, index: usize, note: Note) -> ServiceResult<Contact> {
        let target = self.displayed_contact(index)?.clone();
        let edited = target.clone().with_note(note.clone());
        self.state.current_mut().replace(&target, edited.clone())?;
        self.commit(Modification::NoteChange { target, note });
        Ok(edited)
    }

    /// Removes every contact. Always succeeds, even on an empty book.
    pub fn clear(&mut self) {
        self.state.current_mut().clear();
        self.commit(Modification::Clear);
    }

    /// Loads contacts already parsed from `location`.
    ///
    /// With `overwrite` the book is replaced; otherwise contacts are
    /// appended. The whole batch is staged before the book changes. With
    /// `skip_duplicates`, contacts clashing with the book or with earlier
    /// contacts of the batch are dropped. Returns the number of contacts
    /// actually added.
    ///
    /// # Errors
    /// - `Book(DuplicatePhone | DuplicateEmail)` on the first clash when
    ///   `skip_duplicates` is off; nothing is imported.
    pub fn import(
        &mut self,
        location: &str,
        contacts: Vec<Contact>,
        options: ImportOptions,
    ) -> ServiceResult<usize> {
        let mut staged = if options.overwrite {
            ContactBook::new()
        } else {
            self.state.current().clone()
        };

        let mut imported = 0;
        let mut skipped = 0;
        for contact in contacts {
            match staged.add(contact) {
                Ok(()) => imported += 1,
                Err(ContactBookError::DuplicatePhone(_) | ContactBookError::DuplicateEmail(_))
                    if options.skip_duplicates =>
                {
                    skipped += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }

        debug!(
            "event=contact_import module=service overwrite={} imported={} skipped={}",
            options.overwrite, imported, skipped
        );
        self.state.current_mut().reset_with(staged);
        self.commit(Modification::Import {
            location: location.to_string(),
            overwrite: options.overwrite,
        });
        Ok(imported)
    }

    /// Undoes the latest modification.
    ///
    /// # Errors
    /// - `HistoryError::CannotUndo` when there is nothing to undo.
    pub fn undo(&mut self) -> HistoryResult<Modification> {
        let undone = self.state.undo()?;
        self.filter = Box::new(ShowAll);
        Ok(undone)
    }

    /// Redoes the latest undone modification.
    ///
    /// # Errors
    /// - `HistoryError::CannotRedo` when there is nothing to redo.
    pub fn redo(&mut self) -> HistoryResult<Modification> {
        let redone = self.state.redo()?;
        self.filter = Box::new(ShowAll);
        Ok(redone)
    }

    /// Undoes up to `times` modifications, newest first.
    pub fn undo_multiple(&mut self, times: usize) -> Vec<Modification> {
        let undone = self.state.undo_multiple(times);
        self.filter = Box::new(ShowAll);
        undone
    }

    /// Redoes up to `times` modifications, oldest first.
    pub fn redo_multiple(&mut self, times: usize) -> Vec<Modification> {
        let redone = self.state.redo_multiple(times);
        self.filter = Box::new(ShowAll);
        redone
    }

    fn delete(&mut self, target: Contact) -> ServiceResult<Contact> {
        let removed = self.state.current_mut().remove(&target)?;
        self.commit(Modification::Delete(removed.clone()));
        Ok(removed)
    }

    fn commit(&mut self, modification: Modification) {
        debug!(
            "event=contact_mutation module=service kind={} status=ok size={}",
            modification.kind(),
            self.state.current().len()
        );
        self.state.commit(modification);
        self.filter = Box::new(ShowAll);
    }
}

/// Type name of a predicate without its keyword, for metadata-only logs.
fn predicate_kind<P: ContactPredicate>(_predicate: &P) -> &'static str {
    let full = std::any::type_name::<P>();
    full.rsplit("::").next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::{ContactService, ServiceError};
    use crate::model::book::ContactBook;
    use crate::model::contact::Contact;

    fn contact(name: &str, phone: &str) -> Contact {
        Contact::parse(
            name,
            phone,
            &format!("{}@example.com", name.to_lowercase()),
            "Blk 1",
            &[],
        )
        .unwrap()
    }

    #[test]
    fn displayed_index_follows_filter() {
        let mut service = ContactService::new(
            ContactBook::from_contacts([contact("Alice", "111"), contact("Bob", "222")]).unwrap(),
        );
        assert_eq!(service.filter_by_name("Bob"), 1);
        assert_eq!(service.displayed_contact(0).unwrap().name.as_str(), "Bob");
        assert_eq!(
            service.displayed_contact(1).unwrap_err(),
            ServiceError::InvalidIndex {
                index: 1,
                displayed: 1
            }
        );
    }

    #[test]
    fn predicate_kind_strips_module_path() {
        assert_eq!(super::predicate_kind(&crate::search::predicate::ShowAll), "ShowAll");
    }
}
