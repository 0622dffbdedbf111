//! Immutable copies of the contact book.

use crate::model::book::ContactBook;
use crate::model::contact::Contact;

/// Frozen deep copy of every contact at one point in time.
///
/// There is no mutable access; the live book is restored from a snapshot by
/// copying values out, so later edits never reach stored history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    contacts: Vec<Contact>,
}

impl Snapshot {
    /// Copies every contact out of `book`.
    pub fn capture(book: &ContactBook) -> Self {
        Self {
            contacts: book.contacts().to_vec(),
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Snapshot;
    use crate::model::book::ContactBook;
    use crate::model::contact::Contact;

    #[test]
    fn later_book_edits_do_not_reach_snapshot() {
        let alice = Contact::parse("Alice", "111", "alice@example.com", "Blk 1", &[]).unwrap();
        let mut book = ContactBook::from_contacts([alice.clone()]).unwrap();
        let snapshot = Snapshot::capture(&book);

        book.clear();
        assert_eq!(snapshot.contacts(), &[alice]);

        book.reset_from(&snapshot);
        assert_eq!(book.len(), 1);
    }
}
