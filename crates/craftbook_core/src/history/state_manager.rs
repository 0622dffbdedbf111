//! Linear undo/redo timeline over contact book snapshots.
//!
//! # Responsibility
//! - Record one snapshot per committed modification.
//! - Move the live book backwards and forwards along the timeline.
//!
//! # Invariants
//! - Timeline index 0 is the pristine state and carries no modification.
//! - `0 <= position < timeline_len()` at all times.
//! - Committing after an undo drops every entry after `position`.
//! - The live book is rewritten in place; it is never swapped for another
//!   value.

use crate::history::modification::Modification;
use crate::history::snapshot::Snapshot;
use crate::model::book::ContactBook;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type HistoryResult<T> = Result<T, HistoryError>;

/// Timeline boundary reached.
///
/// Both variants are expected outcomes of user input, not faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    /// Already at the pristine state.
    CannotUndo,
    /// Already at the newest state.
    CannotRedo,
}

impl Display for HistoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CannotUndo => write!(f, "There are no more changes to undo!"),
            Self::CannotRedo => write!(f, "There are no more changes to redo!"),
        }
    }
}

impl Error for HistoryError {}

#[derive(Debug, Clone)]
struct HistoryEntry {
    snapshot: Snapshot,
    modification: Modification,
}

/// Owner of the live contact book and its version history.
#[derive(Debug, Clone)]
pub struct StateManager {
    current: ContactBook,
    pristine: Snapshot,
    entries: Vec<HistoryEntry>,
    position: usize,
}

impl StateManager {
    /// Starts a timeline whose pristine state is `initial`.
    pub fn new(initial: ContactBook) -> Self {
        let pristine = Snapshot::capture(&initial);
        Self {
            current: initial,
            pristine,
            entries: Vec::new(),
            position: 0,
        }
    }

    /// Live book. Callers mutate it and then call [`StateManager::commit`].
    pub fn current(&self) -> &ContactBook {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut ContactBook {
        &mut self.current
    }

    /// Cursor index into the timeline; 0 is the pristine state.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of timeline entries including the pristine state.
    pub fn timeline_len(&self) -> usize {
        self.entries.len() + 1
    }

    /// Snapshot the cursor currently points at.
    pub fn current_snapshot(&self) -> &Snapshot {
        snapshot_at(&self.pristine, &self.entries, self.position)
    }

    pub fn can_undo(&self) -> bool {
        self.position > 0
    }

    pub fn can_redo(&self) -> bool {
        self.position < self.entries.len()
    }

    /// Modifications from oldest to newest, including undone ones that are
    /// still redoable.
    pub fn modifications(&self) -> impl Iterator<Item = &Modification> {
        self.entries.iter().map(|entry| &entry.modification)
    }

    /// Records the live book as a new state produced by `modification`.
    ///
    /// Any redoable entries are discarded first.
    pub fn commit(&mut self, modification: Modification) {
        self.debug_check_cursor();
        let dropped = self.entries.len() - self.position;
        self.entries.truncate(self.position);
        debug!(
            "event=history_commit module=history kind={} position={} dropped={}",
            modification.kind(),
            self.position + 1,
            dropped
        );
        self.entries.push(HistoryEntry {
            snapshot: Snapshot::capture(&self.current),
            modification,
        });
        self.position += 1;
    }

    /// Steps back one state and returns the modification that was undone.
    ///
    /// # Errors
    /// - `HistoryError::CannotUndo` at the pristine state; nothing changes.
    pub fn undo(&mut self) -> HistoryResult<Modification> {
        self.debug_check_cursor();
        if self.position == 0 {
            return Err(HistoryError::CannotUndo);
        }

        let undone = self.entries[self.position - 1].modification.clone();
        self.position -= 1;
        self.restore_current();
        debug!(
            "event=history_undo module=history kind={} position={}",
            undone.kind(),
            self.position
        );
        Ok(undone)
    }

    /// Steps forward one state and returns the modification re-applied.
    ///
    /// # Errors
    /// - `HistoryError::CannotRedo` at the newest state; nothing changes.
    pub fn redo(&mut self) -> HistoryResult<Modification> {
        self.debug_check_cursor();
        if self.position == self.entries.len() {
            return Err(HistoryError::CannotRedo);
        }

        self.position += 1;
        self.restore_current();
        let redone = self.entries[self.position - 1].modification.clone();
        debug!(
            "event=history_redo module=history kind={} position={}",
            redone.kind(),
            self.position
        );
        Ok(redone)
    }

    /// Undoes up to `times` modifications, newest first.
    ///
    /// Stops silently at the pristine state; the result may be shorter than
    /// `times` and is empty when nothing could be undone.
    pub fn undo_multiple(&mut self, times: usize) -> Vec<Modification> {
        let mut undone = Vec::with_capacity(times.min(self.position));
        for _ in 0..times {
            match self.undo() {
                Ok(modification) => undone.push(modification),
                Err(_) => break,
            }
        }
        undone
    }

    /// Redoes up to `times` modifications, oldest first.
    ///
    /// Stops silently at the newest state.
    pub fn redo_multiple(&mut self, times: usize) -> Vec<Modification> {
        let mut redone = Vec::with_capacity(times.min(self.entries.len() - self.position));
        for _ in 0..times {
            match self.redo() {
                Ok(modification) => redone.push(modification),
                Err(_) => break,
            }
        }
        redone
    }

    fn restore_current(&mut self) {
        let snapshot = snapshot_at(&self.pristine, &self.entries, self.position);
        self.current.reset_from(snapshot);
    }

    fn debug_check_cursor(&self) {
        debug_assert!(
            self.position < self.timeline_len(),
            "history cursor {} out of range {}",
            self.position,
            self.timeline_len()
        );
    }
}

/// Timeline lookup; position 0 is the pristine state.
fn snapshot_at<'a>(
    pristine: &'a Snapshot,
    entries: &'a [HistoryEntry],
    position: usize,
) -> &'a Snapshot {
    match position.checked_sub(1) {
        None => pristine,
        Some(index) => &entries[index].snapshot,
    }
}

#[cfg(test)]
mod tests {
    use super::{HistoryError, StateManager};
    use crate::history::modification::Modification;
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

    fn add(manager: &mut StateManager, person: &Contact) -> Modification {
        manager.current_mut().add(person.clone()).unwrap();
        let modification = Modification::Add(person.clone());
        manager.commit(modification.clone());
        modification
    }

    #[test]
    fn new_manager_is_at_pristine_state() {
        let manager = StateManager::new(ContactBook::new());
        assert_eq!(manager.position(), 0);
        assert_eq!(manager.timeline_len(), 1);
        assert!(!manager.can_undo());
        assert!(!manager.can_redo());
    }

    #[test]
    fn undo_and_redo_fail_at_boundaries_without_moving() {
        let mut manager = StateManager::new(ContactBook::new());
        assert_eq!(manager.undo(), Err(HistoryError::CannotUndo));
        add(&mut manager, &contact("Alice", "111"));
        assert_eq!(manager.redo(), Err(HistoryError::CannotRedo));
        assert_eq!(manager.position(), 1);
    }

    #[test]
    fn commit_after_undo_truncates_redo_branch() {
        let mut manager = StateManager::new(ContactBook::new());
        add(&mut manager, &contact("Alice", "111"));
        add(&mut manager, &contact("Bob", "222"));
        add(&mut manager, &contact("Carl", "333"));

        manager.undo().unwrap();
        manager.undo().unwrap();
        add(&mut manager, &contact("Dana", "444"));

        assert_eq!(manager.timeline_len(), 3);
        assert_eq!(manager.redo(), Err(HistoryError::CannotRedo));
        assert_eq!(manager.modifications().count(), 2);
    }

    #[test]
    fn current_snapshot_tracks_cursor() {
        let mut manager = StateManager::new(ContactBook::new());
        add(&mut manager, &contact("Alice", "111"));
        assert_eq!(manager.current_snapshot().len(), 1);
        manager.undo().unwrap();
        assert!(manager.current_snapshot().is_empty());
    }

    #[test]
    fn restored_book_matches_cursor_snapshot_at_every_position() {
        let seed = ContactBook::from_contacts([contact("Seed", "900")]).unwrap();
        let mut manager = StateManager::new(seed);
        add(&mut manager, &contact("Alice", "111"));
        add(&mut manager, &contact("Bob", "222"));

        while manager.can_undo() {
            manager.undo().unwrap();
            assert_eq!(
                manager.current().contacts(),
                manager.current_snapshot().contacts()
            );
        }
        assert_eq!(manager.current().len(), 1);

        while manager.can_redo() {
            manager.redo().unwrap();
            assert_eq!(
                manager.current().contacts(),
                manager.current_snapshot().contacts()
            );
        }
        assert_eq!(manager.current().len(), 3);
    }
}
