use craftbook_core::{Contact, ContactBook, HistoryError, Modification, StateManager};

fn contact(name: &str, phone: &str) -> Contact {
    Contact::parse(
        name,
        phone,
        &format!("{}@example.com", name.to_lowercase()),
        "Blk 30 Geylang Street 29, #06-40",
        &[],
    )
    .unwrap()
}

fn add(state: &mut StateManager, contact: &Contact) {
    state.current_mut().add(contact.clone()).unwrap();
    state.commit(Modification::Add(contact.clone()));
}

fn names(state: &StateManager) -> Vec<String> {
    state
        .current()
        .iter()
        .map(|contact| contact.name.to_string())
        .collect()
}

#[test]
fn undo_multiple_reverts_delete_then_add_newest_first() {
    let alice = contact("Alice", "111");
    let bob = contact("Bob", "222");
    let mut state = StateManager::new(ContactBook::new());

    add(&mut state, &alice);
    add(&mut state, &bob);
    let removed = state.current_mut().remove(&alice).unwrap();
    state.commit(Modification::Delete(removed));
    assert_eq!(names(&state), vec!["Bob"]);

    let undone = state.undo_multiple(2);
    assert_eq!(
        undone,
        vec![Modification::Delete(alice.clone()), Modification::Add(bob.clone())]
    );
    assert_eq!(
        undone[0].user_description(),
        format!("Delete person {alice}")
    );
    assert_eq!(names(&state), vec!["Alice"]);
    assert_eq!(state.position(), 1);
    assert!(state.can_undo());
    assert!(state.can_redo());
}

#[test]
fn undo_then_redo_restores_state_after_commit() {
    let mut state = StateManager::new(ContactBook::new());
    add(&mut state, &contact("Alice", "111"));

    let carl = contact("Carl", "333");
    add(&mut state, &carl);
    let after_commit = state.current().contacts().to_vec();

    let undone = state.undo().unwrap();
    assert_eq!(undone, Modification::Add(carl.clone()));
    assert_eq!(names(&state), vec!["Alice"]);

    let redone = state.redo().unwrap();
    assert_eq!(redone, Modification::Add(carl));
    assert_eq!(state.current().contacts(), after_commit.as_slice());
    assert_eq!(state.current_snapshot().contacts(), after_commit.as_slice());
}

#[test]
fn commit_after_undo_discards_redoable_states() {
    let mut state = StateManager::new(ContactBook::new());
    add(&mut state, &contact("Ann", "101"));
    add(&mut state, &contact("Ben", "102"));
    add(&mut state, &contact("Cat", "103"));

    state.undo().unwrap();
    state.undo().unwrap();
    add(&mut state, &contact("Dan", "104"));

    assert_eq!(state.redo().unwrap_err(), HistoryError::CannotRedo);
    assert_eq!(state.timeline_len(), 3);
    assert_eq!(names(&state), vec!["Ann", "Dan"]);

    let targets = state
        .modifications()
        .map(|modification| modification.target().unwrap().name.to_string())
        .collect::<Vec<_>>();
    assert_eq!(targets, vec!["Ann", "Dan"]);
}

#[test]
fn undo_multiple_past_history_stops_at_pristine_state() {
    let seeded = ContactBook::from_contacts([contact("Seed", "900")]).unwrap();
    let mut state = StateManager::new(seeded);
    add(&mut state, &contact("Ann", "101"));
    add(&mut state, &contact("Ben", "102"));

    let undone = state.undo_multiple(5);
    assert_eq!(undone.len(), 2);
    assert_eq!(state.position(), 0);
    assert_eq!(names(&state), vec!["Seed"]);
    assert_eq!(state.undo().unwrap_err(), HistoryError::CannotUndo);

    let redone = state.redo_multiple(5);
    assert_eq!(redone.len(), 2);
    assert_eq!(names(&state), vec!["Seed", "Ann", "Ben"]);
    assert!(state.redo_multiple(1).is_empty());
}

#[test]
fn boundary_errors_leave_state_untouched() {
    let mut state = StateManager::new(ContactBook::new());
    assert_eq!(state.undo().unwrap_err(), HistoryError::CannotUndo);
    assert_eq!(state.redo().unwrap_err(), HistoryError::CannotRedo);
    assert!(state.undo_multiple(3).is_empty());
    assert_eq!(state.position(), 0);
    assert_eq!(state.timeline_len(), 1);
    assert!(state.current().is_empty());
    assert_eq!(
        HistoryError::CannotUndo.to_string(),
        "There are no more changes to undo!"
    );
}

#[test]
fn clear_and_import_records_are_reversible() {
    let mut state = StateManager::new(ContactBook::new());
    add(&mut state, &contact("Ann", "101"));

    state.current_mut().clear();
    state.commit(Modification::Clear);
    assert!(state.current().is_empty());

    let imported = ContactBook::from_contacts([contact("Zed", "555")]).unwrap();
    state.current_mut().reset_with(imported);
    state.commit(Modification::Import {
        location: "data/friends.json".to_string(),
        overwrite: true,
    });

    let undone = state.undo_multiple(2);
    assert_eq!(
        undone[0].to_string(),
        "Import data from data/friends.json (overwrite: true)"
    );
    assert_eq!(undone[1], Modification::Clear);
    assert_eq!(names(&state), vec!["Ann"]);
}
