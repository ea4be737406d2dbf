//! Undo/redo scenarios run against the file-backed store.

use mynotes_core::{CommandHistory, JsonNoteStore, Note, NoteCommand, NoteStore};
use tempfile::tempdir;

fn new_note(store: &JsonNoteStore, title: &str) -> Note {
    Note::builder()
        .id(store.allocate_id().unwrap())
        .title(title)
        .note_text("body")
        .build()
        .unwrap()
}

fn titles(store: &JsonNoteStore) -> Vec<String> {
    store.get_all().into_iter().map(|n| n.title).collect()
}

#[test]
fn add_undo_redo_round_trip() {
    let tmp = tempdir().unwrap();
    let store = JsonNoteStore::open(tmp.path()).unwrap();
    let mut history = CommandHistory::new();
    let n1 = new_note(&store, "N1");

    history
        .execute(NoteCommand::Add { note: n1.clone() }, &store)
        .unwrap();
    assert_eq!(titles(&store), vec!["N1"]);
    assert!(history.can_undo());
    assert!(!history.can_redo());

    history.undo(&store).unwrap();
    assert!(store.get_all().is_empty());
    assert!(!history.can_undo());
    assert!(history.can_redo());

    history.redo(&store).unwrap();
    assert_eq!(titles(&store), vec!["N1"]);
    assert_eq!(store.get_all()[0].id, n1.id);
    assert!(history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn edit_writes_new_and_undo_restores_old() {
    let tmp = tempdir().unwrap();
    let store = JsonNoteStore::open(tmp.path()).unwrap();
    let mut history = CommandHistory::new();

    let old = new_note(&store, "Groceries");
    history
        .execute(NoteCommand::Add { note: old.clone() }, &store)
        .unwrap();

    let mut new = old.clone();
    new.title = "Groceries (updated)".into();
    new.color = Some("#3A52Fc".into());
    history
        .execute(
            NoteCommand::Edit {
                old: old.clone(),
                new: new.clone(),
            },
            &store,
        )
        .unwrap();

    let stored = &store.get_all()[0];
    assert_eq!(stored.title, "Groceries (updated)");
    assert_eq!(stored.id, old.id);

    history.undo(&store).unwrap();
    let stored = &store.get_all()[0];
    assert_eq!(stored.title, "Groceries");
    assert_eq!(stored.color, None);
    assert_eq!(stored.id, old.id);

    history.redo(&store).unwrap();
    assert_eq!(store.get_all()[0].title, "Groceries (updated)");
}

#[test]
fn delete_undo_restores_note() {
    let tmp = tempdir().unwrap();
    let store = JsonNoteStore::open(tmp.path()).unwrap();
    let mut history = CommandHistory::new();

    let note = new_note(&store, "doomed");
    history
        .execute(NoteCommand::Add { note: note.clone() }, &store)
        .unwrap();
    history
        .execute(NoteCommand::Delete { note: note.clone() }, &store)
        .unwrap();
    assert!(store.get_all().is_empty());

    history.undo(&store).unwrap();
    assert_eq!(titles(&store), vec!["doomed"]);
    assert_eq!(store.get_all()[0].id, note.id);
}

#[test]
fn new_command_discards_redo_history() {
    let tmp = tempdir().unwrap();
    let store = JsonNoteStore::open(tmp.path()).unwrap();
    let mut history = CommandHistory::new();

    let n1 = new_note(&store, "first");
    let n2 = new_note(&store, "second");

    history
        .execute(NoteCommand::Add { note: n1 }, &store)
        .unwrap();
    history.undo(&store).unwrap();
    assert!(history.can_redo());

    history
        .execute(NoteCommand::Add { note: n2 }, &store)
        .unwrap();
    assert!(!history.can_redo());

    // Redo is now a no-op; "first" stays gone.
    history.redo(&store).unwrap();
    assert_eq!(titles(&store), vec!["second"]);
}

#[test]
fn undo_redo_on_empty_history_are_noops() {
    let tmp = tempdir().unwrap();
    let store = JsonNoteStore::open(tmp.path()).unwrap();
    let mut history = CommandHistory::new();

    history.undo(&store).unwrap();
    history.redo(&store).unwrap();
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert!(store.get_all().is_empty());
}

#[test]
fn interleaved_undo_walks_back_in_order() {
    let tmp = tempdir().unwrap();
    let store = JsonNoteStore::open(tmp.path()).unwrap();
    let mut history = CommandHistory::new();

    for title in ["a", "b", "c"] {
        let note = new_note(&store, title);
        history
            .execute(NoteCommand::Add { note }, &store)
            .unwrap();
    }
    assert_eq!(titles(&store), vec!["c", "b", "a"]);

    history.undo(&store).unwrap();
    assert_eq!(titles(&store), vec!["b", "a"]);
    history.undo(&store).unwrap();
    assert_eq!(titles(&store), vec!["a"]);
    history.redo(&store).unwrap();
    assert_eq!(titles(&store), vec!["b", "a"]);
}
