use assert_fs::prelude::*;
use std::fs;

use tag_move::{Engine, MoveItem};

#[test]
fn execute_moves_into_per_person_folder() {
    let temp = assert_fs::TempDir::new().unwrap();
    let inbox = temp.child("inbox");
    let people = temp.child("people");
    inbox.create_dir_all().unwrap();

    let photo = inbox.child("A.jpg");
    photo.write_str("pixels").unwrap();

    let engine = Engine::default();
    let items = vec![MoveItem::new(photo.path(), Some("Alice".into()))];
    let outcome = engine.execute(&items, people.path());

    assert!(outcome.is_clean(), "errors: {:?}", outcome.errors);
    assert_eq!(outcome.moved.len(), 1);

    let dest = people.path().join("Alice").join("A.jpg");
    assert_eq!(outcome.moved[0].to, dest);
    assert!(dest.is_file());
    assert!(!photo.path().exists());
    assert_eq!(fs::read_to_string(&dest).unwrap(), "pixels");
    assert!(engine.can_undo());
}

#[test]
fn colliding_targets_get_numeric_suffix_never_overwrite() {
    let temp = assert_fs::TempDir::new().unwrap();
    let a = temp.child("one/A.jpg");
    let b = temp.child("two/A.jpg");
    a.write_str("first").unwrap();
    b.write_str("second").unwrap();
    let people = temp.child("people");

    let engine = Engine::default();
    let items = vec![
        MoveItem::new(a.path(), Some("Alice".into())),
        MoveItem::new(b.path(), Some("Alice".into())),
    ];
    let outcome = engine.execute(&items, people.path());

    assert!(outcome.is_clean(), "errors: {:?}", outcome.errors);
    let dir = people.path().join("Alice");
    assert_eq!(fs::read_to_string(dir.join("A.jpg")).unwrap(), "first");
    assert_eq!(fs::read_to_string(dir.join("A (1).jpg")).unwrap(), "second");
}

#[test]
fn unlabelled_and_excluded_items_are_silent_noops() {
    let temp = assert_fs::TempDir::new().unwrap();
    let photo = temp.child("inbox/A.jpg");
    photo.write_str("x").unwrap();
    let people = temp.child("people");

    let engine = Engine::default();
    let mut excluded = MoveItem::new(photo.path(), Some("Alice".into()));
    excluded.include = false;
    let items = vec![
        excluded,
        MoveItem::new(photo.path(), None),
        MoveItem::new(photo.path(), Some("   ".into())),
    ];
    let outcome = engine.execute(&items, people.path());

    assert!(outcome.moved.is_empty());
    assert!(outcome.errors.is_empty());
    assert!(photo.path().exists());
    // Nothing succeeded, so no batch was recorded.
    assert!(!engine.can_undo());
}

#[test]
fn labels_are_sanitized_into_directory_names() {
    let temp = assert_fs::TempDir::new().unwrap();
    let photo = temp.child("inbox/A.jpg");
    photo.write_str("x").unwrap();
    let people = temp.child("people");

    let engine = Engine::default();
    let items = vec![MoveItem::new(photo.path(), Some("A/li:ce*?".into()))];
    let outcome = engine.execute(&items, people.path());

    assert!(outcome.is_clean());
    assert!(people.path().join("Alice").join("A.jpg").is_file());
}

#[test]
fn source_already_at_destination_is_a_noop_success() {
    let temp = assert_fs::TempDir::new().unwrap();
    let people = temp.child("people");
    let settled = people.child("Alice/A.jpg");
    settled.write_str("already here").unwrap();

    let engine = Engine::default();
    let items = vec![MoveItem::new(settled.path(), Some("Alice".into()))];
    let outcome = engine.execute(&items, people.path());

    assert!(outcome.is_clean());
    assert_eq!(outcome.moved.len(), 1);
    // No suffixed copy appeared; the file stayed where it was.
    assert!(settled.path().is_file());
    assert!(!people.path().join("Alice").join("A (1).jpg").exists());
}

#[test]
fn unusable_dest_root_is_call_fatal() {
    let temp = assert_fs::TempDir::new().unwrap();
    let photo = temp.child("inbox/A.jpg");
    photo.write_str("x").unwrap();
    // A file in the way of the root's parent makes create_dir_all fail.
    let blocker = temp.child("blocked");
    blocker.write_str("not a directory").unwrap();
    let dest_root = blocker.path().join("people");

    let engine = Engine::default();
    let items = vec![MoveItem::new(photo.path(), Some("Alice".into()))];
    let outcome = engine.execute(&items, &dest_root);

    assert!(outcome.moved.is_empty());
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].path, dest_root);
    // No per-item processing was attempted.
    assert!(photo.path().exists());
    assert!(!engine.can_undo());
}
