use assert_fs::prelude::*;
use std::fs;

use tag_move::{Engine, MoveItem};

/// Pushing 25 successful batches at capacity 20 leaves exactly the 20 most
/// recent; the 5 oldest become unrecoverable via undo.
#[test]
fn history_is_bounded_with_oldest_evicted() {
    let temp = assert_fs::TempDir::new().unwrap();
    let people = temp.child("people");

    let engine = Engine::new(20);
    for i in 0..25 {
        let photo = temp.child(format!("inbox/photo{i:02}.jpg"));
        photo.write_str(&format!("{i}")).unwrap();
        let items = vec![MoveItem::new(photo.path(), Some("Alice".into()))];
        let outcome = engine.execute(&items, people.path());
        assert!(outcome.is_clean(), "batch {i} failed: {:?}", outcome.errors);
    }
    assert_eq!(engine.history_len(), 20);

    // Undoing everything restores batches 24 down to 5.
    let mut undone_batches = 0;
    while engine.can_undo() {
        let undone = engine.undo_last();
        assert!(undone.is_clean());
        undone_batches += 1;
    }
    assert_eq!(undone_batches, 20);

    for i in 0..25 {
        let original = temp.path().join("inbox").join(format!("photo{i:02}.jpg"));
        let moved = people.path().join("Alice").join(format!("photo{i:02}.jpg"));
        if i < 5 {
            // Evicted: stuck at the destination.
            assert!(moved.is_file(), "photo{i:02} should remain moved");
            assert!(!original.exists());
        } else {
            assert!(original.is_file(), "photo{i:02} should be restored");
            assert!(!moved.exists());
        }
    }
}

/// Each undo call consumes exactly one batch regardless of its size.
#[test]
fn one_undo_per_batch() {
    let temp = assert_fs::TempDir::new().unwrap();
    let people = temp.child("people");
    let engine = Engine::new(20);

    for batch in 0..2 {
        let mut items = Vec::new();
        for n in 0..3 {
            let photo = temp.child(format!("inbox/b{batch}_{n}.jpg"));
            photo.write_str("x").unwrap();
            items.push(MoveItem::new(photo.path(), Some("Bob".into())));
        }
        assert!(engine.execute(&items, people.path()).is_clean());
    }
    assert_eq!(engine.history_len(), 2);

    let undone = engine.undo_last();
    assert_eq!(undone.moved.len(), 3);
    assert_eq!(engine.history_len(), 1);

    // The second batch's files are back, the first batch's are not.
    assert!(temp.path().join("inbox/b1_0.jpg").is_file());
    assert!(!temp.path().join("inbox/b0_0.jpg").exists());
    assert!(
        fs::read_dir(people.path().join("Bob"))
            .unwrap()
            .filter_map(Result::ok)
            .count()
            == 3
    );
}
