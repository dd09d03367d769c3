use assert_fs::prelude::*;
use walkdir::WalkDir;

use tag_move::{Engine, MoveItem};

fn tree_snapshot(root: &std::path::Path) -> Vec<std::path::PathBuf> {
    let mut entries: Vec<_> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .map(|e| e.into_path())
        .collect();
    entries.sort();
    entries
}

#[test]
fn plan_performs_no_writes_and_is_deterministic() {
    let temp = assert_fs::TempDir::new().unwrap();
    let a = temp.child("inbox/A.jpg");
    let b = temp.child("inbox/B.jpg");
    a.write_str("a").unwrap();
    b.write_str("b").unwrap();
    let people = temp.child("people");

    let engine = Engine::default();
    let items = vec![
        MoveItem::new(a.path(), Some("Alice".into())),
        MoveItem::new(b.path(), Some("Bob".into())),
        MoveItem::new(temp.child("inbox/C.jpg").path(), None),
    ];

    let before = tree_snapshot(temp.path());
    let first = engine.plan(&items, people.path());
    let second = engine.plan(&items, people.path());
    let after = tree_snapshot(temp.path());

    assert_eq!(before, after, "plan must not touch the filesystem");
    assert_eq!(first, second, "plan must be deterministic");

    // Order-preserving, skipping the unlabelled item.
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].from, a.path());
    assert_eq!(first[0].to, people.path().join("Alice").join("A.jpg"));
    assert_eq!(first[0].person, "Alice");
    assert_eq!(first[1].to, people.path().join("Bob").join("B.jpg"));
}

#[test]
fn source_without_file_name_is_skipped_in_preview_and_errors_at_execute() {
    let temp = assert_fs::TempDir::new().unwrap();
    let people = temp.child("people");

    let engine = Engine::default();
    let items = vec![MoveItem::new("/", Some("Alice".into()))];

    // The preview has no error channel, so the item simply does not appear.
    assert!(engine.plan(&items, people.path()).is_empty());

    // Execution surfaces it as a per-item error instead.
    let outcome = engine.execute(&items, people.path());
    assert!(outcome.moved.is_empty());
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].message.contains("no file name"));
}

#[test]
fn plan_previews_suffix_for_existing_destination() {
    let temp = assert_fs::TempDir::new().unwrap();
    let photo = temp.child("inbox/A.jpg");
    photo.write_str("new").unwrap();
    let occupied = temp.child("people/Alice/A.jpg");
    occupied.write_str("old").unwrap();

    let engine = Engine::default();
    let items = vec![MoveItem::new(photo.path(), Some("Alice".into()))];
    let plan = engine.plan(&items, temp.child("people").path());

    assert_eq!(
        plan[0].to,
        temp.child("people").path().join("Alice").join("A (1).jpg")
    );
}
