use super::*;

fn file(id: &str, path: &str) -> FileEntry {
    FileEntry::new(FileId::new(id), path, "body", 0)
}

fn no_paths() -> FxHashSet<String> {
    FxHashSet::default()
}

fn no_ids() -> FxHashSet<FileId> {
    FxHashSet::default()
}

#[test]
fn test_push_stamps_and_prepends() {
    let mut trash = TrashStore::default();
    trash.push(vec![file("a", "a.js")], 100);
    trash.push(vec![file("b", "b.js"), file("c", "c.js")], 200);

    let entries = trash.entries(200);
    let ids: Vec<&str> = entries.iter().map(|e| e.id().as_str()).collect();
    assert_eq!(ids, vec!["b", "c", "a"]);
    assert_eq!(entries[0].deleted_at, 200);
    assert_eq!(entries[2].deleted_at, 100);
}

#[test]
fn test_push_replaces_same_id() {
    let mut trash = TrashStore::default();
    trash.push(vec![file("a", "a.js")], 100);
    trash.push(vec![file("a", "a.js")], 300);
    assert_eq!(trash.len(300), 1);
    assert_eq!(trash.entries(300)[0].deleted_at, 300);
}

#[test]
fn test_prune_respects_retention_boundary() {
    let mut trash = TrashStore::new(1_000);
    trash.push(vec![file("a", "a.js")], 0);

    assert_eq!(trash.prune(1_000), 0);
    assert_eq!(trash.len(1_000), 1);
    assert_eq!(trash.prune(1_001), 1);
    assert!(trash.is_empty(1_001));
}

#[test]
fn test_default_retention_is_thirty_days() {
    let trash = TrashStore::default();
    assert_eq!(trash.retention_ms(), 30 * DAY_MS);
}

#[test]
fn test_restore_reuses_id_and_path_when_free() {
    let mut trash = TrashStore::default();
    trash.push(vec![file("a", "src/a.js")], 10);

    let restored = trash
        .restore(&FileId::new("a"), 20, &no_paths(), &no_ids(), || {
            FileId::new("minted")
        })
        .unwrap();
    assert_eq!(restored.id, FileId::new("a"));
    assert_eq!(restored.path, "src/a.js");
    assert_eq!(restored.last_touched, 20);
    assert!(trash.is_empty(20));
}

#[test]
fn test_restore_resolves_collisions() {
    let mut trash = TrashStore::default();
    trash.push(vec![file("a", "a.js")], 10);

    let mut paths = FxHashSet::default();
    paths.insert("a.js".to_string());
    let mut live = FxHashSet::default();
    live.insert(FileId::new("a"));

    let restored = trash
        .restore(&FileId::new("a"), 20, &paths, &live, || FileId::new("minted"))
        .unwrap();
    assert_eq!(restored.id, FileId::new("minted"));
    assert_eq!(restored.path, "a (2).js");
}

#[test]
fn test_restore_expired_entry_fails() {
    let mut trash = TrashStore::new(50);
    trash.push(vec![file("a", "a.js")], 0);
    let restored = trash.restore(&FileId::new("a"), 51, &no_paths(), &no_ids(), || {
        FileId::new("x")
    });
    assert!(restored.is_none());
}

#[test]
fn test_latest_batch() {
    let mut trash = TrashStore::default();
    trash.push(vec![file("a", "a.js")], 10);
    trash.push(vec![file("b", "b.js"), file("c", "c.js")], 20);
    assert_eq!(
        trash.latest_batch(20),
        vec![FileId::new("b"), FileId::new("c")]
    );
}

#[test]
fn test_with_entries_orders_newest_first() {
    let entries = vec![
        TrashEntry {
            file: file("old", "old.js"),
            deleted_at: 1,
        },
        TrashEntry {
            file: file("new", "new.js"),
            deleted_at: 5,
        },
    ];
    let trash = TrashStore::default().with_entries(entries);
    assert_eq!(trash.raw_entries()[0].id().as_str(), "new");
}
