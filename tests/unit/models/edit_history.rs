use super::*;

fn store(max: usize) -> HistoryStore<Vec<u32>> {
    HistoryStore::new(HistoryConfig { max_entries: max })
}

#[test]
fn test_record_and_undo_redo() {
    let mut history = store(10);
    assert!(history.record("add", vec![1], vec![1, 2], 5));

    assert!(history.can_undo());
    assert!(!history.can_redo());
    assert_eq!(history.undo_label(), Some("add"));

    assert_eq!(history.undo(), Some(vec![1]));
    assert!(!history.can_undo());
    assert!(history.can_redo());
    assert_eq!(history.redo_label(), Some("add"));

    assert_eq!(history.redo(), Some(vec![1, 2]));
    assert_eq!(history.pointer(), 1);
    assert_eq!(history.redo(), None);
}

#[test]
fn test_noop_is_discarded() {
    let mut history = store(10);
    assert!(!history.record("rename", vec![1], vec![1], 0));
    assert_eq!(history.len(), 0);
    assert_eq!(history.pointer(), 0);
}

#[test]
fn test_record_truncates_redo_tail() {
    let mut history = store(10);
    history.record("a", vec![0], vec![1], 0);
    history.record("b", vec![1], vec![2], 0);
    history.undo();

    history.record("c", vec![1], vec![3], 0);
    assert_eq!(history.len(), 2);
    assert!(!history.can_redo());
    let labels: Vec<&str> = history.entries().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["a", "c"]);
}

#[test]
fn test_eviction_shifts_pointer() {
    let mut history = store(3);
    for i in 0..5u32 {
        history.record(format!("op{i}"), vec![i], vec![i + 1], 0);
    }
    assert_eq!(history.len(), 3);
    assert_eq!(history.pointer(), 3);
    let labels: Vec<&str> = history.entries().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["op2", "op3", "op4"]);

    assert_eq!(history.undo(), Some(vec![4]));
    assert_eq!(history.undo(), Some(vec![3]));
    assert_eq!(history.undo(), Some(vec![2]));
    assert_eq!(history.undo(), None);
}

#[test]
fn test_recording_while_applying_is_ignored() {
    let mut history = store(10);
    history.begin_apply();
    assert!(history.is_applying());
    assert!(!history.record("nested", vec![0], vec![1], 0));
    history.begin_apply();
    history.end_apply();
    assert!(history.is_applying());
    history.end_apply();
    assert!(!history.is_applying());
    assert!(history.record("real", vec![0], vec![1], 0));
}

#[test]
fn test_default_limit() {
    let history: HistoryStore<u8> = HistoryStore::default();
    assert_eq!(history.max_entries(), DEFAULT_MAX_HISTORY);
}

#[test]
fn test_pending_entries_follow_pointer() {
    let mut history = store(10);
    assert!(history.undo_entry().is_none());
    history.record("a", vec![], vec![1], 1);
    history.record("b", vec![1], vec![1, 2], 2);

    let entry = history.undo_entry().unwrap();
    assert_eq!((entry.label.as_str(), entry.at), ("b", 2));
    history.undo();
    assert_eq!(history.redo_entry().unwrap().after, vec![1, 2]);
    assert_eq!(history.undo_entry().unwrap().label, "a");
}
