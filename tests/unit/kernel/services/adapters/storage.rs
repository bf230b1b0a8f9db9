use super::*;

#[test]
fn test_memory_storage_round_trip() {
    let storage = MemoryStorage::new();
    assert!(storage.is_empty());
    assert_eq!(storage.load("k"), None);

    storage.save("k", "v1").unwrap();
    storage.save("k", "v2").unwrap();
    assert_eq!(storage.load("k").as_deref(), Some("v2"));
    assert_eq!(storage.len(), 1);

    storage.remove("k").unwrap();
    assert_eq!(storage.load("k"), None);
}

#[test]
fn test_file_storage_writes_through_temp_file() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(tmp.path().join("store"));

    storage.save("zworkspace.files.v1", "{}").unwrap();
    let path = storage.path_for("zworkspace.files.v1");
    assert_eq!(path.file_name().unwrap(), "zworkspace.files.v1.json");
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());
    assert_eq!(storage.load("zworkspace.files.v1").as_deref(), Some("{}"));

    storage.remove("zworkspace.files.v1").unwrap();
    storage.remove("zworkspace.files.v1").unwrap();
    assert_eq!(storage.load("zworkspace.files.v1"), None);
}

#[test]
fn test_file_storage_sanitizes_keys() {
    let storage = FileStorage::new("/tmp/x");
    let path = storage.path_for("../evil/key");
    assert_eq!(path.file_name().unwrap(), ".._evil_key.json");
    assert_eq!(path.parent(), Some(storage.dir()));
}
