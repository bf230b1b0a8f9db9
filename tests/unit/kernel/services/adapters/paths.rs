use super::*;

#[test]
fn test_get_log_dir() {
    let dir = get_log_dir();
    assert!(dir.is_some());
    let dir = dir.unwrap();
    assert!(dir.to_string_lossy().contains(APP_NAME));
    assert!(dir.ends_with(LOG_DIR));
}

#[test]
fn test_get_storage_dir() {
    let dir = get_storage_dir().unwrap();
    assert!(dir.to_string_lossy().contains(APP_NAME));
    assert!(dir.ends_with(STORAGE_DIR));
    assert_eq!(dir.parent(), get_app_data_dir().as_deref());
}

#[test]
fn test_ensure_dir_creates_missing() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("a").join("b");
    let dir = ensure_dir(Some(target.clone()), "test").unwrap();
    assert_eq!(dir, target);
    assert!(target.is_dir());

    let err = ensure_dir(None, "test").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
}

#[test]
fn test_cache_and_data_dirs_differ() {
    let data = base_dir(BaseDir::Data).unwrap();
    let cache = base_dir(BaseDir::Cache).unwrap();
    assert_ne!(data, cache);
    assert_eq!(missing_dir("x").kind(), io::ErrorKind::NotFound);
}
