use super::*;
use crate::kernel::sort::SortMode;

#[test]
fn test_settings_path_uses_app_dir() {
    let path = get_settings_path().unwrap();
    assert!(path.ends_with(".zworkspace/setting.json"));
}

#[test]
fn test_ensure_settings_file_writes_defaults_once() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nested").join("setting.json");

    ensure_settings_file_at(&path).unwrap();
    assert_eq!(load_settings_from(&path), Some(WorkspaceSettings::default()));

    std::fs::write(&path, r#"{"sort_mode": "name"}"#).unwrap();
    ensure_settings_file_at(&path).unwrap();
    let settings = load_settings_from(&path).unwrap();
    assert_eq!(settings.sort_mode, SortMode::Name);
    assert_eq!(settings.max_history, WorkspaceSettings::default().max_history);
}

#[test]
fn test_malformed_settings_are_ignored() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("setting.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert_eq!(load_settings_from(&path), None);
    assert_eq!(load_settings_from(&tmp.path().join("missing.json")), None);
}
