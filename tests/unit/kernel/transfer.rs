use super::*;
use serde_json::json;

fn options() -> NormalizeOptions<'static> {
    NormalizeOptions {
        default_file_name: "main.js",
        default_file_content: "// hello",
        now: 1_000,
    }
}

fn minter() -> impl FnMut() -> FileId {
    let mut seq = 0u64;
    move || {
        seq += 1;
        FileId::from_parts(1_000, seq)
    }
}

fn normalize(value: Value) -> Option<PersistedWorkspace> {
    let mut mint = minter();
    normalize_workspace(&value, &options(), &mut mint)
}

#[test]
fn test_rejects_unrelated_json() {
    assert!(normalize(json!({"hello": "world"})).is_none());
    assert!(normalize(json!([1, 2, 3])).is_none());
    assert!(normalize(json!("files")).is_none());
}

#[test]
fn test_empty_shape_degrades_to_default_file() {
    let workspace = normalize(json!({"files": []})).unwrap();
    assert_eq!(workspace.files.len(), 1);
    assert_eq!(workspace.files[0].path, "main.js");
    assert_eq!(workspace.files[0].content, "// hello");
    assert_eq!(workspace.active_file_id, workspace.files[0].id);
    assert_eq!(workspace.open_file_ids, vec![workspace.active_file_id.clone()]);
}

#[test]
fn test_accepts_export_envelope() {
    let workspace = normalize(json!({
        "format": "zworkspace",
        "version": 1,
        "data": {
            "files": [{"id": "a", "path": "src/app.js", "content": "x"}],
            "activeFileId": "a"
        }
    }))
    .unwrap();
    assert_eq!(workspace.files[0].id.as_str(), "a");
    assert_eq!(workspace.files[0].path, "src/app.js");
    assert!(!workspace.files[0].is_dirty());
}

#[test]
fn test_drops_malformed_and_dedupes() {
    let workspace = normalize(json!({
        "files": [
            {"id": "a", "path": "app.js"},
            {"id": "a", "path": "APP.js"},
            {"id": "b", "path": "bad?.js"},
            {"id": "c", "path": "x.js", "pinned": "yes"},
            42,
            {"name": "legacy", "code": "1"}
        ],
        "activeId": "missing",
        "openIds": ["a", "a", "ghost"]
    }))
    .unwrap();

    let paths: Vec<&str> = workspace.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["app.js", "APP (2).js", "legacy.js"]);
    assert_eq!(workspace.files[2].content, "1");

    let mut ids: Vec<&FileId> = workspace.files.iter().map(|f| &f.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);

    assert_eq!(workspace.active_file_id.as_str(), "a");
    assert_eq!(workspace.open_file_ids, vec![FileId::new("a")]);
}

#[test]
fn test_trash_and_folders_are_normalized() {
    let workspace = normalize(json!({
        "files": [{"id": "a", "path": "a.js"}],
        "trash": [{"id": "t", "path": "old.js", "deletedAt": 500}, {"path": "fresh.js"}],
        "folders": ["src", "SRC", "", "bad/..", "docs\\api"]
    }))
    .unwrap();

    assert_eq!(workspace.trash.len(), 2);
    assert_eq!(workspace.trash[0].deleted_at, 500);
    assert_eq!(workspace.trash[1].deleted_at, 1_000);
    assert_eq!(workspace.folders, vec!["src".to_string(), "docs/api".to_string()]);
}

#[test]
fn test_parse_import_text_limits() {
    assert_eq!(
        parse_import_text("{\"files\":[]}", 4),
        Err(ImportError::TooLarge { len: 12, max: 4 })
    );
    assert!(matches!(
        parse_import_text("{oops", 0),
        Err(ImportError::InvalidJson(_))
    ));
    assert!(parse_import_text("{}", 0).is_ok());
}

#[test]
fn test_export_round_trips_through_import() {
    let data = normalize(json!({
        "files": [{"id": "a", "path": "a.js", "content": "1", "savedContent": "0"}]
    }))
    .unwrap();
    let text = export_workspace(&data, 2_000).unwrap();
    assert!(text.contains("\"format\": \"zworkspace\""));

    let value = parse_import_text(&text, 0).unwrap();
    let again = normalize(value).unwrap();
    assert_eq!(again.files, data.files);
    assert!(again.files[0].is_dirty());
    assert_eq!(export_file_name(2_000), "zworkspace-2000.json");
}
