//! Workspace export/import.
//!
//! Export wraps the persisted shape in a small envelope. Import is tolerant: it accepts the
//! envelope or the bare persisted shape, drops malformed entries, dedupes ids and paths and
//! always yields at least one file.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::models::path::{normalize_file_name, path_key, unique_path, validate_path};
use crate::models::{FileEntry, FileId, FolderPath, Timestamp, TrashEntry};

use super::snapshot::PersistedWorkspace;

pub const EXPORT_FORMAT: &str = "zworkspace";
pub const EXPORT_VERSION: u32 = 1;

const SHAPE_KEYS: [&str; 7] = [
    "files",
    "trash",
    "folders",
    "activeFileId",
    "activeId",
    "openFileIds",
    "openIds",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("workspace import is too large ({len} chars, max {max})")]
    TooLarge { len: usize, max: usize },
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
    #[error("unsupported workspace payload")]
    UnsupportedPayload,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportEnvelope<'a> {
    format: &'static str,
    version: u32,
    exported_at: Timestamp,
    data: &'a PersistedWorkspace,
}

pub fn export_workspace(data: &PersistedWorkspace, exported_at: Timestamp) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ExportEnvelope {
        format: EXPORT_FORMAT,
        version: EXPORT_VERSION,
        exported_at,
        data,
    })
}

pub fn export_file_name(exported_at: Timestamp) -> String {
    format!("{EXPORT_FORMAT}-{exported_at}.json")
}

/// `max_chars == 0` disables the size check.
pub fn parse_import_text(text: &str, max_chars: usize) -> Result<Value, ImportError> {
    if max_chars > 0 {
        let len = text.chars().count();
        if len > max_chars {
            return Err(ImportError::TooLarge { len, max: max_chars });
        }
    }
    serde_json::from_str(text).map_err(|err| ImportError::InvalidJson(err.to_string()))
}

pub struct NormalizeOptions<'a> {
    pub default_file_name: &'a str,
    pub default_file_content: &'a str,
    pub now: Timestamp,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FileRecord {
    id: Option<String>,
    #[serde(alias = "name")]
    path: Option<String>,
    #[serde(alias = "code")]
    content: Option<String>,
    saved_content: Option<String>,
    last_touched: Option<Timestamp>,
    pinned: bool,
    locked: bool,
    deleted_at: Option<Timestamp>,
}

impl FileRecord {
    fn into_entry(
        self,
        options: &NormalizeOptions<'_>,
        seen_ids: &mut FxHashSet<FileId>,
        mint: &mut dyn FnMut() -> FileId,
    ) -> Option<(FileEntry, Option<Timestamp>)> {
        let path = normalize_file_name(
            self.path.as_deref().unwrap_or_default(),
            options.default_file_name,
        );
        validate_path(&path).ok()?;

        let id = match self.id.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() && !seen_ids.contains(&FileId::new(raw)) => FileId::new(raw),
            _ => fresh_id(seen_ids, mint),
        };
        seen_ids.insert(id.clone());

        let content = self.content.unwrap_or_default();
        let entry = FileEntry {
            id,
            path,
            saved_content: self.saved_content.unwrap_or_else(|| content.clone()),
            content,
            last_touched: self.last_touched.unwrap_or(options.now),
            pinned: self.pinned,
            locked: self.locked,
        };
        Some((entry, self.deleted_at))
    }
}

fn fresh_id(seen: &FxHashSet<FileId>, mint: &mut dyn FnMut() -> FileId) -> FileId {
    loop {
        let id = mint();
        if !seen.contains(&id) {
            return id;
        }
    }
}

fn records(value: Option<&Value>) -> impl Iterator<Item = FileRecord> + '_ {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|item| FileRecord::deserialize(item).ok())
}

fn string_field<'a>(source: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| source.get(*key).and_then(Value::as_str))
}

fn id_list(source: &Value, keys: &[&str]) -> Vec<FileId> {
    keys.iter()
        .find_map(|key| source.get(*key).and_then(Value::as_array))
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(FileId::new)
        .collect()
}

/// Returns `None` when `value` is neither the export envelope nor something shaped like a
/// workspace.
pub fn normalize_workspace(
    value: &Value,
    options: &NormalizeOptions<'_>,
    mint: &mut dyn FnMut() -> FileId,
) -> Option<PersistedWorkspace> {
    let object = value.as_object()?;
    let wrapped = object.get("format").and_then(Value::as_str) == Some(EXPORT_FORMAT)
        && object.get("data").is_some_and(Value::is_object);
    let source = if wrapped { object.get("data")? } else { value };
    if !wrapped && !SHAPE_KEYS.iter().any(|key| object.contains_key(*key)) {
        return None;
    }

    let mut seen_ids = FxHashSet::default();
    let mut seen_paths = FxHashSet::default();
    let mut files = Vec::new();
    for record in records(source.get("files")) {
        let Some((mut file, _)) = record.into_entry(options, &mut seen_ids, mint) else {
            continue;
        };
        file.path = unique_path(&file.path, |candidate| seen_paths.contains(&path_key(candidate)));
        seen_paths.insert(path_key(&file.path));
        files.push(file);
    }

    if files.is_empty() {
        let id = fresh_id(&seen_ids, mint);
        seen_ids.insert(id.clone());
        let path = normalize_file_name(options.default_file_name, options.default_file_name);
        files.push(FileEntry::new(id, path, options.default_file_content, options.now));
    }

    // Trash ids only need to be unique among themselves; restore re-mints on collision.
    let mut trash_ids = FxHashSet::default();
    let trash: Vec<TrashEntry> = records(source.get("trash"))
        .filter_map(|record| record.into_entry(options, &mut trash_ids, mint))
        .map(|(file, deleted_at)| TrashEntry {
            file,
            deleted_at: deleted_at.unwrap_or(options.now),
        })
        .collect();

    let mut folder_keys = FxHashSet::default();
    let folders: Vec<String> = source
        .get("folders")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .filter_map(|raw| match FolderPath::parse(raw) {
            Ok(FolderPath::Folder(path)) => Some(path),
            _ => None,
        })
        .filter(|path| folder_keys.insert(path_key(path)))
        .collect();

    let live: FxHashSet<&FileId> = files.iter().map(|f| &f.id).collect();
    let active_file_id = string_field(source, &["activeFileId", "activeId"])
        .map(FileId::new)
        .filter(|id| live.contains(id))
        .unwrap_or_else(|| files[0].id.clone());

    let mut open_file_ids: Vec<FileId> = Vec::new();
    for id in id_list(source, &["openFileIds", "openIds"]) {
        if live.contains(&id) && !open_file_ids.contains(&id) {
            open_file_ids.push(id);
        }
    }
    if !open_file_ids.contains(&active_file_id) {
        open_file_ids.insert(0, active_file_id.clone());
    }

    Some(PersistedWorkspace {
        files,
        folders,
        active_file_id,
        open_file_ids,
        trash,
        saved_at: source
            .get("savedAt")
            .and_then(Value::as_u64)
            .unwrap_or(options.now),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/transfer.rs"]
mod tests;
