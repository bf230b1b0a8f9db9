use serde::{Deserialize, Serialize};

use crate::models::{FileEntry, FileId, Selection, Timestamp, TrashEntry};

/// Deep copy of everything undo/redo restores. Owned values only; nothing
/// inside aliases live state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceSnapshot {
    pub files: Vec<FileEntry>,
    pub folders: Vec<String>,
    pub trash: Vec<TrashEntry>,
    pub active_file_id: FileId,
    pub open_file_ids: Vec<FileId>,
    pub selection: Selection,
}

/// On-disk shape under the storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedWorkspace {
    pub files: Vec<FileEntry>,
    #[serde(default)]
    pub folders: Vec<String>,
    pub active_file_id: FileId,
    #[serde(default)]
    pub open_file_ids: Vec<FileId>,
    #[serde(default)]
    pub trash: Vec<TrashEntry>,
    #[serde(default)]
    pub saved_at: Timestamp,
}
