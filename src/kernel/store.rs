//! Workspace store: the single owner of workspace state.
//!
//! Structural operations share one shape: validate, capture a snapshot, mutate, then
//! `finish` (normalize the session, reconcile the selection, record history, persist).
//! Validation failures return before the capture, so they never touch state or history.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::models::path::{directory, is_same_or_descendant, normalize_file_name, path_key, unique_path};
use crate::models::{
    FileEntry, FileId, FolderPath, HistoryConfig, HistoryStore, Selection, Timestamp, TrashStore,
    WorkspaceTree,
};

use super::error::{Result, WorkspaceError};
use super::generation::RequestGeneration;
use super::services::ports::{Clock, KeyValueStore, WorkspaceSettings};
use super::snapshot::WorkspaceSnapshot;
use super::sort::{sort_files, SortMode};

mod bulk;
mod content;
mod files;
mod folders;
mod history;
mod persist;
mod selection;
mod trash;

pub use bulk::{DeleteOutcome, MoveOutcome};
pub use content::ContentRequest;
pub use persist::ImportSummary;

pub struct WorkspaceStore {
    files: Vec<FileEntry>,
    /// Explicit (possibly empty) folders; folders implied by file paths are not listed.
    folders: Vec<String>,
    trash: TrashStore,
    selection: Selection,
    history: HistoryStore<WorkspaceSnapshot>,
    active_file_id: FileId,
    open_file_ids: Vec<FileId>,
    settings: WorkspaceSettings,
    clock: Arc<dyn Clock>,
    storage: Option<Arc<dyn KeyValueStore>>,
    id_seq: u64,
    content_generation: RequestGeneration,
}

impl WorkspaceStore {
    /// Fresh workspace with one default file and no persistence.
    pub fn new(settings: WorkspaceSettings, clock: Arc<dyn Clock>) -> Self {
        let mut store = Self::empty(settings, clock);
        store.ensure_non_empty();
        store.normalize_session();
        store.reconcile_selection(true);
        store
    }

    fn empty(settings: WorkspaceSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            files: Vec::new(),
            folders: Vec::new(),
            trash: TrashStore::new(settings.trash_retention_ms()),
            selection: Selection::default(),
            history: HistoryStore::new(HistoryConfig {
                max_entries: settings.max_history,
            }),
            active_file_id: FileId::default(),
            open_file_ids: Vec::new(),
            settings,
            clock,
            storage: None,
            id_seq: 0,
            content_generation: RequestGeneration::default(),
        }
    }

    pub fn with_storage(mut self, storage: Arc<dyn KeyValueStore>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn settings(&self) -> &WorkspaceSettings {
        &self.settings
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn file(&self, id: &FileId) -> Option<&FileEntry> {
        self.files.iter().find(|f| &f.id == id)
    }

    pub fn file_by_path(&self, path: &str) -> Option<&FileEntry> {
        let key = path_key(path);
        self.files.iter().find(|f| path_key(&f.path) == key)
    }

    pub fn active_file_id(&self) -> &FileId {
        &self.active_file_id
    }

    pub fn active_file(&self) -> Option<&FileEntry> {
        self.file(&self.active_file_id)
    }

    pub fn open_file_ids(&self) -> &[FileId] {
        &self.open_file_ids
    }

    pub fn folders(&self) -> &[String] {
        &self.folders
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn tree(&self) -> WorkspaceTree {
        WorkspaceTree::build(&self.files, &self.folders)
    }

    pub fn sorted_files(&self, mode: SortMode) -> Vec<&FileEntry> {
        sort_files(&self.files, mode)
    }

    pub fn dirty_file_ids(&self) -> Vec<FileId> {
        self.files
            .iter()
            .filter(|f| f.is_dirty())
            .map(|f| f.id.clone())
            .collect()
    }

    /// Root always exists; a folder exists if it is explicit or implied by a file path.
    pub fn folder_exists(&self, folder: &FolderPath) -> bool {
        match folder {
            FolderPath::Root => true,
            FolderPath::Folder(path) => {
                self.folders
                    .iter()
                    .any(|explicit| is_same_or_descendant(explicit, path))
                    || self.files.iter().any(|f| folder.contains(&f.path))
            }
        }
    }

    /// Picks a path whose key collides with no live file (except `ignore`) and nothing in
    /// `reserved`.
    pub fn ensure_unique_path(
        &self,
        desired: &str,
        ignore: Option<&FileId>,
        reserved: Option<&FxHashSet<String>>,
    ) -> String {
        let taken = self.live_path_keys(ignore);
        unique_path(desired, |candidate| {
            let key = path_key(candidate);
            taken.contains(&key) || reserved.is_some_and(|r| r.contains(&key))
        })
    }

    fn now(&self) -> Timestamp {
        self.clock.now_ms()
    }

    fn mint_id(&mut self) -> FileId {
        let stamp = self.now();
        loop {
            self.id_seq += 1;
            let id = FileId::from_parts(stamp, self.id_seq);
            let in_use = self.files.iter().any(|f| f.id == id)
                || self.trash.raw_entries().iter().any(|e| e.file.id == id);
            if !in_use {
                return id;
            }
        }
    }

    fn index_of(&self, id: &FileId) -> Option<usize> {
        self.files.iter().position(|f| &f.id == id)
    }

    fn require_file(&self, id: &FileId) -> Result<usize> {
        self.index_of(id)
            .ok_or_else(|| WorkspaceError::FileNotFound(id.clone()))
    }

    fn live_ids(&self) -> FxHashSet<FileId> {
        self.files.iter().map(|f| f.id.clone()).collect()
    }

    fn live_path_keys(&self, ignore: Option<&FileId>) -> FxHashSet<String> {
        self.files
            .iter()
            .filter(|f| Some(&f.id) != ignore)
            .map(|f| path_key(&f.path))
            .collect()
    }

    /// Keys of every folder that exists, explicit or implied, at any depth.
    fn folder_keys(&self) -> FxHashSet<String> {
        let mut keys = FxHashSet::default();
        let explicit = self.folders.iter().map(|p| FolderPath::Folder(p.clone()));
        let implied = self.files.iter().map(|f| directory(&f.path));
        for mut folder in explicit.chain(implied) {
            while let FolderPath::Folder(path) = &folder {
                if !keys.insert(path_key(path)) {
                    break;
                }
                folder = folder.parent();
            }
        }
        keys
    }

    /// Parses a folder argument and requires it to exist.
    fn existing_folder(&self, raw: &str) -> Result<String> {
        let folder = FolderPath::parse(raw)?;
        if !self.folder_exists(&folder) {
            return Err(WorkspaceError::FolderNotFound(folder.as_str().to_string()));
        }
        Ok(folder.as_str().to_string())
    }

    fn locked_under(&self, folder: &str) -> usize {
        let folder = FolderPath::Folder(folder.to_string());
        self.files
            .iter()
            .filter(|f| f.locked && folder.contains(&f.path))
            .count()
    }

    fn make_default_file(&mut self) -> FileEntry {
        let name = &self.settings.default_file_name;
        let desired = normalize_file_name(name, name);
        let path = self.ensure_unique_path(&desired, None, None);
        let content = self.settings.default_file_content.clone();
        let id = self.mint_id();
        FileEntry::new(id, path, content, self.now())
    }

    /// Synthesizes the default file when the workspace would otherwise be empty.
    fn ensure_non_empty(&mut self) -> bool {
        if !self.files.is_empty() {
            return false;
        }
        let file = self.make_default_file();
        tracing::info!(path = %file.path, "workspace emptied, created default file");
        self.files.push(file);
        true
    }

    /// Open ids are live and unique, the active file is live and open.
    fn normalize_session(&mut self) {
        let live = self.live_ids();
        let mut seen = FxHashSet::default();
        self.open_file_ids
            .retain(|id| live.contains(id) && seen.insert(id.clone()));

        if !live.contains(&self.active_file_id) {
            let fallback = self
                .open_file_ids
                .first()
                .or_else(|| self.files.first().map(|f| &f.id))
                .cloned();
            if let Some(id) = fallback {
                self.active_file_id = id;
            }
        }
        if !self.open_file_ids.contains(&self.active_file_id) {
            self.open_file_ids.insert(0, self.active_file_id.clone());
        }
    }

    /// Common tail of every structural operation. Returns whether history was recorded.
    fn finish(&mut self, label: &str, before: WorkspaceSnapshot) -> bool {
        self.normalize_session();
        self.reconcile_selection(true);
        let recorded = self.record(label, before);
        self.persist();
        recorded
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
