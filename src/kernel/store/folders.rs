use rustc_hash::FxHashSet;
use tracing::{info, warn};

use crate::kernel::error::{Result, WorkspaceError};
use crate::models::path::{
    is_same_or_descendant, join_segments, path_key, split_segments, strip_folder_prefix,
    unique_path, validate_segments,
};
use crate::models::{FileEntry, FolderPath};

use super::bulk::DeleteOutcome;

/// Rewrites `path` from under `from` to under `to`. `None` if it is not inside `from`.
pub(super) fn reparent(path: &str, from: &str, to: &str) -> Option<String> {
    if path_key(path) == path_key(from) {
        return Some(to.to_string());
    }
    strip_folder_prefix(path, from).map(|rest| format!("{to}/{rest}"))
}

impl super::WorkspaceStore {
    /// Creates an explicit (empty) folder `name` under `parent`.
    pub fn create_folder(&mut self, parent: &FolderPath, name: &str) -> Result<FolderPath> {
        let segments = split_segments(name);
        validate_segments(&segments)?;
        if !self.folder_exists(parent) {
            return Err(WorkspaceError::FolderNotFound(parent.as_str().to_string()));
        }

        let path = parent.join(&join_segments(&segments));
        let folder = FolderPath::Folder(path.clone());
        if self.folder_exists(&folder) {
            return Err(WorkspaceError::FolderExists(path));
        }
        if self.file_by_path(&path).is_some() {
            return Err(WorkspaceError::FileExists(path));
        }

        let before = self.begin_capture();
        self.folders.push(path.clone());
        self.selection.set_single_folder(&path);
        self.finish("Create folder", before);
        Ok(folder)
    }

    /// Renames a folder and everything under it in one step. All-or-nothing: any locked file
    /// inside rejects the whole rename.
    pub fn rename_folder(&mut self, from: &str, to: &str) -> Result<String> {
        let from = self.existing_folder(from)?;
        let FolderPath::Folder(to) = FolderPath::parse(to)? else {
            return Err(WorkspaceError::FolderNotFound(to.to_string()));
        };
        if to == from {
            return Ok(to);
        }

        let case_only = path_key(&to) == path_key(&from);
        if !case_only {
            if is_same_or_descendant(&to, &from) {
                return Err(WorkspaceError::MoveIntoSelf(from));
            }
            if self.folder_exists(&FolderPath::Folder(to.clone())) {
                return Err(WorkspaceError::FolderExists(to));
            }
            if self.file_by_path(&to).is_some() {
                return Err(WorkspaceError::FileExists(to));
            }
        }
        let locked = self.locked_under(&from);
        if locked > 0 {
            warn!(folder = %from, locked, "folder rename rejected");
            return Err(WorkspaceError::Locked { count: locked });
        }

        let before = self.begin_capture();
        let renamed = self.reparent_folder(&from, &to);
        self.finish("Rename folder", before);
        info!(from = %from, to = %to, files = renamed, "folder renamed");
        Ok(to)
    }

    /// Moves every file, explicit folder and selected folder under `from` to `to`.
    /// Files are visited in path order and each new path is reserved as it is chosen, so
    /// results are stable and collision-free. Returns the number of files moved.
    pub(super) fn reparent_folder(&mut self, from: &str, to: &str) -> usize {
        let mut moving: Vec<usize> = self
            .files
            .iter()
            .enumerate()
            .filter(|(_, f)| strip_folder_prefix(&f.path, from).is_some())
            .map(|(idx, _)| idx)
            .collect();
        moving.sort_by_key(|idx| path_key(&self.files[*idx].path));

        let staying: FxHashSet<String> = self
            .files
            .iter()
            .filter(|f| strip_folder_prefix(&f.path, from).is_none())
            .map(|f| path_key(&f.path))
            .collect();
        let mut reserved = FxHashSet::default();
        for &idx in &moving {
            let file: &mut FileEntry = &mut self.files[idx];
            let Some(desired) = reparent(&file.path, from, to) else {
                continue;
            };
            let path = unique_path(&desired, |candidate| {
                let key = path_key(candidate);
                staying.contains(&key) || reserved.contains(&key)
            });
            reserved.insert(path_key(&path));
            file.path = path;
        }

        let mut seen = FxHashSet::default();
        let folders = std::mem::take(&mut self.folders);
        self.folders = folders
            .into_iter()
            .map(|folder| reparent(&folder, from, to).unwrap_or(folder))
            .filter(|folder| seen.insert(path_key(folder)))
            .collect();
        self.selection.rename_folder_prefix(from, to);

        moving.len()
    }

    /// Moves a folder and its files to the trash. All-or-nothing on locked descendants.
    pub fn delete_folder(&mut self, path: &str) -> Result<DeleteOutcome> {
        let path = self.existing_folder(path)?;
        let locked = self.locked_under(&path);
        if locked > 0 {
            warn!(folder = %path, locked, "folder delete rejected");
            return Err(WorkspaceError::Locked { count: locked });
        }

        let before = self.begin_capture();
        let outcome = self.remove_into_trash(&[], std::slice::from_ref(&path));
        self.finish("Delete folder", before);
        info!(folder = %path, trashed = outcome.trashed, "folder deleted");
        Ok(outcome)
    }
}
