use rustc_hash::FxHashSet;
use tracing::warn;

use crate::kernel::error::{Result, WorkspaceError};
use crate::models::path::{
    base_name, directory, normalize_file_name, path_key, split_leaf_extension, split_segments,
    validate_path,
};
use crate::models::{FileEntry, FileId, FolderPath, PathError};

impl super::WorkspaceStore {
    /// Creates a file named `name` (which may carry subfolders) inside `folder`, opens and
    /// activates it.
    pub fn create_file(
        &mut self,
        folder: &FolderPath,
        name: &str,
        content: Option<&str>,
    ) -> Result<FileId> {
        if split_segments(name).is_empty() {
            return Err(PathError::Empty.into());
        }
        let relative = normalize_file_name(name, &self.settings.default_file_name);
        validate_path(&relative)?;
        if !self.folder_exists(folder) {
            return Err(WorkspaceError::FolderNotFound(folder.as_str().to_string()));
        }

        let desired = folder.join(&relative);
        let path = self.ensure_unique_path(&desired, None, None);
        let content = content
            .map(str::to_string)
            .unwrap_or_else(|| self.settings.default_file_content.clone());

        let before = self.begin_capture();
        let id = self.mint_id();
        let now = self.now();
        self.files.push(FileEntry::new(id.clone(), path, content, now));
        self.open_file_ids.push(id.clone());
        self.active_file_id = id.clone();
        self.selection.set_single_file(id.clone());
        self.finish("Create file", before);
        Ok(id)
    }

    /// Renames a file in place. A name containing `/` is taken as a full path from the root.
    /// Returns the final (possibly uniquified) path.
    pub fn rename_file(&mut self, id: &FileId, new_name: &str) -> Result<String> {
        let idx = self.require_file(id)?;
        let file = &self.files[idx];
        if file.locked {
            warn!(path = %file.path, "rename rejected: file is locked");
            return Err(WorkspaceError::Locked { count: 1 });
        }
        if split_segments(new_name).is_empty() {
            return Err(PathError::Empty.into());
        }

        let current = file.path.clone();
        let normalized = normalize_file_name(new_name, base_name(&current));
        validate_path(&normalized)?;
        let desired = if new_name.contains(['/', '\\']) {
            normalized
        } else {
            directory(&current).join(&normalized)
        };
        if desired == current {
            return Ok(current);
        }

        let path = self.ensure_unique_path(&desired, Some(id), None);
        if path == current {
            return Ok(current);
        }

        let before = self.begin_capture();
        let now = self.now();
        let file = &mut self.files[idx];
        file.path = path.clone();
        file.touch(now);
        self.finish("Rename file", before);
        Ok(path)
    }

    pub fn duplicate_file(&mut self, id: &FileId) -> Result<FileId> {
        self.require_file(id)?;
        let before = self.begin_capture();
        let mut reserved = FxHashSet::default();
        let copy = self.insert_duplicate(id, &mut reserved)?;
        self.active_file_id = copy.clone();
        self.selection.set_single_file(copy.clone());
        self.finish("Duplicate file", before);
        Ok(copy)
    }

    /// Duplicates every listed file as one history entry; copies land right after their
    /// sources and are selected afterwards.
    pub fn duplicate_files(&mut self, ids: &[FileId]) -> Result<Vec<FileId>> {
        let mut sources: Vec<FileId> = Vec::new();
        for id in ids {
            self.require_file(id)?;
            if !sources.contains(id) {
                sources.push(id.clone());
            }
        }
        if sources.is_empty() {
            return Ok(Vec::new());
        }

        let before = self.begin_capture();
        let mut reserved = FxHashSet::default();
        let mut copies = Vec::with_capacity(sources.len());
        for id in &sources {
            copies.push(self.insert_duplicate(id, &mut reserved)?);
        }

        self.selection.clear();
        for copy in &copies {
            self.selection.toggle_file(copy.clone());
        }
        if let Some(last) = copies.last() {
            self.active_file_id = last.clone();
        }
        let label = format!("Duplicate {} files", copies.len());
        self.finish(&label, before);
        Ok(copies)
    }

    fn insert_duplicate(&mut self, id: &FileId, reserved: &mut FxHashSet<String>) -> Result<FileId> {
        let idx = self.require_file(id)?;
        let source = &self.files[idx];
        let (stem, extension) = split_leaf_extension(source.name());
        let desired = directory(&source.path).join(&format!("{stem} copy{extension}"));
        let content = source.content.clone();

        let path = self.ensure_unique_path(&desired, None, Some(&*reserved));
        reserved.insert(path_key(&path));
        let copy_id = self.mint_id();
        let now = self.now();
        let copy = FileEntry::new(copy_id.clone(), path, content, now);
        self.files.insert(idx + 1, copy);
        self.open_file_ids.push(copy_id.clone());
        Ok(copy_id)
    }

    /// Deletes a single file into the trash. The last remaining file cannot be deleted.
    pub fn delete_file(&mut self, id: &FileId) -> Result<()> {
        let idx = self.require_file(id)?;
        if self.files[idx].locked {
            return Err(WorkspaceError::Locked { count: 1 });
        }
        if self.files.len() == 1 {
            warn!(path = %self.files[idx].path, "delete rejected: last file");
            return Err(WorkspaceError::LastFile);
        }

        let before = self.begin_capture();
        let file = self.files.remove(idx);
        let now = self.now();
        self.trash.push(vec![file], now);
        self.finish("Delete file", before);
        Ok(())
    }

    /// Returns how many files actually changed.
    pub fn set_pinned(&mut self, ids: &[FileId], pinned: bool) -> usize {
        let label = if pinned { "Pin files" } else { "Unpin files" };
        self.set_flag(ids, label, |file| &mut file.pinned, pinned)
    }

    pub fn set_locked(&mut self, ids: &[FileId], locked: bool) -> usize {
        let label = if locked { "Lock files" } else { "Unlock files" };
        self.set_flag(ids, label, |file| &mut file.locked, locked)
    }

    fn set_flag(
        &mut self,
        ids: &[FileId],
        label: &str,
        flag: impl Fn(&mut FileEntry) -> &mut bool,
        value: bool,
    ) -> usize {
        let targets: FxHashSet<&FileId> = ids.iter().collect();
        let changes = self
            .files
            .iter()
            .filter(|f| targets.contains(&f.id))
            .count();
        if changes == 0 {
            return 0;
        }

        let before = self.begin_capture();
        let mut changed = 0;
        for file in self.files.iter_mut().filter(|f| targets.contains(&f.id)) {
            let slot = flag(file);
            if *slot != value {
                *slot = value;
                changed += 1;
            }
        }
        if changed > 0 {
            self.finish(label, before);
        }
        changed
    }

    /// Makes `id` the active file, opening it if needed. Session state only, no history.
    pub fn activate_file(&mut self, id: &FileId) -> Result<()> {
        let idx = self.require_file(id)?;
        if !self.open_file_ids.contains(id) {
            self.open_file_ids.push(id.clone());
        }
        self.active_file_id = id.clone();
        let now = self.now();
        self.files[idx].touch(now);
        self.selection.set_single_file(id.clone());
        self.persist();
        Ok(())
    }

    /// Closes an editor tab. Closing the active tab activates its neighbour; the last open
    /// tab stays open.
    pub fn close_file(&mut self, id: &FileId) -> Result<()> {
        self.require_file(id)?;
        let Some(pos) = self.open_file_ids.iter().position(|open| open == id) else {
            return Ok(());
        };
        if self.open_file_ids.len() == 1 {
            return Ok(());
        }

        self.open_file_ids.remove(pos);
        if &self.active_file_id == id {
            let next = pos.min(self.open_file_ids.len() - 1);
            self.active_file_id = self.open_file_ids[next].clone();
        }
        self.normalize_session();
        self.persist();
        Ok(())
    }
}
