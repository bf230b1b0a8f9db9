use rustc_hash::FxHashSet;

use crate::kernel::error::Result;
use crate::models::{FileId, FolderPath};

use super::bulk::{DeleteOutcome, MoveOutcome};

impl super::WorkspaceStore {
    pub fn select_file(&mut self, id: &FileId) -> Result<()> {
        self.require_file(id)?;
        self.selection.set_single_file(id.clone());
        Ok(())
    }

    pub fn select_folder(&mut self, path: &str) -> Result<()> {
        let folder = self.existing_folder(path)?;
        self.selection.set_single_folder(&folder);
        Ok(())
    }

    pub fn toggle_file_selection(&mut self, id: &FileId) -> Result<()> {
        self.require_file(id)?;
        self.selection.toggle_file(id.clone());
        Ok(())
    }

    pub fn toggle_folder_selection(&mut self, path: &str) -> Result<()> {
        let folder = self.existing_folder(path)?;
        self.selection.toggle_folder(&folder);
        Ok(())
    }

    /// Range-selects from the anchor to `id` in tree order, skipping files inside
    /// `collapsed` folders (keys as produced by `path_key`).
    pub fn select_range_to(&mut self, id: &FileId, collapsed: &FxHashSet<String>) -> Result<()> {
        self.require_file(id)?;
        let visible = self.tree().visible_file_ids(collapsed);
        self.selection.range_to(id.clone(), &visible);
        Ok(())
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(self.files.iter().map(|f| &f.id));
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Drops selected entities that no longer exist; with `ensure_one` an empty selection
    /// falls back to the active file.
    pub fn reconcile_selection(&mut self, ensure_one: bool) {
        let files = self.live_ids();
        let folders = self.folder_keys();
        self.selection
            .reconcile(&files, &folders, ensure_one, Some(&self.active_file_id));
    }

    /// Selected files plus every file under a selected folder, in list order.
    pub fn selected_file_ids(&self) -> Vec<FileId> {
        let folders: Vec<FolderPath> = self
            .selection
            .pruned_folder_selection()
            .into_iter()
            .map(FolderPath::Folder)
            .collect();
        self.files
            .iter()
            .filter(|f| {
                self.selection.contains_file(&f.id)
                    || folders.iter().any(|folder| folder.contains(&f.path))
            })
            .map(|f| f.id.clone())
            .collect()
    }

    fn selected_entries(&self) -> (Vec<FileId>, Vec<String>) {
        let files = self
            .files
            .iter()
            .filter(|f| self.selection.contains_file(&f.id))
            .map(|f| f.id.clone())
            .collect();
        (files, self.selection.pruned_folder_selection())
    }

    pub fn delete_selection(&mut self) -> Result<DeleteOutcome> {
        let (files, folders) = self.selected_entries();
        self.delete_entries(&files, &folders)
    }

    pub fn move_selection_to(&mut self, target: &FolderPath) -> Result<MoveOutcome> {
        let (files, folders) = self.selected_entries();
        self.move_entries_to_folder(&files, &folders, target)
    }

    pub fn duplicate_selection(&mut self) -> Result<Vec<FileId>> {
        let (files, _) = self.selected_entries();
        self.duplicate_files(&files)
    }

    pub fn set_selection_pinned(&mut self, pinned: bool) -> usize {
        let ids = self.selected_file_ids();
        self.set_pinned(&ids, pinned)
    }

    pub fn set_selection_locked(&mut self, locked: bool) -> usize {
        let ids = self.selected_file_ids();
        self.set_locked(&ids, locked)
    }
}
