use tracing::info;

use crate::kernel::error::{Result, WorkspaceError};
use crate::models::{FileId, TrashEntry};

impl super::WorkspaceStore {
    /// Live trash view, most recent first. Reading purges expired entries.
    pub fn trash_entries(&mut self) -> &[TrashEntry] {
        let now = self.now();
        self.trash.entries(now)
    }

    pub fn trash_len(&mut self) -> usize {
        let now = self.now();
        self.trash.len(now)
    }

    pub fn restore_from_trash(&mut self, entry_id: &FileId) -> Result<FileId> {
        let restored = self.restore_many(std::slice::from_ref(entry_id), "Restore file")?;
        restored
            .into_iter()
            .next()
            .ok_or_else(|| WorkspaceError::TrashEntryNotFound(entry_id.clone()))
    }

    /// Restores the most recently deleted entry.
    pub fn restore_last(&mut self) -> Result<FileId> {
        let now = self.now();
        let Some(newest) = self.trash.entries(now).first().map(|e| e.id().clone()) else {
            return Err(WorkspaceError::TrashEmpty);
        };
        self.restore_from_trash(&newest)
    }

    /// Restores the whole newest deletion batch (every entry sharing its `deleted_at`).
    pub fn undo_last_delete(&mut self) -> Result<Vec<FileId>> {
        let now = self.now();
        let batch = self.trash.latest_batch(now);
        if batch.is_empty() {
            return Err(WorkspaceError::TrashEmpty);
        }
        self.restore_many(&batch, "Undo delete")
    }

    pub fn restore_all(&mut self) -> Result<Vec<FileId>> {
        let now = self.now();
        let ids: Vec<FileId> = self
            .trash
            .entries(now)
            .iter()
            .map(|e| e.id().clone())
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.restore_many(&ids, "Restore all")
    }

    /// Permanently drops every trash entry. Returns how many were removed.
    pub fn empty_trash(&mut self, confirmed: bool) -> Result<usize> {
        if !confirmed {
            return Err(WorkspaceError::ConfirmationRequired);
        }
        let now = self.now();
        if self.trash.is_empty(now) {
            return Ok(0);
        }
        let before = self.begin_capture();
        let removed = self.trash.clear();
        self.finish("Empty trash", before);
        info!(removed, "trash emptied");
        Ok(removed)
    }

    /// Restores `entry_ids` in order as one history entry. Paths are uniquified against the
    /// live set (including files restored earlier in the batch); colliding ids are re-minted.
    fn restore_many(&mut self, entry_ids: &[FileId], label: &str) -> Result<Vec<FileId>> {
        let now = self.now();
        self.trash.prune(now);
        if let Some(missing) = entry_ids
            .iter()
            .find(|id| !self.trash.raw_entries().iter().any(|e| e.id() == *id))
        {
            return Err(WorkspaceError::TrashEntryNotFound(missing.clone()));
        }

        let before = self.begin_capture();
        let mut restored = Vec::with_capacity(entry_ids.len());
        for entry_id in entry_ids {
            let live_keys = self.live_path_keys(None);
            let live_ids = self.live_ids();
            let fresh = self.mint_id();
            let Some(file) = self
                .trash
                .restore(entry_id, now, &live_keys, &live_ids, || fresh)
            else {
                continue;
            };
            restored.push(file.id.clone());
            self.open_file_ids.push(file.id.clone());
            self.files.push(file);
        }

        if let Some(last) = restored.last() {
            self.active_file_id = last.clone();
        }
        self.selection.clear();
        for id in &restored {
            self.selection.toggle_file(id.clone());
        }
        self.finish(label, before);
        info!(restored = restored.len(), "trash restored");
        Ok(restored)
    }
}
