use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::kernel::snapshot::WorkspaceSnapshot;
use crate::models::{FileEntry, FileId, HistoryEntry, TrashStore};

/// Ids whose body the recorded operation itself replaced (an import, for one).
fn rewritten_bodies(entry: &HistoryEntry<WorkspaceSnapshot>) -> FxHashSet<FileId> {
    let before: FxHashMap<&FileId, &FileEntry> =
        entry.before.files.iter().map(|f| (&f.id, f)).collect();
    entry
        .after
        .files
        .iter()
        .filter(|after| {
            before.get(&after.id).is_some_and(|prior| {
                prior.content != after.content || prior.saved_content != after.saved_content
            })
        })
        .map(|f| f.id.clone())
        .collect()
}

impl super::WorkspaceStore {
    /// Deep copy of the current state, taken before a structural mutation.
    pub fn begin_capture(&self) -> WorkspaceSnapshot {
        WorkspaceSnapshot {
            files: self.files.clone(),
            folders: self.folders.clone(),
            trash: self.trash.raw_entries().to_vec(),
            active_file_id: self.active_file_id.clone(),
            open_file_ids: self.open_file_ids.clone(),
            selection: self.selection.clone(),
        }
    }

    pub(super) fn record(&mut self, label: &str, before: WorkspaceSnapshot) -> bool {
        let after = self.begin_capture();
        let at = self.now();
        let recorded = self.history.record(label, before, after, at);
        if recorded {
            debug!(
                label,
                entries = self.history.len(),
                pointer = self.history.pointer(),
                "history recorded"
            );
        }
        recorded
    }

    /// Replaces structural state with `snapshot`. Editor edits are not history-tracked, so
    /// files still live keep their current content, except ids in `rewritten` whose bodies
    /// the undone/redone operation replaced; those take the snapshot body.
    fn apply_snapshot(&mut self, snapshot: WorkspaceSnapshot, rewritten: &FxHashSet<FileId>) {
        self.history.begin_apply();

        let mut bodies: FxHashMap<FileId, (String, String)> = self
            .files
            .drain(..)
            .filter(|f| !rewritten.contains(&f.id))
            .map(|f| (f.id, (f.content, f.saved_content)))
            .collect();
        self.files = snapshot.files;
        for file in &mut self.files {
            if let Some((content, saved)) = bodies.remove(&file.id) {
                file.content = content;
                file.saved_content = saved;
            }
        }

        self.folders = snapshot.folders;
        self.trash = TrashStore::new(self.trash.retention_ms()).with_entries(snapshot.trash);
        self.active_file_id = snapshot.active_file_id;
        self.open_file_ids = snapshot.open_file_ids;
        self.selection = snapshot.selection;
        self.normalize_session();

        self.history.end_apply();
        self.persist();
    }

    pub fn undo(&mut self) -> bool {
        let Some((label, rewritten)) = self
            .history
            .undo_entry()
            .map(|entry| (entry.label.clone(), rewritten_bodies(entry)))
        else {
            return false;
        };
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.apply_snapshot(snapshot, &rewritten);
        debug!(label = %label, rewritten = rewritten.len(), "undo applied");
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some((label, rewritten)) = self
            .history
            .redo_entry()
            .map(|entry| (entry.label.clone(), rewritten_bodies(entry)))
        else {
            return false;
        };
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.apply_snapshot(snapshot, &rewritten);
        debug!(label = %label, rewritten = rewritten.len(), "redo applied");
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_pointer(&self) -> usize {
        self.history.pointer()
    }

    pub fn undo_label(&self) -> Option<&str> {
        self.history.undo_label()
    }

    pub fn redo_label(&self) -> Option<&str> {
        self.history.redo_label()
    }
}
