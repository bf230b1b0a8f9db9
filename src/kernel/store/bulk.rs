use rustc_hash::FxHashSet;
use tracing::{info, warn};

use crate::kernel::error::{Result, WorkspaceError};
use crate::models::path::{
    base_name, directory, is_same_or_descendant, parent_folder, path_key, strip_folder_prefix,
    unique_folder_path,
};
use crate::models::{prune_nested_folders, FileEntry, FileId, FolderPath};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    pub moved_files: usize,
    pub moved_folders: usize,
    /// Entries left in place because they are (or contain) locked files.
    pub skipped_locked: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub trashed: usize,
    pub folders_removed: usize,
    pub skipped_locked: usize,
    /// The delete emptied the workspace and a default file was created.
    pub created_default: bool,
}

fn same_folder(a: &FolderPath, b: &FolderPath) -> bool {
    path_key(a.as_str()) == path_key(b.as_str())
}

fn dedup_ids(ids: &[FileId]) -> Vec<&FileId> {
    let mut seen = FxHashSet::default();
    ids.iter().filter(|id| seen.insert(*id)).collect()
}

impl super::WorkspaceStore {
    /// Valid, existing folders from `paths` with nested entries dropped.
    fn existing_top_folders(&self, paths: &[String]) -> Vec<String> {
        let parsed: Vec<String> = paths
            .iter()
            .filter_map(|raw| FolderPath::parse(raw).ok())
            .filter(|folder| self.folder_exists(folder))
            .map(|folder| folder.as_str().to_string())
            .collect();
        prune_nested_folders(parsed.iter().map(String::as_str))
    }

    /// Moves files and folders into `target` as one history entry. Folders move first;
    /// files inside a moving folder travel with it. Locked entries are skipped and counted.
    /// A call whose only folders already sit in `target` is rejected with `NoOpMove`.
    pub fn move_entries_to_folder(
        &mut self,
        file_ids: &[FileId],
        folder_paths: &[String],
        target: &FolderPath,
    ) -> Result<MoveOutcome> {
        if !self.folder_exists(target) {
            return Err(WorkspaceError::FolderNotFound(target.as_str().to_string()));
        }
        let folders = self.existing_top_folders(folder_paths);
        if let FolderPath::Folder(target_path) = target {
            if let Some(folder) = folders
                .iter()
                .find(|folder| is_same_or_descendant(target_path, folder))
            {
                return Err(WorkspaceError::MoveIntoSelf(folder.clone()));
            }
        }

        let mut outcome = MoveOutcome::default();
        let mut plans: Vec<(String, String)> = Vec::new();
        let mut planned = FxHashSet::default();
        let mut in_place = None;
        for folder in folders {
            if same_folder(&parent_folder(&folder), target) {
                in_place.get_or_insert(folder);
                continue;
            }
            let locked = self.locked_under(&folder);
            if locked > 0 {
                warn!(folder = %folder, locked, "move skipped locked folder");
                outcome.skipped_locked += 1;
                continue;
            }
            let desired = target.join(base_name(&folder));
            let destination = unique_folder_path(&desired, |candidate| {
                planned.contains(&path_key(candidate))
                    || self.folder_exists(&FolderPath::Folder(candidate.to_string()))
                    || self.file_by_path(candidate).is_some()
            });
            planned.insert(path_key(&destination));
            plans.push((folder, destination));
        }

        let mut file_moves: Vec<FileId> = Vec::new();
        for id in dedup_ids(file_ids) {
            let Some(file) = self.file(id) else {
                continue;
            };
            let covered = plans
                .iter()
                .any(|(from, _)| strip_folder_prefix(&file.path, from).is_some());
            if covered || same_folder(&directory(&file.path), target) {
                continue;
            }
            if file.locked {
                outcome.skipped_locked += 1;
                continue;
            }
            file_moves.push(id.clone());
        }

        if plans.is_empty() && file_moves.is_empty() {
            if outcome.skipped_locked > 0 {
                return Err(WorkspaceError::Locked {
                    count: outcome.skipped_locked,
                });
            }
            if let Some(folder) = in_place {
                return Err(WorkspaceError::NoOpMove(folder));
            }
            return Ok(outcome);
        }

        let before = self.begin_capture();
        for (from, to) in &plans {
            outcome.moved_files += self.reparent_folder(from, to);
            outcome.moved_folders += 1;
        }
        let now = self.now();
        for id in &file_moves {
            let Some(idx) = self.index_of(id) else {
                continue;
            };
            let desired = target.join(self.files[idx].name());
            let path = self.ensure_unique_path(&desired, Some(id), None);
            let file = &mut self.files[idx];
            file.path = path;
            file.touch(now);
            outcome.moved_files += 1;
        }

        let label = format!("Move {} items", plans.len() + file_moves.len());
        self.finish(&label, before);
        info!(
            target = %target,
            files = outcome.moved_files,
            folders = outcome.moved_folders,
            skipped = outcome.skipped_locked,
            "entries moved"
        );
        Ok(outcome)
    }

    /// Trashes files and folders as one history entry. Locked files and folders containing
    /// any are skipped and counted.
    pub fn delete_entries(&mut self, file_ids: &[FileId], folder_paths: &[String]) -> Result<DeleteOutcome> {
        let mut skipped_locked = 0;
        let mut folders = Vec::new();
        for folder in self.existing_top_folders(folder_paths) {
            if self.locked_under(&folder) > 0 {
                skipped_locked += 1;
            } else {
                folders.push(folder);
            }
        }

        let mut ids = Vec::new();
        for id in dedup_ids(file_ids) {
            let Some(file) = self.file(id) else {
                continue;
            };
            if folders
                .iter()
                .any(|folder| strip_folder_prefix(&file.path, folder).is_some())
            {
                continue;
            }
            if file.locked {
                skipped_locked += 1;
                continue;
            }
            ids.push(id.clone());
        }

        if ids.is_empty() && folders.is_empty() {
            if skipped_locked > 0 {
                return Err(WorkspaceError::Locked {
                    count: skipped_locked,
                });
            }
            return Ok(DeleteOutcome::default());
        }

        let before = self.begin_capture();
        let mut outcome = self.remove_into_trash(&ids, &folders);
        outcome.skipped_locked = skipped_locked;
        let label = format!("Delete {} items", ids.len() + folders.len());
        self.finish(&label, before);
        info!(
            trashed = outcome.trashed,
            skipped = skipped_locked,
            "entries deleted"
        );
        Ok(outcome)
    }

    /// Trashes every unlocked file and every explicit folder without locked files.
    pub fn delete_all(&mut self, confirmed: bool) -> Result<DeleteOutcome> {
        if !confirmed {
            return Err(WorkspaceError::ConfirmationRequired);
        }
        let ids: Vec<FileId> = self
            .files
            .iter()
            .filter(|f| !f.locked)
            .map(|f| f.id.clone())
            .collect();
        let skipped_locked = self.files.len() - ids.len();
        let folders: Vec<String> = self
            .folders
            .iter()
            .filter(|folder| self.locked_under(folder) == 0)
            .cloned()
            .collect();

        if ids.is_empty() && folders.is_empty() {
            if skipped_locked > 0 {
                return Err(WorkspaceError::Locked {
                    count: skipped_locked,
                });
            }
            return Ok(DeleteOutcome::default());
        }

        let before = self.begin_capture();
        let mut outcome = self.remove_into_trash(&ids, &folders);
        outcome.skipped_locked = skipped_locked;
        self.finish("Delete all files", before);
        info!(
            trashed = outcome.trashed,
            skipped = skipped_locked,
            "workspace cleared"
        );
        Ok(outcome)
    }

    /// Moves the listed files plus everything under `folders` into the trash, drops the
    /// matching explicit folders and re-seeds an empty workspace. Lock checks are the
    /// caller's job.
    pub(super) fn remove_into_trash(&mut self, ids: &[FileId], folders: &[String]) -> DeleteOutcome {
        let targets: FxHashSet<&FileId> = ids.iter().collect();
        let (removed, kept): (Vec<FileEntry>, Vec<FileEntry>) =
            std::mem::take(&mut self.files).into_iter().partition(|f| {
                targets.contains(&f.id)
                    || folders
                        .iter()
                        .any(|folder| strip_folder_prefix(&f.path, folder).is_some())
            });
        self.files = kept;

        let trashed = removed.len();
        let now = self.now();
        self.trash.push(removed, now);

        let folders_before = self.folders.len();
        self.folders
            .retain(|explicit| !folders.iter().any(|folder| is_same_or_descendant(explicit, folder)));

        DeleteOutcome {
            trashed,
            folders_removed: folders_before - self.folders.len(),
            skipped_locked: 0,
            created_default: self.ensure_non_empty(),
        }
    }
}
