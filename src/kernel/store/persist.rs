use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::kernel::error::{Result, WorkspaceError};
use crate::kernel::services::ports::{Clock, KeyValueStore, WorkspaceSettings};
use crate::kernel::snapshot::PersistedWorkspace;
use crate::kernel::transfer::{self, NormalizeOptions};
use crate::models::{FileId, Selection, TrashStore};

/// What an import would bring in; shown before asking for confirmation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub files: usize,
    pub folders: usize,
    pub trash: usize,
}

impl ImportSummary {
    fn of(workspace: &PersistedWorkspace) -> Self {
        Self {
            files: workspace.files.len(),
            folders: workspace.folders.len(),
            trash: workspace.trash.len(),
        }
    }
}

impl super::WorkspaceStore {
    /// Loads the workspace saved under `settings.storage_key`. Missing or malformed data
    /// degrades to a fresh workspace with one default file.
    pub fn open(
        settings: WorkspaceSettings,
        clock: Arc<dyn Clock>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        let mut store = Self::empty(settings, clock);
        let loaded = storage
            .load(&store.settings.storage_key)
            .and_then(|text| match serde_json::from_str::<Value>(&text) {
                Ok(value) => Some(value),
                Err(err) => {
                    warn!(error = %err, "stored workspace is not valid JSON");
                    None
                }
            })
            .and_then(|value| store.normalize_value(&value));
        store.storage = Some(storage);

        match loaded {
            Some(workspace) => {
                info!(
                    files = workspace.files.len(),
                    trash = workspace.trash.len(),
                    "workspace loaded"
                );
                store.load_persisted(workspace);
            }
            None => {
                store.ensure_non_empty();
                store.normalize_session();
                store.reconcile_selection(true);
            }
        }
        store
    }

    fn normalize_value(&mut self, value: &Value) -> Option<PersistedWorkspace> {
        let now = self.now();
        let options = NormalizeOptions {
            default_file_name: &self.settings.default_file_name,
            default_file_content: &self.settings.default_file_content,
            now,
        };
        let mut seq = self.id_seq;
        let workspace = transfer::normalize_workspace(value, &options, &mut || {
            seq += 1;
            FileId::from_parts(now, seq)
        });
        self.id_seq = seq;
        workspace
    }

    fn load_persisted(&mut self, workspace: PersistedWorkspace) {
        let now = self.now();
        self.files = workspace.files;
        self.folders = workspace.folders;
        self.trash = TrashStore::new(self.trash.retention_ms()).with_entries(workspace.trash);
        self.trash.prune(now);
        self.active_file_id = workspace.active_file_id;
        self.open_file_ids = workspace.open_file_ids;
        self.selection = Selection::default();
        self.ensure_non_empty();
        self.normalize_session();
        self.reconcile_selection(true);
    }

    pub fn to_persisted(&self) -> PersistedWorkspace {
        PersistedWorkspace {
            files: self.files.clone(),
            folders: self.folders.clone(),
            active_file_id: self.active_file_id.clone(),
            open_file_ids: self.open_file_ids.clone(),
            trash: self.trash.raw_entries().to_vec(),
            saved_at: self.now(),
        }
    }

    /// Fire-and-forget write through the storage port; failures are logged only.
    pub(super) fn persist(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        let text = match serde_json::to_string(&self.to_persisted()) {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "failed to serialize workspace");
                return;
            }
        };
        if let Err(err) = storage.save(&self.settings.storage_key, &text) {
            warn!(error = %err, key = %self.settings.storage_key, "failed to persist workspace");
        }
    }

    pub fn export_workspace(&self) -> serde_json::Result<String> {
        transfer::export_workspace(&self.to_persisted(), self.now())
    }

    pub fn export_file_name(&self) -> String {
        transfer::export_file_name(self.now())
    }

    fn parse_import(&mut self, text: &str) -> Result<PersistedWorkspace> {
        let value = transfer::parse_import_text(text, self.settings.max_import_chars)?;
        self.normalize_value(&value)
            .ok_or(WorkspaceError::Import(transfer::ImportError::UnsupportedPayload))
    }

    pub fn preview_import(&mut self, text: &str) -> Result<ImportSummary> {
        self.parse_import(text).map(|workspace| ImportSummary::of(&workspace))
    }

    /// Replaces the whole workspace with the imported one, as a single undoable step.
    pub fn import_workspace(&mut self, text: &str, confirmed: bool) -> Result<ImportSummary> {
        let workspace = self.parse_import(text)?;
        if !confirmed {
            return Err(WorkspaceError::ConfirmationRequired);
        }
        let summary = ImportSummary::of(&workspace);

        let before = self.begin_capture();
        self.load_persisted(workspace);
        self.finish("Import workspace", before);
        info!(
            files = summary.files,
            folders = summary.folders,
            trash = summary.trash,
            "workspace imported"
        );
        Ok(summary)
    }
}
