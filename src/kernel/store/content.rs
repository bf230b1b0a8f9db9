use tracing::{debug, warn};

use crate::kernel::error::Result;
use crate::models::FileId;

/// One batch of bodies to fetch. Only the newest ticket may be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRequest {
    pub ticket: u64,
    /// `(id, path)` pairs.
    pub items: Vec<(FileId, String)>,
}

impl super::WorkspaceStore {
    pub fn active_content(&self) -> &str {
        self.active_file().map(|f| f.content.as_str()).unwrap_or_default()
    }

    /// Editor edits are not history-tracked.
    pub fn set_active_content(&mut self, text: &str) {
        let id = self.active_file_id.clone();
        if let Err(err) = self.update_content(&id, text) {
            warn!(id = %id, error = %err, "active content edit dropped");
        }
    }

    pub fn update_content(&mut self, id: &FileId, text: &str) -> Result<()> {
        let idx = self.require_file(id)?;
        if self.files[idx].content == text {
            return Ok(());
        }
        let now = self.now();
        let file = &mut self.files[idx];
        file.content = text.to_string();
        file.touch(now);
        self.persist();
        Ok(())
    }

    /// Marks the file's current content as saved. Returns whether it was dirty.
    pub fn save_file(&mut self, id: &FileId) -> Result<bool> {
        let idx = self.require_file(id)?;
        let file = &mut self.files[idx];
        if !file.is_dirty() {
            return Ok(false);
        }
        file.saved_content = file.content.clone();
        self.persist();
        Ok(true)
    }

    pub fn save_all(&mut self) -> usize {
        let mut saved = 0;
        for file in self.files.iter_mut().filter(|f| f.is_dirty()) {
            file.saved_content = file.content.clone();
            saved += 1;
        }
        if saved > 0 {
            self.persist();
        }
        saved
    }

    /// Issues a new ticket for loading `ids`; any earlier outstanding batch becomes stale.
    pub fn begin_content_load(&mut self, ids: &[FileId]) -> ContentRequest {
        let ticket = self.content_generation.issue();
        let items = ids
            .iter()
            .filter_map(|id| self.file(id).map(|f| (f.id.clone(), f.path.clone())))
            .collect();
        ContentRequest { ticket, items }
    }

    /// Applies loaded bodies as the saved baseline. Stale tickets are ignored.
    pub fn apply_content_batch(&mut self, ticket: u64, contents: Vec<(FileId, String)>) -> bool {
        if !self.content_generation.is_latest(ticket) {
            debug!(
                ticket,
                latest = self.content_generation.latest(),
                "stale content batch dropped"
            );
            return false;
        }
        let mut applied = 0usize;
        for (id, text) in contents {
            let Some(idx) = self.index_of(&id) else {
                continue;
            };
            let file = &mut self.files[idx];
            file.saved_content = text.clone();
            file.content = text;
            applied += 1;
        }
        debug!(ticket, applied, "content batch applied");
        if applied > 0 {
            self.persist();
        }
        true
    }
}
