//! 回收站：软删除文件的归档，超过保留期后惰性清除

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::file::{FileEntry, FileId, Timestamp};
use super::path::{path_key, unique_path};

pub const DAY_MS: u64 = 24 * 60 * 60 * 1000;
pub const DEFAULT_RETENTION_DAYS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrashEntry {
    #[serde(flatten)]
    pub file: FileEntry,
    pub deleted_at: Timestamp,
}

impl TrashEntry {
    pub fn id(&self) -> &FileId {
        &self.file.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrashStore {
    /// 最近删除的在前
    entries: Vec<TrashEntry>,
    retention_ms: u64,
}

impl Default for TrashStore {
    fn default() -> Self {
        Self::new(DEFAULT_RETENTION_DAYS * DAY_MS)
    }
}

impl TrashStore {
    pub fn new(retention_ms: u64) -> Self {
        Self {
            entries: Vec::new(),
            retention_ms,
        }
    }

    pub fn with_entries(mut self, entries: Vec<TrashEntry>) -> Self {
        self.entries = entries;
        self.entries
            .sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
        self
    }

    pub fn retention_ms(&self) -> u64 {
        self.retention_ms
    }

    pub fn set_retention_ms(&mut self, retention_ms: u64) {
        self.retention_ms = retention_ms;
    }

    pub fn push(&mut self, files: Vec<FileEntry>, now: Timestamp) {
        if files.is_empty() {
            return;
        }
        let ids: FxHashSet<&FileId> = files.iter().map(|f| &f.id).collect();
        self.entries.retain(|entry| !ids.contains(&entry.file.id));

        let fresh: Vec<TrashEntry> = files
            .into_iter()
            .map(|file| TrashEntry {
                file,
                deleted_at: now,
            })
            .collect();
        self.entries.splice(0..0, fresh);
    }

    /// 删除超过保留期的条目，返回删除数量
    pub fn prune(&mut self, now: Timestamp) -> usize {
        let before = self.entries.len();
        let retention = self.retention_ms;
        self.entries
            .retain(|entry| now.saturating_sub(entry.deleted_at) <= retention);
        before - self.entries.len()
    }

    pub fn entries(&mut self, now: Timestamp) -> &[TrashEntry] {
        self.prune(now);
        &self.entries
    }

    pub fn len(&mut self, now: Timestamp) -> usize {
        self.prune(now);
        self.entries.len()
    }

    pub fn is_empty(&mut self, now: Timestamp) -> bool {
        self.len(now) == 0
    }

    /// 最近一次删除批次（共享最新 `deleted_at` 的条目）
    pub fn latest_batch(&mut self, now: Timestamp) -> Vec<FileId> {
        self.prune(now);
        let Some(newest) = self.entries.first().map(|e| e.deleted_at) else {
            return Vec::new();
        };
        self.entries
            .iter()
            .take_while(|entry| entry.deleted_at == newest)
            .map(|entry| entry.file.id.clone())
            .collect()
    }

    /// 取出条目并生成可恢复的文件：路径与现有文件冲突时改名，
    /// id 冲突时用 `mint_id` 生成新 id。插入工作区由调用方负责。
    pub fn restore(
        &mut self,
        entry_id: &FileId,
        now: Timestamp,
        live_path_keys: &FxHashSet<String>,
        live_ids: &FxHashSet<FileId>,
        mint_id: impl FnOnce() -> FileId,
    ) -> Option<FileEntry> {
        self.prune(now);
        let index = self.entries.iter().position(|e| &e.file.id == entry_id)?;
        let TrashEntry { mut file, .. } = self.entries.remove(index);

        file.path = unique_path(&file.path, |candidate| {
            live_path_keys.contains(&path_key(candidate))
        });
        if live_ids.contains(&file.id) {
            file.id = mint_id();
        }
        file.touch(now);
        Some(file)
    }

    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    /// 快照用：不做清理的只读视图
    pub fn raw_entries(&self) -> &[TrashEntry] {
        &self.entries
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/trash.rs"]
mod tests;
