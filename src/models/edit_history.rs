//! 工作区历史（线性撤销 / 重做栈）
//!
//! 每条记录保存变更前后的完整快照：
//! - 新记录会丢弃当前指针之后的重做尾部
//! - 超过上限时从最旧的一端淘汰
//! - 前后快照结构相等的记录直接丢弃
//! - 应用快照期间（undo/redo）不产生新记录

use std::collections::VecDeque;

use super::file::Timestamp;

/// 默认最多保留的历史条数
pub const DEFAULT_MAX_HISTORY: usize = 80;

#[derive(Clone, Debug)]
pub struct HistoryConfig {
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_HISTORY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HistoryEntry<S> {
    pub label: String,
    pub before: S,
    pub after: S,
    pub at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct HistoryStore<S> {
    entries: VecDeque<HistoryEntry<S>>,
    /// 已生效的条目数；`entries[..pointer]` 可撤销，其余可重做
    pointer: usize,
    /// 快照应用的嵌套深度
    applying: u32,
    config: HistoryConfig,
}

impl<S> Default for HistoryStore<S> {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl<S> HistoryStore<S> {
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            entries: VecDeque::new(),
            pointer: 0,
            applying: 0,
            config,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn max_entries(&self) -> usize {
        self.config.max_entries
    }

    pub fn can_undo(&self) -> bool {
        self.pointer > 0
    }

    pub fn can_redo(&self) -> bool {
        self.pointer < self.entries.len()
    }

    /// 下一次 `undo` 将回退的条目
    pub fn undo_entry(&self) -> Option<&HistoryEntry<S>> {
        self.pointer
            .checked_sub(1)
            .and_then(|idx| self.entries.get(idx))
    }

    /// 下一次 `redo` 将重放的条目
    pub fn redo_entry(&self) -> Option<&HistoryEntry<S>> {
        self.entries.get(self.pointer)
    }

    pub fn undo_label(&self) -> Option<&str> {
        self.undo_entry().map(|entry| entry.label.as_str())
    }

    pub fn redo_label(&self) -> Option<&str> {
        self.redo_entry().map(|entry| entry.label.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry<S>> {
        self.entries.iter()
    }

    pub fn is_applying(&self) -> bool {
        self.applying > 0
    }

    pub fn begin_apply(&mut self) {
        self.applying += 1;
    }

    pub fn end_apply(&mut self) {
        self.applying = self.applying.saturating_sub(1);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.pointer = 0;
    }
}

impl<S: Clone + PartialEq> HistoryStore<S> {
    /// 记录一次变更，返回是否真的写入
    pub fn record(&mut self, label: impl Into<String>, before: S, after: S, at: Timestamp) -> bool {
        if self.is_applying() || before == after {
            return false;
        }

        self.entries.truncate(self.pointer);
        self.entries.push_back(HistoryEntry {
            label: label.into(),
            before,
            after,
            at,
        });
        self.pointer += 1;

        let max = self.config.max_entries.max(1);
        while self.entries.len() > max {
            self.entries.pop_front();
            self.pointer = self.pointer.saturating_sub(1);
        }
        true
    }

    /// 指针后退一步，返回需要应用的 `before` 快照
    pub fn undo(&mut self) -> Option<S> {
        if !self.can_undo() {
            return None;
        }
        self.pointer -= 1;
        self.entries.get(self.pointer).map(|entry| entry.before.clone())
    }

    /// 指针前进一步，返回需要应用的 `after` 快照
    pub fn redo(&mut self) -> Option<S> {
        let entry = self.entries.get(self.pointer)?;
        let snapshot = entry.after.clone();
        self.pointer += 1;
        Some(snapshot)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/edit_history.rs"]
mod tests;
