//! 选择模型：文件 / 文件夹多选 + 区间选择锚点

use rustc_hash::FxHashSet;

use super::file::FileId;
use super::path::{is_same_or_descendant, path_key, strip_folder_prefix};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    files: FxHashSet<FileId>,
    folders: FxHashSet<String>,
    anchor: Option<FileId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &FxHashSet<FileId> {
        &self.files
    }

    pub fn folders(&self) -> &FxHashSet<String> {
        &self.folders
    }

    pub fn anchor(&self) -> Option<&FileId> {
        self.anchor.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.folders.is_empty()
    }

    pub fn contains_file(&self, id: &FileId) -> bool {
        self.files.contains(id)
    }

    pub fn contains_folder(&self, path: &str) -> bool {
        let key = path_key(path);
        self.folders.iter().any(|p| path_key(p) == key)
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.folders.clear();
        self.anchor = None;
    }

    pub fn set_single_file(&mut self, id: FileId) {
        self.folders.clear();
        self.files.clear();
        self.files.insert(id.clone());
        self.anchor = Some(id);
    }

    pub fn set_single_folder(&mut self, path: &str) {
        self.files.clear();
        self.folders.clear();
        self.folders.insert(path.to_string());
    }

    pub fn toggle_file(&mut self, id: FileId) {
        if !self.files.remove(&id) {
            self.files.insert(id.clone());
        }
        self.anchor = Some(id);
    }

    pub fn toggle_folder(&mut self, path: &str) {
        let key = path_key(path);
        let before = self.folders.len();
        self.folders.retain(|p| path_key(p) != key);
        if self.folders.len() == before {
            self.folders.insert(path.to_string());
        }
    }

    /// 从锚点到 `target` 的闭区间；锚点或目标不在列表中时退化为单选
    pub fn range_to(&mut self, target: FileId, ordered_visible: &[FileId]) {
        let target_idx = ordered_visible.iter().position(|id| *id == target);
        let anchor_idx = self
            .anchor
            .as_ref()
            .and_then(|anchor| ordered_visible.iter().position(|id| id == anchor));

        let (Some(target_idx), Some(anchor_idx)) = (target_idx, anchor_idx) else {
            self.set_single_file(target);
            return;
        };

        let (start, end) = if anchor_idx <= target_idx {
            (anchor_idx, target_idx)
        } else {
            (target_idx, anchor_idx)
        };
        self.folders.clear();
        self.files = ordered_visible[start..=end].iter().cloned().collect();
    }

    pub fn select_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a FileId>) {
        self.folders.clear();
        self.files = ids.into_iter().cloned().collect();
        if self.anchor.as_ref().is_some_and(|a| !self.files.contains(a)) {
            self.anchor = None;
        }
    }

    /// 丢弃已不存在的实体；`ensure_one` 且结果为空时选中当前活动文件
    pub fn reconcile(
        &mut self,
        valid_files: &FxHashSet<FileId>,
        valid_folder_keys: &FxHashSet<String>,
        ensure_one: bool,
        active: Option<&FileId>,
    ) {
        self.files.retain(|id| valid_files.contains(id));
        self.folders
            .retain(|path| valid_folder_keys.contains(&path_key(path)));
        if self
            .anchor
            .as_ref()
            .is_some_and(|anchor| !valid_files.contains(anchor))
        {
            self.anchor = None;
        }

        if ensure_one && self.is_empty() {
            if let Some(active) = active.filter(|id| valid_files.contains(*id)) {
                self.files.insert(active.clone());
                self.anchor = Some(active.clone());
            }
        }
    }

    /// 去掉被已选祖先覆盖的子文件夹，保证批量操作每棵子树只处理一次
    pub fn pruned_folder_selection(&self) -> Vec<String> {
        prune_nested_folders(self.folders.iter().map(String::as_str))
    }

    pub fn rename_folder_prefix(&mut self, from: &str, to: &str) {
        self.folders = self
            .folders
            .drain()
            .map(|path| {
                if let Some(rest) = strip_folder_prefix(&path, from) {
                    return format!("{to}/{rest}");
                }
                if path_key(&path) == path_key(from) {
                    to.to_string()
                } else {
                    path
                }
            })
            .collect();
    }
}

/// 排序后去掉嵌套路径，结果按路径排序
pub fn prune_nested_folders<'a>(paths: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut sorted: Vec<&str> = paths.into_iter().collect();
    sorted.sort_by_key(|p| path_key(p));
    sorted.dedup_by(|a, b| path_key(*a) == path_key(*b));

    let mut kept: Vec<String> = Vec::new();
    for path in sorted {
        if kept
            .iter()
            .any(|ancestor| is_same_or_descendant(path, ancestor))
        {
            continue;
        }
        kept.push(path.to_string());
    }
    kept
}

#[cfg(test)]
#[path = "../../tests/unit/models/selection.rs"]
mod tests;
