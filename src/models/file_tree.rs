//! 文件树投影
//!
//! 由扁平的文件列表 + 显式空文件夹构建的只读树，每次结构变更后整体重建。
//! 树本身不是数据源，不支持增量修改。

use compact_str::CompactString;
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::{new_key_type, SlotMap};

use super::file::{FileEntry, FileId};
use super::path::{base_name, directory, path_key, split_segments, FolderPath};

new_key_type! { pub struct NodeId; }

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeFile {
    pub id: FileId,
    pub name: CompactString,
}

#[derive(Debug, Clone)]
pub struct TreeNode {
    name: CompactString,
    path: FolderPath,
    parent: Option<NodeId>,
    folders: Vec<NodeId>,
    folder_index: FxHashMap<String, NodeId>,
    files: Vec<TreeFile>,
    aggregate_count: usize,
}

impl TreeNode {
    fn new(name: CompactString, path: FolderPath, parent: Option<NodeId>) -> Self {
        Self {
            name,
            path,
            parent,
            folders: Vec::new(),
            folder_index: FxHashMap::default(),
            files: Vec::new(),
            aggregate_count: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &FolderPath {
        &self.path
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// 子文件夹，按首次出现的顺序
    pub fn folders(&self) -> &[NodeId] {
        &self.folders
    }

    pub fn files(&self) -> &[TreeFile] {
        &self.files
    }

    /// 子树内的文件总数
    pub fn aggregate_count(&self) -> usize {
        self.aggregate_count
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeRowKind {
    Folder {
        path: FolderPath,
        file_count: usize,
        expanded: bool,
    },
    File {
        id: FileId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTreeRow {
    pub depth: u16,
    pub name: CompactString,
    pub kind: TreeRowKind,
}

impl FileTreeRow {
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, TreeRowKind::Folder { .. })
    }
}

#[derive(Debug, Clone)]
pub struct WorkspaceTree {
    arena: SlotMap<NodeId, TreeNode>,
    root: NodeId,
    by_path: FxHashMap<String, NodeId>,
}

impl WorkspaceTree {
    fn empty() -> Self {
        let mut arena = SlotMap::with_key();
        let root = arena.insert(TreeNode::new(
            CompactString::default(),
            FolderPath::Root,
            None,
        ));
        Self {
            arena,
            root,
            by_path: FxHashMap::default(),
        }
    }

    pub fn build<'a>(
        files: impl IntoIterator<Item = &'a FileEntry>,
        explicit_folders: &[String],
    ) -> Self {
        let mut tree = Self::empty();

        for file in files {
            let node = tree.ensure_folder(&directory(&file.path));
            tree.arena[node].files.push(TreeFile {
                id: file.id.clone(),
                name: base_name(&file.path).into(),
            });
        }

        for folder in explicit_folders {
            if let Ok(path) = FolderPath::parse(folder) {
                tree.ensure_folder(&path);
            }
        }

        tree.compute_counts();
        tree
    }

    fn ensure_folder(&mut self, folder: &FolderPath) -> NodeId {
        let mut current = self.root;
        for segment in split_segments(folder.as_str()) {
            let key = path_key(segment);
            if let Some(&child) = self.arena[current].folder_index.get(&key) {
                current = child;
                continue;
            }

            let path = FolderPath::Folder(self.arena[current].path.join(segment));
            let path_key_full = path_key(path.as_str());
            let child = self
                .arena
                .insert(TreeNode::new(segment.into(), path, Some(current)));

            let parent = &mut self.arena[current];
            parent.folders.push(child);
            parent.folder_index.insert(key, child);
            self.by_path.insert(path_key_full, child);
            current = child;
        }
        current
    }

    fn compute_counts(&mut self) {
        let mut order = Vec::with_capacity(self.arena.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.arena[id].folders.iter().copied());
        }

        for &id in order.iter().rev() {
            let node = &self.arena[id];
            let nested: usize = node
                .folders
                .iter()
                .map(|child| self.arena[*child].aggregate_count)
                .sum();
            let total = node.files.len() + nested;
            self.arena[id].aggregate_count = total;
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.arena.get(id)
    }

    pub fn find_folder(&self, folder: &FolderPath) -> Option<&TreeNode> {
        match folder {
            FolderPath::Root => self.arena.get(self.root),
            FolderPath::Folder(path) => self
                .by_path
                .get(&path_key(path))
                .and_then(|id| self.arena.get(*id)),
        }
    }

    pub fn folder_count(&self) -> usize {
        self.arena.len() - 1
    }

    pub fn file_count(&self) -> usize {
        self.arena[self.root].aggregate_count
    }

    /// 展平为带深度的行；`collapsed` 为折叠文件夹的 `path_key`。
    /// 同一层内文件夹在前、文件在后。
    pub fn rows(&self, collapsed: &FxHashSet<String>) -> Vec<FileTreeRow> {
        enum Frame {
            Folder { id: NodeId, depth: u16 },
            Files { id: NodeId, depth: u16 },
        }

        let mut result = Vec::new();
        let mut stack = vec![Frame::Folder {
            id: self.root,
            depth: 0,
        }];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Folder { id, depth } => {
                    let Some(node) = self.arena.get(id) else {
                        continue;
                    };
                    let is_root = id == self.root;
                    let expanded = is_root || !collapsed.contains(&path_key(node.path.as_str()));
                    if !is_root {
                        result.push(FileTreeRow {
                            depth,
                            name: node.name.clone(),
                            kind: TreeRowKind::Folder {
                                path: node.path.clone(),
                                file_count: node.aggregate_count,
                                expanded,
                            },
                        });
                    }
                    if !expanded {
                        continue;
                    }

                    let child_depth = if is_root { 0 } else { depth + 1 };
                    stack.push(Frame::Files {
                        id,
                        depth: child_depth,
                    });
                    for &child in node.folders.iter().rev() {
                        stack.push(Frame::Folder {
                            id: child,
                            depth: child_depth,
                        });
                    }
                }
                Frame::Files { id, depth } => {
                    let Some(node) = self.arena.get(id) else {
                        continue;
                    };
                    result.extend(node.files.iter().map(|file| FileTreeRow {
                        depth,
                        name: file.name.clone(),
                        kind: TreeRowKind::File {
                            id: file.id.clone(),
                        },
                    }));
                }
            }
        }

        result
    }

    /// 可见文件的顺序，用于区间选择
    pub fn visible_file_ids(&self, collapsed: &FxHashSet<String>) -> Vec<FileId> {
        self.rows(collapsed)
            .into_iter()
            .filter_map(|row| match row.kind {
                TreeRowKind::File { id } => Some(id),
                TreeRowKind::Folder { .. } => None,
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/file_tree.rs"]
mod tests;
