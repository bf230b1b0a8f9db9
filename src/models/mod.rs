//! 数据模型层

pub mod edit_history;
pub mod file;
pub mod file_tree;
pub mod path;
pub mod selection;
pub mod trash;

pub use edit_history::{HistoryConfig, HistoryEntry, HistoryStore, DEFAULT_MAX_HISTORY};
pub use file::{FileEntry, FileId, Timestamp};
pub use file_tree::{FileTreeRow, NodeId, TreeFile, TreeNode, TreeRowKind, WorkspaceTree};
pub use path::{FolderPath, PathError, DEFAULT_FILE_NAME};
pub use selection::{prune_nested_folders, Selection};
pub use trash::{TrashEntry, TrashStore, DAY_MS, DEFAULT_RETENTION_DAYS};
