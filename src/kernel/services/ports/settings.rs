use serde::{Deserialize, Serialize};

use crate::kernel::sort::SortMode;
use crate::models::{DAY_MS, DEFAULT_FILE_NAME, DEFAULT_MAX_HISTORY, DEFAULT_RETENTION_DAYS};

pub const DEFAULT_STORAGE_KEY: &str = "zworkspace.files.v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSettings {
    #[serde(default = "default_max_history")]
    pub max_history: usize,
    #[serde(default = "default_trash_retention_days")]
    pub trash_retention_days: u64,
    #[serde(default = "default_file_name")]
    pub default_file_name: String,
    #[serde(default)]
    pub default_file_content: String,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default)]
    pub sort_mode: SortMode,
    /// 0 disables the limit.
    #[serde(default)]
    pub max_import_chars: usize,
}

fn default_max_history() -> usize {
    DEFAULT_MAX_HISTORY
}

fn default_trash_retention_days() -> u64 {
    DEFAULT_RETENTION_DAYS
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            max_history: default_max_history(),
            trash_retention_days: default_trash_retention_days(),
            default_file_name: default_file_name(),
            default_file_content: String::new(),
            storage_key: default_storage_key(),
            sort_mode: SortMode::default(),
            max_import_chars: 0,
        }
    }
}

impl WorkspaceSettings {
    pub fn trash_retention_ms(&self) -> u64 {
        self.trash_retention_days.saturating_mul(DAY_MS)
    }
}
