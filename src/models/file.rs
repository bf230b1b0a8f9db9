//! 文件实体

use compact_str::{format_compact, CompactString};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 毫秒级 Unix 时间戳
pub type Timestamp = u64;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(CompactString);

impl FileId {
    pub fn new(raw: impl Into<CompactString>) -> Self {
        Self(raw.into())
    }

    pub fn from_parts(stamp: Timestamp, seq: u64) -> Self {
        Self(format_compact!("f{stamp:x}-{seq:x}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub id: FileId,
    pub path: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub saved_content: String,
    #[serde(default)]
    pub last_touched: Timestamp,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub locked: bool,
}

impl FileEntry {
    /// 新建的文件视为已保存（content == saved_content）
    pub fn new(id: FileId, path: impl Into<String>, content: impl Into<String>, now: Timestamp) -> Self {
        let content = content.into();
        Self {
            id,
            path: path.into(),
            saved_content: content.clone(),
            content,
            last_touched: now,
            pinned: false,
            locked: false,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.content != self.saved_content
    }

    pub fn name(&self) -> &str {
        super::path::base_name(&self.path)
    }

    pub fn touch(&mut self, now: Timestamp) {
        self.last_touched = self.last_touched.max(now);
    }
}
