use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::path::path_key;
use crate::models::FileEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// List order as stored.
    #[default]
    Manual,
    Name,
    /// `last_touched` descending.
    Recent,
}

impl SortMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "manual" => Some(Self::Manual),
            "name" => Some(Self::Name),
            "recent" => Some(Self::Recent),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Name => "name",
            Self::Recent => "recent",
        }
    }
}

/// Pinned files first, then by `mode`. Stable, so ties keep list order.
pub fn sort_files(files: &[FileEntry], mode: SortMode) -> Vec<&FileEntry> {
    let mut sorted: Vec<&FileEntry> = files.iter().collect();
    sorted.sort_by(|a, b| {
        b.pinned.cmp(&a.pinned).then_with(|| match mode {
            SortMode::Manual => Ordering::Equal,
            SortMode::Name => path_key(&a.path)
                .cmp(&path_key(&b.path))
                .then_with(|| a.path.cmp(&b.path)),
            SortMode::Recent => b.last_touched.cmp(&a.last_touched),
        })
    });
    sorted
}
