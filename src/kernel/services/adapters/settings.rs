//! 设置文件：`<缓存目录>/.zworkspace/setting.json`，缺失时写入默认值。

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::paths::{base_dir, missing_dir, BaseDir};
use crate::kernel::services::ports::settings::WorkspaceSettings;

const SETTINGS_DIR: &str = ".zworkspace";
const SETTINGS_FILE: &str = "setting.json";

pub fn get_settings_path() -> Option<PathBuf> {
    base_dir(BaseDir::Cache).map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

pub fn ensure_settings_file() -> io::Result<PathBuf> {
    let path = get_settings_path().ok_or_else(|| missing_dir("settings"))?;
    ensure_settings_file_at(&path)?;
    Ok(path)
}

/// Writes default settings to `path` unless a file is already there.
pub fn ensure_settings_file_at(path: &Path) -> io::Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(&WorkspaceSettings::default())
        .map_err(io::Error::other)?;
    fs::write(path, content)
}

pub fn load_settings() -> Option<WorkspaceSettings> {
    load_settings_from(&get_settings_path()?)
}

/// `None` when the file is missing or malformed; malformed files are logged.
pub fn load_settings_from(path: &Path) -> Option<WorkspaceSettings> {
    let data = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&data) {
        Ok(settings) => Some(settings),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ignoring malformed settings");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
