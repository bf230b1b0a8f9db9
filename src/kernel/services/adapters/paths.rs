//! 应用目录管理
//!
//! 数据目录（日志、工作区存储）与缓存目录（设置文件）：
//! - macOS: ~/Library/Application Support/ 与 ~/Library/Caches/
//! - Windows: %APPDATA% 与 %LOCALAPPDATA%
//! - 其他: $XDG_DATA_HOME 或 ~/.local/share，$XDG_CACHE_HOME 或 ~/.cache

use std::io;
use std::path::PathBuf;

const APP_NAME: &str = "zworkspace";
const LOG_DIR: &str = "logs";
const STORAGE_DIR: &str = "storage";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BaseDir {
    Data,
    Cache,
}

fn env_dir(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// 平台基础目录（不含应用名）
pub(super) fn base_dir(kind: BaseDir) -> Option<PathBuf> {
    if cfg!(target_os = "macos") {
        let sub = match kind {
            BaseDir::Data => "Library/Application Support",
            BaseDir::Cache => "Library/Caches",
        };
        return env_dir("HOME").map(|home| home.join(sub));
    }
    if cfg!(windows) {
        return match kind {
            BaseDir::Data => env_dir("APPDATA"),
            BaseDir::Cache => env_dir("LOCALAPPDATA").or_else(|| env_dir("APPDATA")),
        };
    }

    let (xdg, fallback) = match kind {
        BaseDir::Data => ("XDG_DATA_HOME", ".local/share"),
        BaseDir::Cache => ("XDG_CACHE_HOME", ".cache"),
    };
    env_dir(xdg).or_else(|| env_dir("HOME").map(|home| home.join(fallback)))
}

pub(super) fn missing_dir(what: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("Cannot determine {what} directory"),
    )
}

/// 获取应用数据目录
pub fn get_app_data_dir() -> Option<PathBuf> {
    base_dir(BaseDir::Data).map(|dir| dir.join(APP_NAME))
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(LOG_DIR))
}

/// 工作区 JSON 按存储键各占一个文件，放在这里
pub fn get_storage_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(STORAGE_DIR))
}

fn ensure_dir(dir: Option<PathBuf>, what: &str) -> io::Result<PathBuf> {
    let dir = dir.ok_or_else(|| missing_dir(what))?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn ensure_log_dir() -> io::Result<PathBuf> {
    ensure_dir(get_log_dir(), "log")
}

pub fn ensure_storage_dir() -> io::Result<PathBuf> {
    ensure_dir(get_storage_dir(), "storage")
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/paths.rs"]
mod tests;
