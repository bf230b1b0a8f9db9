//! 路径规范化
//!
//! 工作区内的路径都是相对路径，使用正斜杠分隔，不含空段。
//! 文件夹引用使用 `FolderPath`：根目录是 `FolderPath::Root`，
//! 无效输入一律返回 `PathError`，空字符串不再兼任“根目录”。

use std::fmt;

use thiserror::Error;

pub const DEFAULT_FILE_NAME: &str = "main.js";
const DEFAULT_EXTENSION: &str = ".js";
const FORBIDDEN_CHARS: [char; 7] = [':', '*', '?', '"', '<', '>', '|'];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,
    #[error("path contains an empty segment")]
    EmptySegment,
    #[error("`{0}` is not a valid name")]
    DotSegment(String),
    #[error("`{segment}` contains the forbidden character `{ch}`")]
    ForbiddenChar { segment: String, ch: char },
}

/// 文件夹引用：根目录或某个已规范化的文件夹路径
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FolderPath {
    Root,
    Folder(String),
}

impl FolderPath {
    /// 解析用户输入的文件夹路径。空输入是错误，不会被当作根目录。
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        let segments = split_segments(raw);
        validate_segments(&segments)?;
        Ok(FolderPath::Folder(join_segments(&segments)))
    }

    pub fn is_root(&self) -> bool {
        matches!(self, FolderPath::Root)
    }

    pub fn as_str(&self) -> &str {
        match self {
            FolderPath::Root => "",
            FolderPath::Folder(path) => path,
        }
    }

    pub fn name(&self) -> &str {
        base_name(self.as_str())
    }

    pub fn join(&self, leaf: &str) -> String {
        match self {
            FolderPath::Root => leaf.to_string(),
            FolderPath::Folder(path) => format!("{path}/{leaf}"),
        }
    }

    /// `path` 是否位于此文件夹之下（任意深度）
    pub fn contains(&self, path: &str) -> bool {
        match self {
            FolderPath::Root => true,
            FolderPath::Folder(folder) => strip_folder_prefix(path, folder).is_some(),
        }
    }

    pub fn parent(&self) -> FolderPath {
        match self {
            FolderPath::Root => FolderPath::Root,
            FolderPath::Folder(path) => parent_folder(path),
        }
    }
}

impl fmt::Display for FolderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FolderPath::Root => write!(f, "/"),
            FolderPath::Folder(path) => write!(f, "{path}"),
        }
    }
}

/// 按 `/` 或 `\` 切分，去掉每段首尾空白并丢弃空段
pub fn split_segments(path: &str) -> Vec<&str> {
    path.split(['/', '\\'])
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

pub fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    let mut out = String::new();
    for segment in segments {
        let segment = segment.as_ref().trim();
        if segment.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(segment);
    }
    out
}

pub fn base_name(path: &str) -> &str {
    split_segments(path).pop().unwrap_or("")
}

pub fn directory(path: &str) -> FolderPath {
    let mut segments = split_segments(path);
    if segments.len() <= 1 {
        return FolderPath::Root;
    }
    segments.pop();
    FolderPath::Folder(join_segments(&segments))
}

pub fn parent_folder(folder: &str) -> FolderPath {
    directory(folder)
}

/// 拆分叶子名的扩展名。前导点（`.env`）和结尾点（`a.`）都不算扩展名。
pub fn split_leaf_extension(leaf: &str) -> (&str, &str) {
    let leaf = leaf.trim();
    match leaf.rfind('.') {
        Some(dot) if dot > 0 && dot < leaf.len() - 1 => (&leaf[..dot], &leaf[dot..]),
        _ => (leaf, ""),
    }
}

/// `foo.js.js` -> `foo.js`，大小写不敏感，可重复折叠
pub fn collapse_duplicate_extension(path: &str) -> String {
    let mut segments = split_segments(path);
    let Some(mut leaf) = segments.pop() else {
        return String::new();
    };
    let (_, extension) = split_leaf_extension(leaf);
    if !extension.is_empty() {
        // 与 path_key 使用同一种大小写折叠
        let n = extension.len();
        let ext_key = path_key(extension);
        while let Some(prev) = leaf.len().checked_sub(2 * n) {
            let cut = leaf.len() - n;
            if !leaf.is_char_boundary(prev) || !leaf.is_char_boundary(cut) {
                break;
            }
            if path_key(&leaf[prev..cut]) != ext_key || path_key(&leaf[cut..]) != ext_key {
                break;
            }
            leaf = &leaf[..cut];
        }
    }
    segments.push(leaf);
    join_segments(&segments)
}

pub fn fallback_extension(fallback: &str) -> String {
    let (_, extension) = split_leaf_extension(base_name(fallback));
    if extension.is_empty() {
        DEFAULT_EXTENSION.to_string()
    } else {
        extension.to_string()
    }
}

/// 规范化文件路径；叶子名没有扩展名时补上 fallback 的扩展名
pub fn normalize_file_name(raw: &str, fallback: &str) -> String {
    let fallback = match fallback.trim() {
        "" => DEFAULT_FILE_NAME,
        trimmed => trimmed,
    };
    let extension = fallback_extension(fallback);

    let mut segments = split_segments(raw);
    if segments.is_empty() {
        segments = split_segments(fallback);
    }
    let Some(leaf) = segments.pop() else {
        return format!("main{extension}");
    };

    let mut owned: Vec<String> = segments.into_iter().map(str::to_string).collect();
    let (_, leaf_ext) = split_leaf_extension(leaf);
    if leaf_ext.is_empty() {
        owned.push(format!("{leaf}{extension}"));
    } else {
        owned.push(leaf.to_string());
    }
    collapse_duplicate_extension(&join_segments(&owned))
}

/// 不补扩展名的规范化（文件夹名等）
pub fn normalize_loose_name(raw: &str, fallback: &str) -> String {
    let joined = join_segments(&split_segments(raw));
    if !joined.is_empty() {
        return collapse_duplicate_extension(&joined);
    }
    let joined = join_segments(&split_segments(fallback));
    if joined.is_empty() {
        return "untitled".to_string();
    }
    collapse_duplicate_extension(&joined)
}

pub fn validate_segments<S: AsRef<str>>(segments: &[S]) -> Result<(), PathError> {
    if segments.is_empty() {
        return Err(PathError::Empty);
    }
    for segment in segments {
        let segment = segment.as_ref().trim();
        if segment.is_empty() {
            return Err(PathError::EmptySegment);
        }
        if segment == "." || segment == ".." {
            return Err(PathError::DotSegment(segment.to_string()));
        }
        if let Some(ch) = segment.chars().find(|ch| FORBIDDEN_CHARS.contains(ch)) {
            return Err(PathError::ForbiddenChar {
                segment: segment.to_string(),
                ch,
            });
        }
    }
    Ok(())
}

pub fn validate_path(path: &str) -> Result<(), PathError> {
    validate_segments(&split_segments(path))
}

/// 大小写不敏感比较用的键
pub fn path_key(path: &str) -> String {
    path.to_lowercase()
}

pub fn paths_equal(a: &str, b: &str) -> bool {
    a == b || path_key(a) == path_key(b)
}

/// 若 `path` 位于 `folder/` 之下，返回其相对后缀
pub fn strip_folder_prefix<'a>(path: &'a str, folder: &str) -> Option<&'a str> {
    let n = folder.len();
    if n == 0 || path.len() <= n + 1 || !path.is_char_boundary(n) {
        return None;
    }
    if path.as_bytes()[n] != b'/' || !paths_equal(&path[..n], folder) {
        return None;
    }
    Some(&path[n + 1..])
}

pub fn is_same_or_descendant(path: &str, ancestor: &str) -> bool {
    paths_equal(path, ancestor) || strip_folder_prefix(path, ancestor).is_some()
}

/// 在叶子名的扩展名前追加 ` (2)`、` (3)`……直到 `is_taken` 返回 false
pub fn unique_path(desired: &str, is_taken: impl Fn(&str) -> bool) -> String {
    if !is_taken(desired) {
        return desired.to_string();
    }
    let dir = directory(desired);
    let (stem, extension) = split_leaf_extension(base_name(desired));
    let mut n: u32 = 2;
    loop {
        let candidate = dir.join(&format!("{stem} ({n}){extension}"));
        if !is_taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// 文件夹版本：整个叶子名后追加 ` (n)`，不拆扩展名
pub fn unique_folder_path(desired: &str, is_taken: impl Fn(&str) -> bool) -> String {
    if !is_taken(desired) {
        return desired.to_string();
    }
    let dir = directory(desired);
    let leaf = base_name(desired);
    let mut n: u32 = 2;
    loop {
        let candidate = dir.join(&format!("{leaf} ({n})"));
        if !is_taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/path.rs"]
mod tests;
