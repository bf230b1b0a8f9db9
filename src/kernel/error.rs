use thiserror::Error;

use crate::models::{FileId, PathError};

use super::transfer::ImportError;

pub type Result<T> = std::result::Result<T, WorkspaceError>;

/// Coarse category for display (toast color, icon, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidPath,
    NotFound,
    Conflict,
    Locked,
    LastFile,
    ConfirmationRequired,
    Import,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    #[error("invalid path: {0}")]
    InvalidPath(#[from] PathError),
    #[error("file `{0}` not found")]
    FileNotFound(FileId),
    #[error("folder `{0}` does not exist")]
    FolderNotFound(String),
    #[error("folder `{0}` already exists")]
    FolderExists(String),
    #[error("a file already exists at `{0}`")]
    FileExists(String),
    #[error("cannot move `{0}` into itself")]
    MoveIntoSelf(String),
    #[error("`{0}` is already in the target folder")]
    NoOpMove(String),
    #[error("{count} locked item(s) blocked this operation")]
    Locked { count: usize },
    #[error("cannot delete the only remaining file")]
    LastFile,
    #[error("this operation requires confirmation")]
    ConfirmationRequired,
    #[error("trash entry `{0}` not found")]
    TrashEntryNotFound(FileId),
    #[error("trash is empty")]
    TrashEmpty,
    #[error("import failed: {0}")]
    Import(#[from] ImportError),
}

impl WorkspaceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WorkspaceError::InvalidPath(_) => ErrorKind::InvalidPath,
            WorkspaceError::FileNotFound(_)
            | WorkspaceError::FolderNotFound(_)
            | WorkspaceError::TrashEntryNotFound(_)
            | WorkspaceError::TrashEmpty => ErrorKind::NotFound,
            WorkspaceError::FolderExists(_)
            | WorkspaceError::FileExists(_)
            | WorkspaceError::MoveIntoSelf(_)
            | WorkspaceError::NoOpMove(_) => ErrorKind::Conflict,
            WorkspaceError::Locked { .. } => ErrorKind::Locked,
            WorkspaceError::LastFile => ErrorKind::LastFile,
            WorkspaceError::ConfirmationRequired => ErrorKind::ConfirmationRequired,
            WorkspaceError::Import(_) => ErrorKind::Import,
        }
    }
}
