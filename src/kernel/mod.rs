//! Headless workspace core (state + operations).

pub mod error;
pub mod generation;
pub mod services;
pub mod snapshot;
pub mod sort;
pub mod store;
pub mod transfer;

pub use error::{ErrorKind, Result, WorkspaceError};
pub use generation::RequestGeneration;
pub use snapshot::{PersistedWorkspace, WorkspaceSnapshot};
pub use sort::{sort_files, SortMode};
pub use store::{ContentRequest, DeleteOutcome, ImportSummary, MoveOutcome, WorkspaceStore};
pub use transfer::ImportError;
