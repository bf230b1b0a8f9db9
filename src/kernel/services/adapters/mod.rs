//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod content_loader;
pub mod paths;
pub mod settings;
pub mod storage;

pub use content_loader::{ContentLoader, ContentMessage};
pub use paths::{
    ensure_log_dir, ensure_storage_dir, get_app_data_dir, get_log_dir, get_storage_dir,
};
pub use settings::{
    ensure_settings_file, ensure_settings_file_at, get_settings_path, load_settings,
    load_settings_from,
};
pub use storage::{FileStorage, MemoryStorage};
