//! Service ports: traits + data contracts.

pub mod clock;
pub mod content;
pub mod runtime;
pub mod settings;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use content::ContentSource;
pub use runtime::{AsyncExecutor, BoxFuture};
pub use settings::{WorkspaceSettings, DEFAULT_STORAGE_KEY};
pub use storage::KeyValueStore;
