use std::io;

use super::runtime::BoxFuture;

/// Source of file bodies for batch loads (remote project, template pack, ...).
pub trait ContentSource: Send + Sync + 'static {
    fn fetch(&self, path: &str) -> BoxFuture<io::Result<String>>;
}
