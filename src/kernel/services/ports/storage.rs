//! Durable key-value persistence contract.

use std::io;

pub trait KeyValueStore: Send + Sync {
    fn load(&self, key: &str) -> Option<String>;

    fn save(&self, key: &str, value: &str) -> io::Result<()>;

    fn remove(&self, key: &str) -> io::Result<()>;
}
