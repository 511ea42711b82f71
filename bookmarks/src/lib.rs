//! Locally persisted bookmarks over a simple key-value storage port.

mod error;
mod storage;
mod store;

pub use error::StorageError;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{BookmarkStore, DEFAULT_BOOKMARKS_KEY};
