use std::io;

/// Failure reading or writing the durable bookmark slot.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("could not serialize bookmarks: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("stored bookmarks are unreadable: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}
