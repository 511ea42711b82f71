use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use common::JobRecord;

use crate::{KeyValueStore, StorageError};

/// Storage key the mobile app kept its bookmarks under.
pub const DEFAULT_BOOKMARKS_KEY: &str = "bookmarkedJobs";

/// In-memory bookmark set mirrored into a single storage slot.
///
/// Construct one per process and hand it to whatever needs it. Records
/// are unique by id and kept in the order they were bookmarked.
pub struct BookmarkStore {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    bookmarks: RwLock<Vec<JobRecord>>,
    loading: AtomicBool,
}

impl BookmarkStore {
    /// Empty store that still has to [`load`](Self::load) from storage.
    pub fn new(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            bookmarks: RwLock::new(Vec::new()),
            loading: AtomicBool::new(true),
        }
    }

    /// Creates the store and loads whatever was persisted.
    pub async fn open(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let store = Self::new(storage, key);
        store.load().await;
        store
    }

    /// Replaces the in-memory set with the persisted one.
    ///
    /// A missing slot leaves the set as it is. Read or parse failures are
    /// logged and leave it empty. `is_loading` turns false either way.
    pub async fn load(&self) {
        match self.read().await {
            Ok(Some(stored)) => {
                tracing::info!(count = stored.len(), key = %self.key, "loaded bookmarks");
                *self.write_lock() = stored;
            }
            Ok(None) => tracing::debug!(key = %self.key, "no stored bookmarks"),
            Err(err) => {
                tracing::error!(key = %self.key, error = %err, "failed to load bookmarks");
                self.write_lock().clear();
            }
        }
        self.loading.store(false, Ordering::Release);
    }

    async fn read(&self) -> Result<Option<Vec<JobRecord>>, StorageError> {
        let Some(raw) = self.storage.get_item(&self.key).await? else {
            return Ok(None);
        };
        let parsed: Vec<JobRecord> = serde_json::from_str(&raw).map_err(StorageError::Parse)?;
        Ok(Some(dedup_by_id(parsed)))
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    pub fn is_bookmarked(&self, id: i64) -> bool {
        self.read_lock().iter().any(|job| job.id == id)
    }

    /// Adds `job` if it is not bookmarked yet, removes it otherwise, then
    /// persists the whole set. Returns whether `job` is bookmarked afterwards.
    ///
    /// A failed write is logged and the in-memory change is kept.
    pub async fn toggle_bookmark(&self, job: &JobRecord) -> bool {
        let (snapshot, bookmarked) = {
            let mut bookmarks = self.write_lock();
            let bookmarked = if let Some(pos) = bookmarks.iter().position(|b| b.id == job.id) {
                bookmarks.remove(pos);
                false
            } else {
                let mut copy = job.clone();
                copy.is_bookmarked = true;
                bookmarks.push(copy);
                true
            };
            (bookmarks.clone(), bookmarked)
        };
        tracing::debug!(id = job.id, bookmarked, count = snapshot.len(), "toggled bookmark");

        if let Err(err) = self.save(&snapshot).await {
            tracing::error!(key = %self.key, error = %err, "failed to save bookmarks");
        }
        bookmarked
    }

    async fn save(&self, bookmarks: &[JobRecord]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(bookmarks).map_err(StorageError::Serialize)?;
        self.storage.set_item(&self.key, &raw).await
    }

    pub fn bookmarked_jobs(&self) -> Vec<JobRecord> {
        self.read_lock().clone()
    }

    pub fn get(&self, id: i64) -> Option<JobRecord> {
        self.read_lock().iter().find(|job| job.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read_lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_lock().is_empty()
    }

    fn read_lock(&self) -> std::sync::RwLockReadGuard<'_, Vec<JobRecord>> {
        self.bookmarks.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, Vec<JobRecord>> {
        self.bookmarks.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn dedup_by_id(jobs: Vec<JobRecord>) -> Vec<JobRecord> {
    let mut seen = HashSet::with_capacity(jobs.len());
    let total = jobs.len();
    let unique: Vec<JobRecord> = jobs.into_iter().filter(|job| seen.insert(job.id)).collect();
    if unique.len() != total {
        tracing::warn!(dropped = total - unique.len(), "stored bookmarks contained duplicate ids");
    }
    unique
}
