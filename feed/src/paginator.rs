use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use common::{JobRecord, JobsPage};

use crate::{FeedError, JobSource, admit};

/// Message shown to users whenever a page fails to load.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to load jobs. Please try again.";

/// Observable paging state.
///
/// `jobs` accumulates across pages in feed order and is not deduplicated
/// by id; overlapping pages from the feed show up twice.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub page: u32,
    pub jobs: Vec<JobRecord>,
    pub exhausted: bool,
    pub loading: bool,
    pub refreshing: bool,
    pub error: Option<String>,
}

impl PageState {
    pub fn has_more(&self) -> bool {
        !self.exhausted
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: 1,
            jobs: Vec::new(),
            exhausted: false,
            loading: false,
            refreshing: false,
            error: None,
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    state: PageState,
    /// Bumped by every load; only the load holding the latest value commits.
    generation: u64,
}

/// Infinite-scroll state over a [`JobSource`].
///
/// All operations take `&self`, so a scroll-triggered [`load_more`] can
/// overlap a [`refresh`]. Each load claims a generation when it starts and
/// its result is dropped if a newer load began before it settled.
///
/// [`load_more`]: Paginator::load_more
/// [`refresh`]: Paginator::refresh
pub struct Paginator {
    source: Arc<dyn JobSource>,
    inner: Mutex<Inner>,
}

impl Paginator {
    pub fn new(source: Arc<dyn JobSource>) -> Self {
        Self {
            source,
            inner: Mutex::new(Inner::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// First load on mount.
    pub async fn load_initial(&self) {
        self.load_page(1, false).await;
    }

    /// Fetches page `page`.
    ///
    /// Page 1 and refreshes replace the list; later pages append to it. An
    /// empty page marks the feed exhausted and leaves the list alone.
    pub async fn load_page(&self, page: u32, is_refresh: bool) {
        let generation = {
            let mut inner = self.lock();
            inner.generation += 1;
            if is_refresh {
                inner.state.refreshing = true;
            } else {
                inner.state.loading = true;
            }
            inner.state.error = None;
            inner.generation
        };
        let _settle = Settle {
            paginator: self,
            generation,
        };

        let outcome = self.source.fetch_page(page).await;
        self.commit(generation, page, is_refresh, outcome);
    }

    fn commit(
        &self,
        generation: u64,
        page: u32,
        is_refresh: bool,
        outcome: Result<JobsPage, FeedError>,
    ) {
        let mut inner = self.lock();
        if inner.generation != generation {
            tracing::debug!(
                page,
                generation,
                current = inner.generation,
                "discarding superseded page load"
            );
            return;
        }

        let state = &mut inner.state;
        match outcome {
            Ok(body) => {
                let jobs = admit(body.results);
                if jobs.is_empty() {
                    tracing::info!(page, "job feed exhausted");
                    state.exhausted = true;
                    return;
                }

                tracing::debug!(page, count = jobs.len(), is_refresh, "loaded jobs");
                if page == 1 || is_refresh {
                    state.jobs = jobs;
                } else {
                    state.jobs.extend(jobs);
                }
                state.page = page;
            }
            Err(err) => {
                tracing::warn!(page, error = %err, "failed to load jobs");
                state.error = Some(FETCH_ERROR_MESSAGE.to_string());
            }
        }
    }

    /// Pull-to-refresh: forgets exhaustion and reloads page 1.
    pub async fn refresh(&self) {
        self.lock().state.exhausted = false;
        self.load_page(1, true).await;
    }

    /// Loads the page after the current one.
    ///
    /// Returns `false` without fetching when the feed is exhausted or a
    /// load or refresh is still in flight.
    pub async fn load_more(&self) -> bool {
        let next = {
            let inner = self.lock();
            let state = &inner.state;
            if state.loading || state.refreshing || state.exhausted {
                return false;
            }
            state.page + 1
        };
        self.load_page(next, false).await;
        true
    }

    pub fn snapshot(&self) -> PageState {
        self.lock().state.clone()
    }

    pub fn jobs(&self) -> Vec<JobRecord> {
        self.lock().state.jobs.clone()
    }

    pub fn page(&self) -> u32 {
        self.lock().state.page
    }

    pub fn has_more(&self) -> bool {
        self.lock().state.has_more()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().state.loading
    }

    pub fn is_refreshing(&self) -> bool {
        self.lock().state.refreshing
    }

    pub fn error(&self) -> Option<String> {
        self.lock().state.error.clone()
    }
}

/// Clears the in-flight flags when a load settles, including when its
/// future is dropped mid-fetch. A superseded load leaves them to the newer one.
struct Settle<'a> {
    paginator: &'a Paginator,
    generation: u64,
}

impl Drop for Settle<'_> {
    fn drop(&mut self) {
        let mut inner = self.paginator.lock();
        if inner.generation == self.generation {
            inner.state.loading = false;
            inner.state.refreshing = false;
        }
    }
}
