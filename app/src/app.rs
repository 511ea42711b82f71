use std::sync::Arc;

use anyhow::bail;
use bookmarks::{BookmarkStore, FileStore, KeyValueStore, MemoryStore};
use common::JobRecord;
use feed::{HttpJobSource, JobSource, Paginator};

use crate::cli::Command;
use crate::render::{BookmarksScreen, FeedScreen, JobDetails};
use crate::settings::Settings;

/// The paginator and the bookmark store, wired once per run.
pub struct App {
    paginator: Paginator,
    bookmarks: BookmarkStore,
}

impl App {
    pub async fn new(settings: &Settings, ephemeral: bool) -> Self {
        let source = Arc::new(HttpJobSource::new(settings.feed.base_url.clone()));
        let storage: Arc<dyn KeyValueStore> = if ephemeral {
            Arc::new(MemoryStore::new())
        } else {
            Arc::new(FileStore::new(&settings.storage.dir))
        };
        tracing::debug!(
            feed = %settings.feed.base_url,
            storage = %settings.storage.dir.display(),
            ephemeral,
            "starting"
        );
        Self::with_parts(source, storage, &settings.storage.bookmarks_key).await
    }

    pub async fn with_parts(
        source: Arc<dyn JobSource>,
        storage: Arc<dyn KeyValueStore>,
        bookmarks_key: &str,
    ) -> Self {
        Self {
            paginator: Paginator::new(source),
            bookmarks: BookmarkStore::open(storage, bookmarks_key).await,
        }
    }

    /// Runs one command and returns what it prints.
    pub async fn run(&self, command: Command) -> anyhow::Result<String> {
        match command {
            Command::Browse { pages } => {
                self.scroll(pages, |_| false).await;
                Ok(self.feed_screen())
            }
            Command::Refresh => {
                self.paginator.load_initial().await;
                self.paginator.refresh().await;
                Ok(self.feed_screen())
            }
            Command::Bookmarks => Ok(BookmarksScreen {
                jobs: &self.bookmarks.bookmarked_jobs(),
            }
            .to_string()),
            Command::Bookmark { id, pages } => {
                let job = self.find_job(id, pages).await?;
                let label = if self.bookmarks.toggle_bookmark(&job).await {
                    "Bookmarked"
                } else {
                    "Removed bookmark"
                };
                Ok(format!("{label}: {} (#{})\n", job.title, job.id))
            }
            Command::Show { id, pages } => {
                let job = self.find_job(id, pages).await?;
                Ok(JobDetails {
                    job: &job,
                    bookmarked: self.bookmarks.is_bookmarked(job.id),
                }
                .to_string())
            }
        }
    }

    fn feed_screen(&self) -> String {
        FeedScreen {
            state: &self.paginator.snapshot(),
            bookmarks: &self.bookmarks,
        }
        .to_string()
    }

    /// Loads page 1, then keeps scrolling until `pages` pages are in, the
    /// feed runs dry, a load fails, or `found` matches the list so far.
    async fn scroll(&self, pages: u32, found: impl Fn(&[JobRecord]) -> bool) {
        self.paginator.load_initial().await;
        let mut loaded = 1;
        while loaded < pages
            && self.paginator.error().is_none()
            && !found(&self.paginator.jobs())
            && self.paginator.load_more().await
        {
            loaded += 1;
        }
    }

    async fn find_job(&self, id: i64, pages: u32) -> anyhow::Result<JobRecord> {
        if let Some(job) = self.bookmarks.get(id) {
            return Ok(job);
        }

        self.scroll(pages, |jobs| jobs.iter().any(|job| job.id == id))
            .await;
        if let Some(job) = self.paginator.jobs().into_iter().find(|job| job.id == id) {
            return Ok(job);
        }
        if let Some(error) = self.paginator.error() {
            bail!("{error}");
        }
        bail!("job {id} not found in the first {pages} page(s) of the feed")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use common::JobsPage;
    use feed::{FETCH_ERROR_MESSAGE, FeedError};
    use reqwest::StatusCode;
    use serde_json::{Value, json};

    use super::*;

    /// Serves fixed pages; pages not listed come back empty.
    #[derive(Default)]
    struct FixedFeed {
        pages: HashMap<u32, Vec<Value>>,
        fail: bool,
        requested: Mutex<Vec<u32>>,
    }

    impl FixedFeed {
        fn with_jobs(pages: &[&[i64]]) -> Self {
            let pages = pages
                .iter()
                .enumerate()
                .map(|(i, ids)| {
                    let entries: Vec<Value> = ids
                        .iter()
                        .map(|id| json!({ "id": id, "title": format!("Job {id}"), "company_name": "Acme" }))
                        .collect();
                    (i as u32 + 1, entries)
                })
                .collect();
            Self {
                pages,
                ..Self::default()
            }
        }
    }

    #[async_trait::async_trait]
    impl JobSource for FixedFeed {
        async fn fetch_page(&self, page: u32) -> Result<JobsPage, FeedError> {
            self.requested.lock().unwrap().push(page);
            if self.fail {
                return Err(FeedError::Status(StatusCode::SERVICE_UNAVAILABLE));
            }
            Ok(JobsPage {
                results: self.pages.get(&page).cloned().unwrap_or_default(),
            })
        }
    }

    async fn app_with(feed: FixedFeed) -> (App, Arc<FixedFeed>, Arc<MemoryStore>) {
        let feed = Arc::new(feed);
        let storage = Arc::new(MemoryStore::new());
        let app = App::with_parts(feed.clone(), storage.clone(), "bookmarkedJobs").await;
        (app, feed, storage)
    }

    #[tokio::test]
    async fn test_browse_stops_at_requested_pages() {
        let (app, feed, _) = app_with(FixedFeed::with_jobs(&[&[1, 2], &[3], &[4]])).await;

        let out = app.run(Command::Browse { pages: 2 }).await.unwrap();

        assert!(out.contains("Job 3 (#3)"));
        assert!(!out.contains("Job 4"));
        assert_eq!(*feed.requested.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_browse_past_the_end_reports_end_of_feed() {
        let (app, feed, _) = app_with(FixedFeed::with_jobs(&[&[1]])).await;

        let out = app.run(Command::Browse { pages: 5 }).await.unwrap();

        assert!(out.contains("-- end of feed --"));
        assert_eq!(*feed.requested.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_browse_failure_shows_fixed_message() {
        let (app, _, _) = app_with(FixedFeed {
            fail: true,
            ..FixedFeed::default()
        })
        .await;

        let out = app.run(Command::Browse { pages: 3 }).await.unwrap();

        assert!(out.starts_with(FETCH_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_bookmark_toggles_and_persists() {
        let (app, _, storage) = app_with(FixedFeed::with_jobs(&[&[1, 2], &[3]])).await;

        let out = app
            .run(Command::Bookmark { id: 3, pages: 3 })
            .await
            .unwrap();
        assert_eq!(out, "Bookmarked: Job 3 (#3)\n");

        let raw = storage.get_item("bookmarkedJobs").await.unwrap().unwrap();
        let stored: Vec<JobRecord> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].is_bookmarked);

        let listed = app.run(Command::Bookmarks).await.unwrap();
        assert!(listed.contains("[*] Job 3 (#3)"));

        let out = app
            .run(Command::Bookmark { id: 3, pages: 3 })
            .await
            .unwrap();
        assert_eq!(out, "Removed bookmark: Job 3 (#3)\n");
    }

    #[tokio::test]
    async fn test_bookmarked_job_is_found_without_the_feed() {
        let (app, feed, _) = app_with(FixedFeed::with_jobs(&[&[7]])).await;
        app.run(Command::Bookmark { id: 7, pages: 1 }).await.unwrap();
        feed.requested.lock().unwrap().clear();

        let out = app.run(Command::Show { id: 7, pages: 1 }).await.unwrap();

        assert!(out.contains("Bookmarked: yes"));
        assert!(feed.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_job_is_an_error() {
        let (app, _, _) = app_with(FixedFeed::with_jobs(&[&[1], &[2]])).await;

        let err = app
            .run(Command::Show { id: 99, pages: 2 })
            .await
            .unwrap_err();

        assert!(err.to_string().contains("job 99 not found"));
    }

    #[tokio::test]
    async fn test_refresh_lists_first_page() {
        let (app, feed, _) = app_with(FixedFeed::with_jobs(&[&[1, 2]])).await;

        let out = app.run(Command::Refresh).await.unwrap();

        assert!(out.contains("Job 1 (#1)"));
        assert_eq!(*feed.requested.lock().unwrap(), vec![1, 1]);
    }
}
