use common::JobsPage;

use crate::FeedError;

/// Feed endpoint the mobile app shipped with.
pub const DEFAULT_BASE_URL: &str = "https://testapi.getlokalapp.com/common/jobs";

/// Anything that can hand out numbered pages of job entries.
#[async_trait::async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<JobsPage, FeedError>;
}

/// Fetches pages over HTTP with `GET <base_url>?page=<n>`.
#[derive(Debug, Clone)]
pub struct HttpJobSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpJobSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for HttpJobSource {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl JobSource for HttpJobSource {
    async fn fetch_page(&self, page: u32) -> Result<JobsPage, FeedError> {
        tracing::debug!(url = %self.base_url, page, "fetching jobs page");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("page", page)])
            .send()
            .await
            .map_err(FeedError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let body = response
            .json::<JobsPage>()
            .await
            .map_err(FeedError::Decode)?;

        tracing::debug!(page, entries = body.results.len(), "fetched jobs page");
        Ok(body)
    }
}
