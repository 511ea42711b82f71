use reqwest::StatusCode;

/// A page could not be fetched. Always surfaced to users as
/// [`FETCH_ERROR_MESSAGE`](crate::FETCH_ERROR_MESSAGE).
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("feed responded with status {0}")]
    Status(StatusCode),
    #[error("could not decode feed response: {0}")]
    Decode(#[source] reqwest::Error),
}
