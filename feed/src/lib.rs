//! Remote job feed access and the infinite-scroll paginator built on it.

mod admission;
mod error;
mod paginator;
mod source;

pub use admission::{InvalidRecord, admit};
pub use error::FeedError;
pub use paginator::{FETCH_ERROR_MESSAGE, PageState, Paginator};
pub use source::{DEFAULT_BASE_URL, HttpJobSource, JobSource};
