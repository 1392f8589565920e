use std::future::Future;

use crate::error::AppError;
use crate::models::PageSummary;

/// Fetches raw HTML content from a URL.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Turns raw HTML into a bounded page summary. Must not perform I/O.
pub trait Extractor: Send + Sync + Clone {
    fn extract(&self, html: &str) -> Result<PageSummary, AppError>;
}
