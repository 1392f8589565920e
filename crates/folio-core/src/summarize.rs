use crate::error::AppError;
use crate::models::PageSummary;
use crate::traits::{Extractor, Fetcher};

/// Runs the summary pipeline: fetch → extract.
///
/// Generic over both stages so it can be exercised without real HTTP.
#[derive(Clone)]
pub struct SummaryService<F, E>
where
    F: Fetcher,
    E: Extractor,
{
    fetcher: F,
    extractor: E,
}

impl<F, E> SummaryService<F, E>
where
    F: Fetcher,
    E: Extractor,
{
    pub fn new(fetcher: F, extractor: E) -> Self {
        Self { fetcher, extractor }
    }

    /// Fetch `url` and summarize its HTML.
    ///
    /// Any fetch or extraction error is returned as-is; there are no
    /// partial summaries.
    pub async fn summarize(&self, url: &str) -> Result<PageSummary, AppError> {
        tracing::info!("Fetching {}", url);
        let html = self.fetcher.fetch(url).await?;
        tracing::info!("Fetched {} bytes of HTML", html.len());

        let summary = self.extractor.extract(&html)?;
        tracing::info!(
            headings = summary.headings.len(),
            num_links = summary.num_links,
            num_images = summary.num_images,
            "Summary complete"
        );

        Ok(summary)
    }
}
