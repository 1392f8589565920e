use folio_client::{HtmlExtractor, ReqwestFetcher};
use folio_core::{AppError, SummaryService};

use crate::config::ServerConfig;

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
///
/// Everything in here is immutable after startup.
pub struct AppState {
    pub service: SummaryService<ReqwestFetcher, HtmlExtractor>,
}

impl AppState {
    /// Build the fetch → extract pipeline from server configuration.
    pub fn from_config(config: &ServerConfig) -> Result<Self, AppError> {
        let fetcher = ReqwestFetcher::with_timeout(config.fetch_timeout)?;
        let fetcher = if config.block_private_urls {
            fetcher.block_private_urls()
        } else {
            fetcher
        };

        Ok(Self {
            service: SummaryService::new(fetcher, HtmlExtractor::new()?),
        })
    }
}
