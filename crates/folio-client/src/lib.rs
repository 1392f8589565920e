pub mod extractor;
pub mod fetcher;

pub use extractor::HtmlExtractor;
pub use fetcher::{DEFAULT_FETCH_TIMEOUT, ReqwestFetcher};
