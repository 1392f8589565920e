pub mod error;
pub mod models;
pub mod summarize;
pub mod traits;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

pub use error::AppError;
pub use models::{Link, PageSummary};
pub use summarize::SummaryService;
pub use traits::{Extractor, Fetcher};
