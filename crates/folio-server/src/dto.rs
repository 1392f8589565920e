use serde::{Deserialize, Serialize};

use folio_core::AppError;
use folio_core::models::{Link, PageSummary};

/// Message returned for any request body that does not carry a usable URL.
pub const INVALID_URL_MESSAGE: &str = "Please provide a valid URL in the request body.";

// ---------------------------------------------------------------------------
// Scrape
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    /// Page to summarize
    pub url: String,
}

impl ScrapeRequest {
    /// The URL to fetch, rejecting blank values before any network call.
    pub fn validated_url(&self) -> Result<&str, AppError> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(AppError::ValidationError(INVALID_URL_MESSAGE.to_string()));
        }
        Ok(url)
    }
}

#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub text: String,
    pub href: String,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            text: link.text,
            href: link.href,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScrapeResponse {
    pub title: String,
    pub headings: Vec<String>,
    pub content_snippet: String,
    pub num_links: usize,
    pub links: Vec<LinkResponse>,
    pub num_images: usize,
    pub image_urls: Vec<String>,
}

impl From<PageSummary> for ScrapeResponse {
    fn from(s: PageSummary) -> Self {
        Self {
            title: s.title,
            headings: s.headings,
            content_snippet: s.content_snippet,
            num_links: s.num_links,
            links: s.links.into_iter().map(LinkResponse::from).collect(),
            num_images: s.num_images,
            image_urls: s.image_urls,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
