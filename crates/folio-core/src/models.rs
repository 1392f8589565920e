use serde::Serialize;

/// Headings kept in a summary.
pub const MAX_HEADINGS: usize = 10;
/// Paragraphs joined into the content snippet.
pub const MAX_PARAGRAPHS: usize = 3;
/// Links sampled into a summary.
pub const MAX_LINKS: usize = 5;
/// Image sources sampled into a summary.
pub const MAX_IMAGES: usize = 5;
/// Title used when the document has none.
pub const NO_TITLE: &str = "No title found";

/// A hyperlink found on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Trimmed anchor text
    pub text: String,
    /// Raw `href` attribute value, not resolved against the page URL
    pub href: String,
}

/// Bounded summary of a single HTML page.
///
/// `num_links` and `num_images` count every qualifying element on the page,
/// while `links` and `image_urls` only hold the first few of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub title: String,
    pub headings: Vec<String>,
    pub content_snippet: String,
    pub num_links: usize,
    pub links: Vec<Link>,
    pub num_images: usize,
    pub image_urls: Vec<String>,
}

impl PageSummary {
    /// Assemble a summary from everything collected on the page,
    /// applying the truncation limits.
    ///
    /// `title` is `None` when the page has no usable title; a present
    /// title is kept as given, even if empty. Counts are taken before
    /// truncation.
    pub fn from_collected(
        title: Option<String>,
        headings: Vec<String>,
        paragraphs: Vec<String>,
        links: Vec<Link>,
        image_urls: Vec<String>,
    ) -> Self {
        let title = title.unwrap_or_else(|| NO_TITLE.to_string());

        let num_links = links.len();
        let num_images = image_urls.len();

        Self {
            title,
            headings: headings.into_iter().take(MAX_HEADINGS).collect(),
            content_snippet: paragraphs
                .into_iter()
                .take(MAX_PARAGRAPHS)
                .collect::<Vec<_>>()
                .join(" "),
            num_links,
            links: links.into_iter().take(MAX_LINKS).collect(),
            num_images,
            image_urls: image_urls.into_iter().take(MAX_IMAGES).collect(),
        }
    }
}
