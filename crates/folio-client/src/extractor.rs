use std::sync::Arc;

use folio_core::error::AppError;
use folio_core::models::{Link, PageSummary};
use folio_core::traits::Extractor;
use scraper::{ElementRef, Html, Selector};

/// CSS selectors used to walk a document, compiled once.
struct Selectors {
    title: Selector,
    headings: Selector,
    paragraphs: Selector,
    links: Selector,
    images: Selector,
}

impl Selectors {
    fn compile() -> Result<Self, AppError> {
        Ok(Self {
            title: compile("title")?,
            // The parser lower-cases tag names, so this also covers <H1> etc.
            headings: compile("h1, h2, h3, h4, h5, h6")?,
            paragraphs: compile("p")?,
            links: compile("a[href]")?,
            images: compile("img[src]")?,
        })
    }
}

fn compile(css: &str) -> Result<Selector, AppError> {
    Selector::parse(css)
        .map_err(|e| AppError::ParseError(format!("invalid selector '{css}': {e}")))
}

/// Descendant text concatenated as-is, outer whitespace trimmed.
fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// HTML summary extractor built on `scraper` (html5ever).
///
/// Parsing is error-recovering: fragments without `<html>`/`<body>` and
/// sloppy markup produce a tree just like a browser would.
pub struct HtmlExtractor {
    selectors: Arc<Selectors>,
}

impl Clone for HtmlExtractor {
    fn clone(&self) -> Self {
        Self {
            selectors: Arc::clone(&self.selectors),
        }
    }
}

impl HtmlExtractor {
    pub fn new() -> Result<Self, AppError> {
        Ok(Self {
            selectors: Arc::new(Selectors::compile()?),
        })
    }
}

impl Extractor for HtmlExtractor {
    fn extract(&self, html: &str) -> Result<PageSummary, AppError> {
        let document = Html::parse_document(html);
        if !document.errors.is_empty() {
            tracing::debug!(
                count = document.errors.len(),
                "Recovered from HTML parse errors"
            );
        }

        let sel = &self.selectors;

        // A title with no text at all counts as missing; whitespace-only
        // text still trims down to "".
        let title = document
            .select(&sel.title)
            .next()
            .map(|t| t.text().collect::<String>())
            .filter(|raw| !raw.is_empty())
            .map(|raw| raw.trim().to_string());

        let headings = document.select(&sel.headings).map(trimmed_text).collect();

        let paragraphs = document.select(&sel.paragraphs).map(trimmed_text).collect();

        let links = document
            .select(&sel.links)
            .filter_map(|a| {
                a.value().attr("href").map(|href| Link {
                    text: trimmed_text(a),
                    href: href.to_string(),
                })
            })
            .collect();

        let image_urls = document
            .select(&sel.images)
            .filter_map(|img| img.value().attr("src"))
            .map(str::to_string)
            .collect();

        Ok(PageSummary::from_collected(
            title, headings, paragraphs, links, image_urls,
        ))
    }
}
