//! HTML content extraction
//!
//! Turns one fetched page into an [`ExtractedPage`]: title, description,
//! Markdown body and resolved image URLs.

use htmd::HtmlToMarkdown;
use url::Url;

use super::document::Document;
use super::images::resolve_images;
use super::types::{ExtractError, ExtractedPage};

/// Elements whose content is never readable text
pub const NON_CONTENT_TAGS: [&str; 3] = ["script", "style", "noscript"];

/// Content regions in order of preference
pub const CONTENT_SELECTORS: [&str; 3] = ["main", "article", "body"];

/// Heading used when a page has no title
pub const UNTITLED_PLACEHOLDER: &str = "No Title";

const DESCRIPTION_SELECTOR: &str = r#"meta[name="description"]"#;

/// Extracts readable content and images from raw markup
#[derive(Debug, Clone)]
pub struct PageExtractor {
    skip_tags: Vec<&'static str>,
}

impl PageExtractor {
    pub fn new() -> Self {
        Self {
            skip_tags: NON_CONTENT_TAGS.to_vec(),
        }
    }

    /// Extract a page from `markup` fetched from `base_url`
    ///
    /// Relative image references resolve against `base_url`.
    pub fn extract(&self, markup: &str, base_url: &Url) -> Result<ExtractedPage, ExtractError> {
        let mut document = Document::parse(markup)?;
        document.strip(&self.skip_tags)?;

        let title = document
            .find_first("title")?
            .map(|node| node.text().trim().to_string())
            .unwrap_or_default();

        let description = document
            .find_first(DESCRIPTION_SELECTOR)?
            .and_then(|node| node.attribute("content"))
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        let region = match document.find_first_of(&CONTENT_SELECTORS)? {
            Some(node) => node.html(),
            None => document.html(),
        };
        let body = self.to_markdown(&region)?;

        let images = resolve_images(&document, base_url)?;
        let text = compose_text(&title, &description, &body);

        Ok(ExtractedPage {
            title,
            description,
            text,
            images,
        })
    }

    /// Convert a markup fragment to Markdown without line wrapping
    fn to_markdown(&self, html: &str) -> Result<String, ExtractError> {
        let converter = HtmlToMarkdown::builder()
            .skip_tags(self.skip_tags.clone())
            .build();
        converter
            .convert(html)
            .map_err(|e| ExtractError::Conversion(e.to_string()))
    }
}

impl Default for PageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Heading, optional description line, then the body
pub fn compose_text(title: &str, description: &str, body: &str) -> String {
    let heading = if title.is_empty() {
        UNTITLED_PLACEHOLDER
    } else {
        title
    };

    let mut text = format!("# {}\n\n", heading);
    if !description.is_empty() {
        text.push_str(&format!("**Description**: {}\n\n", description));
    }
    text.push_str(body);
    text
}
