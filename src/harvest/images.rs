// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image reference resolution
//!
//! Collects `<img>` sources and the page's `og:image`, resolves them against
//! the page URL and deduplicates them in discovery order.

use std::collections::HashSet;
use url::Url;

use super::document::Document;
use super::types::ExtractError;

/// Source attributes checked per `<img>`, first non-empty wins
pub const IMAGE_SOURCE_ATTRIBUTES: [&str; 3] = ["src", "data-src", "data-lazy-src"];

/// Social-preview image declared in the page head
const PRIMARY_IMAGE_SELECTOR: &str = r#"meta[property="og:image"]"#;

/// Resolve a raw reference against `base`
///
/// Returns `None` when the result is not an absolute http(s) URL.
pub fn resolve_reference(base: &Url, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let resolved = base.join(raw).ok()?;
    match resolved.scheme() {
        "http" | "https" => Some(resolved.to_string()),
        _ => None,
    }
}

/// Resolves and deduplicates the image URLs of one page
pub struct ImageResolver<'a> {
    base: &'a Url,
    seen: HashSet<String>,
    images: Vec<String>,
}

impl<'a> ImageResolver<'a> {
    pub fn new(base: &'a Url) -> Self {
        Self {
            base,
            seen: HashSet::new(),
            images: Vec::new(),
        }
    }

    /// Resolve `raw` and record it unless already present
    ///
    /// Returns true when a new URL was added.
    pub fn push(&mut self, raw: &str) -> bool {
        match resolve_reference(self.base, raw) {
            Some(url) if self.seen.insert(url.clone()) => {
                self.images.push(url);
                true
            }
            _ => false,
        }
    }

    /// Inline images first, then the primary image
    pub fn collect(mut self, document: &Document) -> Result<Vec<String>, ExtractError> {
        for img in document.find_all("img")? {
            if let Some(raw) = img.first_attribute(&IMAGE_SOURCE_ATTRIBUTES) {
                self.push(raw);
            }
        }

        if let Some(meta) = document.find_first(PRIMARY_IMAGE_SELECTOR)? {
            if let Some(raw) = meta.attribute("content") {
                self.push(raw);
            }
        }

        Ok(self.images)
    }
}

/// Ordered, deduplicated absolute image URLs for `document`
pub fn resolve_images(document: &Document, base: &Url) -> Result<Vec<String>, ExtractError> {
    ImageResolver::new(base).collect(document)
}
