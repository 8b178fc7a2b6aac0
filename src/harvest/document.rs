// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Parsed HTML document with typed queries
//!
//! Wraps `scraper::Html` so extraction heuristics are written as explicit
//! selector fallback chains instead of ad hoc tree walking.

use scraper::{ElementRef, Html, Selector};

use super::types::ExtractError;

/// Compile a CSS selector, mapping parser errors into [`ExtractError`]
pub fn compile(source: &str) -> Result<Selector, ExtractError> {
    Selector::parse(source).map_err(|e| ExtractError::Selector {
        selector: source.to_string(),
        reason: format!("{:?}", e),
    })
}

/// A parsed HTML document
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse raw markup
    ///
    /// The HTML parser recovers from any malformed input, so the only
    /// unparseable document is one with no content at all.
    pub fn parse(markup: &str) -> Result<Self, ExtractError> {
        if markup.trim().is_empty() {
            return Err(ExtractError::EmptyDocument);
        }
        Ok(Self {
            html: Html::parse_document(markup),
        })
    }

    /// Detach every element matching any of `selectors` from the tree
    ///
    /// Returns the number of detached subtrees.
    pub fn strip(&mut self, selectors: &[&str]) -> Result<usize, ExtractError> {
        let mut removed = 0;
        for source in selectors {
            let selector = compile(source)?;
            let ids: Vec<_> = self.html.select(&selector).map(|el| el.id()).collect();
            for id in ids {
                if let Some(mut node) = self.html.tree.get_mut(id) {
                    node.detach();
                    removed += 1;
                }
            }
        }
        Ok(removed)
    }

    /// First element matching `selector`, in document order
    pub fn find_first(&self, selector: &str) -> Result<Option<Node<'_>>, ExtractError> {
        let selector = compile(selector)?;
        Ok(self.html.select(&selector).next().map(Node::new))
    }

    /// First match of the first selector in `selectors` that matches anything
    pub fn find_first_of(&self, selectors: &[&str]) -> Result<Option<Node<'_>>, ExtractError> {
        for source in selectors {
            if let Some(node) = self.find_first(source)? {
                return Ok(Some(node));
            }
        }
        Ok(None)
    }

    /// All elements matching `selector`, in document order
    pub fn find_all(&self, selector: &str) -> Result<Vec<Node<'_>>, ExtractError> {
        let selector = compile(selector)?;
        Ok(self.html.select(&selector).map(Node::new).collect())
    }

    /// Serialized markup of the whole document
    pub fn html(&self) -> String {
        self.html.html()
    }
}

/// An element inside a [`Document`]
#[derive(Clone, Copy)]
pub struct Node<'a> {
    element: ElementRef<'a>,
}

impl<'a> Node<'a> {
    fn new(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    /// Tag name, lowercase
    pub fn name(&self) -> &'a str {
        self.element.value().name()
    }

    /// Raw attribute value
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// First attribute in `names` whose trimmed value is non-empty
    pub fn first_attribute(&self, names: &[&str]) -> Option<&'a str> {
        names
            .iter()
            .filter_map(|name| self.attribute(name))
            .map(str::trim)
            .find(|value| !value.is_empty())
    }

    /// Concatenated descendant text
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Serialized markup of this element and its subtree
    pub fn html(&self) -> String {
        self.element.html()
    }
}
