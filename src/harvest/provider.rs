//! # Page Content Provider Module
//!
//! ## Purpose
//! Abstracts where the current page's text and outbound links come from.
//! The live rendering surface (a DOM, a template engine) implements
//! `PageContentProvider` outside this crate; `StaticPageProvider` backs the
//! CLI driver and tests, either constructed directly or parsed out of
//! fetched markup.
//!
//! ## Input/Output Specification
//! - **Input**: None (the provider owns its page snapshot)
//! - **Output**: The current document view and the page's outbound links
//! - **Guarantees**: Raw values; trimming, flattening, and link filtering
//!   are the harvest's concern

use crate::errors::{Result, SearchError};
use crate::text_processing::TextProcessor;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Snapshot of the currently loaded document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentView {
    /// Location of the document (path or full pathname)
    pub location: String,
    /// Declared title, when the document has one
    pub title: Option<String>,
    /// Visible text of the document body (raw, not yet flattened)
    pub body: String,
}

/// One outbound link of the current document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkView {
    /// Raw href attribute value
    pub href: String,
    /// Visible text of the link (raw)
    pub text: String,
    /// Text of the nearest enclosing context element, when available
    pub context: Option<String>,
}

/// Source of current-page content for the harvest
pub trait PageContentProvider: Send + Sync {
    /// The currently loaded document
    fn current_document(&self) -> DocumentView;

    /// All outbound links of the current document, in page order
    fn outbound_links(&self) -> Vec<LinkView>;
}

/// Fixed-content provider backing the CLI and tests
pub struct StaticPageProvider {
    document: DocumentView,
    links: Vec<LinkView>,
}

impl StaticPageProvider {
    /// Create a provider from an explicit snapshot
    pub fn new(document: DocumentView, links: Vec<LinkView>) -> Self {
        Self { document, links }
    }

    /// Provider for a page whose content is unavailable: no title, no body,
    /// no links. The harvest still emits a record for it.
    pub fn empty(location: impl Into<String>) -> Self {
        Self {
            document: DocumentView {
                location: location.into(),
                title: None,
                body: String::new(),
            },
            links: Vec::new(),
        }
    }

    /// Build a provider by parsing fetched markup: declared title, flattened
    /// body text, and every anchor with its visible text.
    pub fn from_html(location: impl Into<String>, html: &str) -> Result<Self> {
        let processor = TextProcessor::new()?;
        let anchor = Regex::new(r#"(?is)<a\b[^>]*\bhref\s*=\s*["']([^"']*)["'][^>]*>(.*?)</a\s*>"#)
            .map_err(|e| SearchError::Internal {
                message: format!("Invalid anchor regex: {}", e),
            })?;

        let links = anchor
            .captures_iter(html)
            .map(|captures| LinkView {
                href: captures[1].to_string(),
                text: processor.html_to_text(&captures[2]),
                context: None,
            })
            .collect();

        Ok(Self {
            document: DocumentView {
                location: location.into(),
                title: processor.extract_title(html),
                body: processor.html_to_text(html),
            },
            links,
        })
    }
}

impl PageContentProvider for StaticPageProvider {
    fn current_document(&self) -> DocumentView {
        self.document.clone()
    }

    fn outbound_links(&self) -> Vec<LinkView> {
        self.links.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_html_extracts_document_and_links() {
        let html = r#"<html><head><title>Campus</title></head><body>
            <p>Welcome to the campus portal.</p>
            <ul><li><a href="pages/fees.html">Fees &amp; Aid</a></li></ul>
            <a href="https://external.test/x">Elsewhere</a>
        </body></html>"#;

        let provider = StaticPageProvider::from_html("index.html", html).unwrap();
        let doc = provider.current_document();
        assert_eq!(doc.location, "index.html");
        assert_eq!(doc.title, Some("Campus".to_string()));
        assert!(doc.body.contains("Welcome to the campus portal."));

        let links = provider.outbound_links();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].href, "pages/fees.html");
        assert_eq!(links[0].text, "Fees & Aid");
        // External links are surfaced; the harvest decides to skip them
        assert_eq!(links[1].href, "https://external.test/x");
    }

    #[test]
    fn test_empty_provider() {
        let provider = StaticPageProvider::empty("index.html");
        assert_eq!(provider.current_document().body, "");
        assert!(provider.outbound_links().is_empty());
    }
}
