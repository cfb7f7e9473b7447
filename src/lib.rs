//! # Site Search Engine
//!
//! ## Overview
//! This library implements a lightweight search engine over a small, fixed
//! set of site pages. It builds an in-memory text index once per engine
//! lifetime — from the currently loaded document, its outbound links, and a
//! configured list of remote pages — then answers free-text queries with
//! substring scoring, ranked excerpts, and rendering-ready HTML fragments.
//!
//! ## Architecture
//! The system is composed of several key modules:
//! - `harvest`: Document source producing indexed records from the current
//!   page, its links, and fetched remote pages
//! - `text_processing`: Whitespace flattening, HTML text extraction, escaping
//! - `search`: Lazily-built index plus the query/scoring/excerpt engine
//! - `render`: HTML fragment rendering for ranked results
//! - `debounce`: Single-slot cancellable scheduler for input events
//! - `input`: Debounced value-change and immediate-submit glue
//! - `config`: Configuration management and settings
//! - `errors`: Centralized error handling and types
//!
//! ## Input/Output Specification
//! - **Input**: Page content (current document, links, fetched HTML),
//!   free-text queries
//! - **Output**: Ranked, truncated results with excerpts; escaped HTML
//!   fragments for display
//!
//! ## Usage
//! ```rust,no_run
//! use site_search::{Config, SiteSearch};
//! use site_search::harvest::{HttpTransport, StaticPageProvider};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config.toml")?;
//!     let transport = Arc::new(HttpTransport::new(&config)?);
//!     let provider = Arc::new(StaticPageProvider::empty("index.html"));
//!     let engine = SiteSearch::new(config, provider, transport)?;
//!     let results = engine.query("admissions").await;
//!     println!("Found {} results", results.len());
//!     Ok(())
//! }
//! ```

// Core modules
pub mod config;
pub mod errors;
pub mod text_processing;
pub mod harvest;
pub mod search;
pub mod render;
pub mod debounce;
pub mod input;

// Re-exports for convenience
pub use config::Config;
pub use errors::{Result, SearchError};
pub use search::{ScoredRecord, SiteSearch};

use serde::{Deserialize, Serialize};

/// One indexed (path, title, body) tuple.
///
/// `path` is a relative resource locator (HTML page, in-page anchor target,
/// or document filename) and is not guaranteed unique; duplicates across
/// harvest sources are suppressed by `(path, title)` equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Relative resource locator
    pub path: String,
    /// Display title: declared document title, anchor text, or bare filename
    pub title: String,
    /// Flattened, whitespace-collapsed plain text; empty when the content
    /// could not be retrieved
    pub body: String,
}

impl PageRecord {
    /// Create a new record
    pub fn new(
        path: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Ordered collection of indexed records with `(path, title)` deduplication.
///
/// Insertion order is the only tie-break the query engine guarantees, so the
/// harvest appends records in a deterministic order: current document, then
/// anchors in provider order, then remote pages in source-list order.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    records: Vec<PageRecord>,
}

impl SearchIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record unless one with the same `(path, title)` exists.
    /// Returns whether the record was inserted.
    pub fn push_unique(&mut self, record: PageRecord) -> bool {
        let duplicate = self
            .records
            .iter()
            .any(|r| r.path == record.path && r.title == record.title);
        if duplicate {
            return false;
        }
        self.records.push(record);
        true
    }

    /// All records in insertion order
    pub fn records(&self) -> &[PageRecord] {
        &self.records
    }

    /// Number of indexed records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_unique_suppresses_path_title_duplicates() {
        let mut index = SearchIndex::new();
        assert!(index.push_unique(PageRecord::new("a.html", "A", "first")));
        assert!(!index.push_unique(PageRecord::new("a.html", "A", "second")));
        // Same path but a different title is a distinct record
        assert!(index.push_unique(PageRecord::new("a.html", "A section", "")));
        assert_eq!(index.len(), 2);
        assert_eq!(index.records()[0].body, "first");
    }
}
