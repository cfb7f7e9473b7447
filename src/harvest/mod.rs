//! # Document Source Module
//!
//! ## Purpose
//! Produces the full set of indexed records for the current page context
//! from three sub-sources: the currently loaded document, its outbound
//! links, and a fixed list of remote site pages fetched through the
//! transport. Binary documents (classified by extension) are never fetched
//! and index by filename only.
//!
//! ## Input/Output Specification
//! - **Input**: Page content provider, fetch transport, configured page list
//! - **Output**: An ordered, `(path, title)`-deduplicated `SearchIndex`
//! - **Ordering**: current document, then anchors in page order, then remote
//!   pages in source-list order (fetches run concurrently but results are
//!   collected back into list order)
//!
//! ## Key Features
//! - Concurrent bounded remote fetching
//! - Extension-based document classification (no fetch for binary documents)
//! - Every failure degrades to a filename-only record; no harvest step
//!   fails the overall build

pub mod provider;
pub mod transport;

pub use provider::{DocumentView, LinkView, PageContentProvider, StaticPageProvider};
pub use transport::{HttpTransport, PageTransport};

use crate::config::Config;
use crate::errors::{Result, SearchError};
use crate::text_processing::TextProcessor;
use crate::{PageRecord, SearchIndex};
use futures::future::join_all;
use regex::Regex;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Resource name used when a location has no final path segment
pub const DEFAULT_RESOURCE: &str = "index.html";

/// Last path segment of a resource locator (may be empty)
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Document source assembling the search index
pub struct DocumentSource {
    config: Config,
    provider: Arc<dyn PageContentProvider>,
    transport: Arc<dyn PageTransport>,
    processor: TextProcessor,
    external_href: Regex,
}

impl DocumentSource {
    /// Create a new document source
    pub fn new(
        config: Config,
        provider: Arc<dyn PageContentProvider>,
        transport: Arc<dyn PageTransport>,
    ) -> Result<Self> {
        // Absolute and protocol-relative hrefs point off-site
        let external_href =
            Regex::new(r"(?i)^(https?:)?//").map_err(|e| SearchError::Internal {
                message: format!("Invalid href regex: {}", e),
            })?;

        Ok(Self {
            config,
            provider,
            transport,
            processor: TextProcessor::new()?,
            external_href,
        })
    }

    /// Produce the full index for the current page context.
    ///
    /// Never fails: every sub-harvest absorbs its own errors and degrades to
    /// filename-only records. Resolves only once every remote fetch has
    /// resolved (success or fallback).
    pub async fn harvest(&self) -> SearchIndex {
        let mut index = SearchIndex::new();

        let document = self.provider.current_document();
        let current_resource = self.current_resource_name(&document);

        self.harvest_current_document(&document, &current_resource, &mut index);
        self.harvest_links(&current_resource, &mut index);
        self.harvest_remote_pages(&mut index).await;

        tracing::info!("Search index built with {} records", index.len());
        index
    }

    /// Resource name of the current document: last path segment of its
    /// location, defaulting when empty
    fn current_resource_name(&self, document: &DocumentView) -> String {
        let name = file_name(document.location.trim());
        if name.is_empty() {
            DEFAULT_RESOURCE.to_string()
        } else {
            name.to_string()
        }
    }

    fn harvest_current_document(
        &self,
        document: &DocumentView,
        current_resource: &str,
        index: &mut SearchIndex,
    ) {
        let title = document
            .title
            .as_deref()
            .map(|t| self.processor.flatten(t))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| current_resource.to_string());
        let body = self.processor.flatten(&document.body);

        index.push_unique(PageRecord::new(current_resource, title, body));
    }

    fn harvest_links(&self, current_resource: &str, index: &mut SearchIndex) {
        for link in self.provider.outbound_links() {
            let href = link.href.trim();
            if href.is_empty()
                || self.external_href.is_match(href)
                || href.starts_with("mailto:")
                || href.starts_with("tel:")
            {
                continue;
            }

            let text = link.text.trim();
            if text.is_empty() {
                continue;
            }

            // Strip any trailing fragment; a bare fragment targets this page
            let path = href.split('#').next().unwrap_or("");
            let path = if path.is_empty() {
                current_resource.to_string()
            } else {
                path.to_string()
            };

            let context = link
                .context
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or(text);

            index.push_unique(PageRecord::new(
                path,
                self.processor.flatten(text),
                self.processor.flatten(context),
            ));
        }
    }

    async fn harvest_remote_pages(&self, index: &mut SearchIndex) {
        let semaphore = Arc::new(Semaphore::new(self.config.fetch.max_concurrent_fetches));

        let fetches = self.config.site.pages.iter().map(|path| {
            let semaphore = Arc::clone(&semaphore);
            async move {
                if self.is_document(path) {
                    tracing::debug!("Indexing document '{}' by filename", path);
                    return self.filename_record(path);
                }

                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => return self.filename_record(path),
                };

                match self.fetch_page(path).await {
                    Ok(record) => record,
                    Err(e) => {
                        tracing::warn!(
                            category = e.category(),
                            "Falling back to filename record for '{}': {}",
                            path,
                            e
                        );
                        self.filename_record(path)
                    }
                }
            }
        });

        // join_all preserves input order, so remote records land in
        // source-list order regardless of fetch completion interleaving
        for record in join_all(fetches).await {
            index.push_unique(record);
        }
    }

    /// Whether a path names a non-fetchable binary document
    fn is_document(&self, path: &str) -> bool {
        let lowered = path.to_lowercase();
        self.config
            .site
            .document_extensions
            .iter()
            .any(|ext| lowered.ends_with(&ext.to_lowercase()))
    }

    async fn fetch_page(&self, path: &str) -> Result<PageRecord> {
        let markup = self.transport.fetch(path).await?;
        let title = self
            .processor
            .extract_title(&markup)
            .unwrap_or_else(|| path.to_string());
        let body = self.processor.html_to_text(&markup);
        Ok(PageRecord::new(path, title, body))
    }

    /// Minimal record for a resource whose content is unavailable
    fn filename_record(&self, path: &str) -> PageRecord {
        let name = file_name(path);
        let title = if name.is_empty() { path } else { name };
        PageRecord::new(path, title, "")
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Transport stub serving canned pages and counting fetches
    #[derive(Default)]
    pub struct MockTransport {
        pages: HashMap<String, String>,
        calls: AtomicUsize,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_page(mut self, path: &str, markup: &str) -> Self {
            self.pages.insert(path.to_string(), markup.to_string());
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageTransport for MockTransport {
        async fn fetch(&self, path: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.pages
                .get(path)
                .cloned()
                .ok_or_else(|| SearchError::UnexpectedStatus {
                    path: path.to_string(),
                    status: 404,
                })
        }
    }
}
