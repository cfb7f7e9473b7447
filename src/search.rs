//! # Search Engine Module
//!
//! ## Purpose
//! Owns the lazily-built search index and answers free-text queries against
//! it: substring scoring, zero-score filtering, stable descending sort,
//! truncation, and excerpt generation.
//!
//! ## Input/Output Specification
//! - **Input**: Free-text queries
//! - **Output**: Ranked, truncated results with display excerpts
//! - **Determinism**: stable sort on score; ties keep index insertion order
//!
//! ## Key Features
//! - Build-once index behind an async once-cell: the first query triggers
//!   the harvest, concurrent queries await the same in-flight build, and
//!   later queries reuse the result without re-fetching
//! - Pure scoring: +30 for a title substring match, +10 for a body match
//! - Bounded excerpts around the first case-insensitive match

use crate::config::Config;
use crate::errors::Result;
use crate::harvest::{DocumentSource, PageContentProvider, PageTransport};
use crate::{PageRecord, SearchIndex};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Score contribution of a title substring match
const TITLE_WEIGHT: u32 = 30;
/// Score contribution of a body substring match
const BODY_WEIGHT: u32 = 10;

/// Excerpt bytes kept before the match
const EXCERPT_BEFORE: usize = 40;
/// Excerpt bytes kept after the match start
const EXCERPT_AFTER: usize = 100;
/// Excerpt length when the body holds no match
const EXCERPT_FALLBACK: usize = 140;

/// One ranked search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredRecord {
    /// The matched record
    pub record: PageRecord,
    /// Relevance weight (0, 10, 30, or 40; zero-score records are dropped)
    pub score: u32,
    /// Bounded body substring around the match, for result previews
    pub excerpt: String,
}

/// Site search engine with a build-once index
pub struct SiteSearch {
    config: Config,
    source: DocumentSource,
    index: OnceCell<SearchIndex>,
}

impl SiteSearch {
    /// Create a new engine over the given page context and transport
    pub fn new(
        config: Config,
        provider: Arc<dyn PageContentProvider>,
        transport: Arc<dyn PageTransport>,
    ) -> Result<Self> {
        let source = DocumentSource::new(config.clone(), provider, transport)?;
        Ok(Self {
            config,
            source,
            index: OnceCell::new(),
        })
    }

    /// Answer a free-text query.
    ///
    /// An empty (or whitespace-only) query returns no results without
    /// touching the index; the first real query builds it.
    pub async fn query(&self, raw: &str) -> Vec<ScoredRecord> {
        let query = raw.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let index = self.ensure_index().await;

        let mut results: Vec<ScoredRecord> = index
            .records()
            .iter()
            .filter_map(|record| {
                let score = score_record(record, query);
                (score > 0).then(|| ScoredRecord {
                    record: record.clone(),
                    score,
                    excerpt: make_excerpt(&record.body, query),
                })
            })
            .collect();

        // Stable sort: equal scores keep index insertion order
        results.sort_by_key(|r| std::cmp::Reverse(r.score));
        results.truncate(self.config.search.max_results);

        tracing::debug!("Query '{}' matched {} records", query, results.len());
        results
    }

    /// Whether the index has been built
    pub fn is_built(&self) -> bool {
        self.index.get().is_some()
    }

    /// Number of indexed records, once built
    pub fn index_len(&self) -> Option<usize> {
        self.index.get().map(SearchIndex::len)
    }

    async fn ensure_index(&self) -> &SearchIndex {
        // get_or_init memoizes the in-flight build: queries arriving while
        // a build is running await it instead of starting a second one
        self.index.get_or_init(|| self.source.harvest()).await
    }
}

/// Score a record against a query. Pure function of its arguments:
/// +30 when the lowercase title contains the lowercase query, +10 when the
/// lowercase body does.
pub fn score_record(record: &PageRecord, query: &str) -> u32 {
    let query = query.to_lowercase();
    let mut score = 0;
    if record.title.to_lowercase().contains(&query) {
        score += TITLE_WEIGHT;
    }
    if record.body.to_lowercase().contains(&query) {
        score += BODY_WEIGHT;
    }
    score
}

/// Display excerpt for a body: the span from 40 bytes before the first
/// case-insensitive match to 100 bytes after its start, clamped to the body;
/// the first 140 bytes when the body holds no match. Always trimmed.
pub fn make_excerpt(body: &str, query: &str) -> String {
    let lowered = body.to_lowercase();
    // Offsets in the lowercased copy only line up with the original when
    // lowercasing preserved the byte length; otherwise use the fallback span
    let position = if lowered.len() == body.len() {
        lowered.find(&query.to_lowercase())
    } else {
        None
    };

    match position {
        Some(pos) => {
            let start = floor_char_boundary(body, pos.saturating_sub(EXCERPT_BEFORE));
            let end = floor_char_boundary(body, (pos + EXCERPT_AFTER).min(body.len()));
            body[start..end].trim().to_string()
        }
        None => {
            let end = floor_char_boundary(body, EXCERPT_FALLBACK.min(body.len()));
            body[..end].trim().to_string()
        }
    }
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
