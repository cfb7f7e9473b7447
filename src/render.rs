//! # Result Rendering Module
//!
//! ## Purpose
//! Turns ranked results into the HTML fragment the display surface inserts:
//! one navigable entry per result, or a single no-results placeholder. All
//! interpolated values are escaped.
//!
//! ## Input/Output Specification
//! - **Input**: Scored results and the query they answer
//! - **Output**: An escaped HTML fragment string

use crate::search::ScoredRecord;
use crate::text_processing::escape_html;

/// Render ranked results as an HTML fragment.
///
/// An empty result set renders a no-results placeholder carrying the query;
/// clearing the display for an empty query is the input lifecycle's concern
/// and never reaches this function.
pub fn render_results(results: &[ScoredRecord], query: &str) -> String {
    if results.is_empty() {
        return format!(
            r#"<div class="no-results">No results for "{}"</div>"#,
            escape_html(query)
        );
    }

    let mut fragment = String::new();
    for result in results {
        fragment.push_str(&format!(
            r#"<a class="search-result" href="{}"><div class="sr-title">{}</div><div class="sr-excerpt">{}</div></a>"#,
            escape_html(&result.record.path),
            escape_html(&result.record.title),
            escape_html(&result.excerpt),
        ));
    }
    fragment
}
