//! # Input Lifecycle Module
//!
//! ## Purpose
//! Glue between an input surface and the search engine. Value-change events
//! are debounced; explicit submits cancel pending work and query
//! immediately. Each executed query renders its results and forwards the
//! markup to the display surface through a channel.
//!
//! ## Input/Output Specification
//! - **Input**: Value-change and submit events carrying the field value
//! - **Output**: Rendered result markup per executed query; an empty string
//!   signals a cleared display (empty query)

use crate::debounce::Debouncer;
use crate::render::render_results;
use crate::search::SiteSearch;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Debounced search input driving an engine
pub struct SearchInput {
    engine: Arc<SiteSearch>,
    debouncer: Debouncer,
    output: mpsc::UnboundedSender<String>,
}

impl SearchInput {
    /// Create the input glue. Rendered markup for each executed query is
    /// delivered on the returned receiver, in execution order.
    pub fn new(
        engine: Arc<SiteSearch>,
        debounce: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (output, results) = mpsc::unbounded_channel();
        (
            Self {
                engine,
                debouncer: Debouncer::new(debounce),
                output,
            },
            results,
        )
    }

    /// Value-change event: schedule a debounced query with this value,
    /// replacing any pending one
    pub fn changed(&mut self, value: &str) {
        let engine = self.engine.clone();
        let output = self.output.clone();
        let value = value.to_string();
        self.debouncer.schedule(async move {
            run_query(&engine, &value, &output).await;
        });
    }

    /// Explicit submit: cancel pending work and query immediately
    pub async fn submit(&mut self, value: &str) {
        self.debouncer.cancel();
        run_query(&self.engine, value, &self.output).await;
    }
}

async fn run_query(engine: &SiteSearch, value: &str, output: &mpsc::UnboundedSender<String>) {
    let query = value.trim();
    let markup = if query.is_empty() {
        // Cleared display; no index build, no placeholder
        String::new()
    } else {
        let results = engine.query(query).await;
        render_results(&results, query)
    };

    if output.send(markup).is_err() {
        tracing::debug!("Result surface dropped; discarding rendered output");
    }
}
