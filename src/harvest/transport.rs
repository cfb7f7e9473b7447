//! # Fetch Transport Module
//!
//! ## Purpose
//! Abstracts the capability of retrieving a site-relative resource as text.
//! The harvest only ever sees the `PageTransport` trait; the HTTP-backed
//! implementation lives here, and tests substitute their own.
//!
//! ## Input/Output Specification
//! - **Input**: Site-relative resource paths
//! - **Output**: Raw response body text, or a transport error
//! - **Failure**: Network errors and non-success statuses are reported as
//!   errors; the caller decides how to degrade

use crate::config::Config;
use crate::errors::{Result, SearchError};
use async_trait::async_trait;

/// Capability of fetching a site-relative resource
#[async_trait]
pub trait PageTransport: Send + Sync {
    /// Fetch a resource and return its body text
    async fn fetch(&self, path: &str) -> Result<String>;
}

/// HTTP-backed transport resolving paths against a configured base URL
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for the configured site
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = config.site.base_url.trim();
        if base_url.is_empty() {
            return Err(SearchError::Config {
                message: "site.base_url must not be empty for the HTTP transport".to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .user_agent(config.fetch.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn resource_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl PageTransport for HttpTransport {
    async fn fetch(&self, path: &str) -> Result<String> {
        let url = self.resource_url(path);
        tracing::debug!("Fetching page: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::UnexpectedStatus {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
