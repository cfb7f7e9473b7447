//! # Configuration Management Module
//!
//! ## Purpose
//! Centralized configuration for the site search engine: the fixed page
//! list, document extension classification, query tuning, fetch behavior,
//! and logging, with type-safe access and validation.
//!
//! ## Input/Output Specification
//! - **Input**: Configuration files (TOML), environment variables
//! - **Output**: Validated configuration structs with defaults and overrides
//!
//! ## Configuration Sources (in order of precedence)
//! 1. Environment variables
//! 2. Configuration files
//! 3. Default values
//!
//! ## Usage
//! ```rust,no_run
//! use site_search::config::Config;
//!
//! let config = Config::from_file("config.toml").unwrap();
//! println!("Indexing {} pages", config.site.pages.len());
//! ```

use crate::errors::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure containing all system settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site page set and document classification
    pub site: SiteConfig,
    /// Query engine behavior
    pub search: SearchConfig,
    /// Remote fetch behavior
    pub fetch: FetchConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Site page set and document classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Base URL the fetch transport resolves page paths against
    pub base_url: String,
    /// Fixed list of site-relative resource paths to index
    pub pages: Vec<String>,
    /// Extensions of documents that are never fetched (indexed by filename)
    pub document_extensions: Vec<String>,
}

/// Query engine behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of results returned per query
    pub max_results: usize,
    /// Quiet period before a value-change event runs a query
    pub debounce_ms: u64,
}

/// Remote fetch behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Maximum concurrent page fetches during index construction
    pub max_concurrent_fetches: usize,
    /// User agent reported to the site
    pub user_agent: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Enable structured JSON logging
    pub json_format: bool,
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::from_file("config.toml")
    }

    /// Load configuration from a specific file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!("Configuration file not found: {:?}, using defaults", path);
            let mut config = Self::default();
            config.apply_env_overrides()?;
            config.validate()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path).map_err(|e| SearchError::Config {
            message: format!("Failed to read config file {:?}: {}", path, e),
        })?;

        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(base_url) = std::env::var("SITE_SEARCH_BASE_URL") {
            self.site.base_url = base_url;
        }
        if let Ok(level) = std::env::var("SITE_SEARCH_LOG_LEVEL") {
            self.logging.level = level;
        }
        Ok(())
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.search.max_results == 0 {
            return Err(SearchError::ValidationFailed {
                field: "search.max_results".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        if self.fetch.max_concurrent_fetches == 0 {
            return Err(SearchError::ValidationFailed {
                field: "fetch.max_concurrent_fetches".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        for ext in &self.site.document_extensions {
            if !ext.starts_with('.') {
                return Err(SearchError::ValidationFailed {
                    field: "site.document_extensions".to_string(),
                    reason: format!("Extension '{}' must start with a dot", ext),
                });
            }
        }

        Ok(())
    }

    /// Get configuration as TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SearchError::Config {
            message: format!("Failed to serialize config to TOML: {}", e),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig {
                base_url: "http://127.0.0.1:8000".to_string(),
                pages: vec![
                    "index.html".to_string(),
                    "pages/about/about-us.html".to_string(),
                    "pages/about/vision-mission.html".to_string(),
                    "pages/about/anthem.html".to_string(),
                    "pages/about/governing-council.html".to_string(),
                    "pages/about/academic-board.html".to_string(),
                    "pages/about/principal-officers.html".to_string(),
                    "pdf/FSS conditions of service.pdf".to_string(),
                    "pdf/Revised Schemes of Service for NBTE and Fed Polys july 2013.pdf"
                        .to_string(),
                ],
                document_extensions: vec![
                    ".pdf".to_string(),
                    ".doc".to_string(),
                    ".docx".to_string(),
                ],
            },
            search: SearchConfig {
                max_results: 12,
                debounce_ms: 250,
            },
            fetch: FetchConfig {
                max_concurrent_fetches: 5,
                user_agent: format!("site-search/{}", env!("CARGO_PKG_VERSION")),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                json_format: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.search.max_results, 12);
        assert_eq!(config.search.debounce_ms, 250);
        assert!(config.site.pages.iter().any(|p| p.ends_with(".pdf")));
    }

    #[test]
    fn test_from_file_round_trip() {
        let config = Config::default();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_toml().unwrap().as_bytes()).unwrap();

        let loaded = Config::from_file(file.path()).unwrap();
        assert_eq!(loaded.site.pages, config.site.pages);
        assert_eq!(loaded.search.max_results, config.search.max_results);
    }

    #[test]
    fn test_env_override_applies() {
        std::env::set_var("SITE_SEARCH_LOG_LEVEL", "debug");
        let config = Config::from_file("definitely-missing.toml").unwrap();
        std::env::remove_var("SITE_SEARCH_LOG_LEVEL");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_validation_rejects_bad_extension() {
        let mut config = Config::default();
        config.site.document_extensions.push("pdf".to_string());
        assert!(matches!(
            config.validate(),
            Err(SearchError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn test_validation_rejects_zero_max_results() {
        let mut config = Config::default();
        config.search.max_results = 0;
        assert!(config.validate().is_err());
    }
}
