//! # Error Handling Module
//!
//! ## Purpose
//! Centralized error handling for the site search engine. Most failures in
//! this crate are absorbed at the harvest boundary and degrade into
//! filename-only index records; the types here cover the paths that do
//! surface — configuration loading, the fetch transport, and the CLI.
//!
//! ## Input/Output Specification
//! - **Input**: Error conditions from configuration, transport, and parsing
//! - **Output**: Structured error types with context
//! - **Error Categories**: Configuration, Transport, Parsing, Validation

use thiserror::Error;

/// Result type used throughout the application
pub type Result<T> = std::result::Result<T, SearchError>;

/// Error types for the site search engine
#[derive(Debug, Error)]
pub enum SearchError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Network-related errors from the fetch transport
    #[error("Network error: {details}")]
    Network { details: String },

    /// Non-success HTTP status while fetching a page
    #[error("Unexpected status {status} fetching '{path}'")]
    UnexpectedStatus { path: String, status: u16 },

    /// Markup or data parsing errors
    #[error("Failed to parse data from {source_name}: {details}")]
    Parse {
        source_name: String,
        details: String,
    },

    /// Validation errors
    #[error("Validation failed for field '{field}': {reason}")]
    ValidationFailed { field: String, reason: String },

    /// Internal system errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SearchError {
    /// Check if the error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SearchError::Network { .. } | SearchError::UnexpectedStatus { .. }
        )
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            SearchError::Config { .. } | SearchError::ValidationFailed { .. } => "configuration",
            SearchError::Network { .. } | SearchError::UnexpectedStatus { .. } => "transport",
            SearchError::Parse { .. } => "parsing",
            SearchError::Internal { .. } => "internal",
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for SearchError {
    fn from(err: std::io::Error) -> Self {
        SearchError::Internal {
            message: format!("IO error: {}", err),
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Network {
            details: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SearchError {
    fn from(err: toml::de::Error) -> Self {
        SearchError::Config {
            message: format!("TOML parse error: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let err = SearchError::Network {
            details: "connection refused".to_string(),
        };
        assert_eq!(err.category(), "transport");
        assert!(err.is_recoverable());

        let err = SearchError::Config {
            message: "missing base_url".to_string(),
        };
        assert_eq!(err.category(), "configuration");
        assert!(!err.is_recoverable());
    }
}
