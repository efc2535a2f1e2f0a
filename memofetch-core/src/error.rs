//! Error types for memofetch.
//!
//! This module provides the error hierarchy using `thiserror`. A cache miss is
//! never an error; absence is communicated as `Option::None` by the cache and
//! the response accessors. Errors here are reserved for configuration
//! mistakes, transport failures, and caller-contract violations.

use thiserror::Error;

/// Result type alias using `FetchError`.
pub type Result<T> = std::result::Result<T, FetchError>;

/// Main error type for all memofetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// Invalid cache or client configuration, detected at construction time.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // NETWORK ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// HTTP request failed in transit.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Request timed out.
    #[error("Connection timeout: {0}")]
    ConnectionTimeout(String),

    /// The server answered with a non-success status code.
    #[error("HTTP status {status} for {url}")]
    HttpStatus {
        /// Status code returned by the server.
        status: u16,
        /// The requested URL.
        url: String,
    },

    /// The supplied URL could not be parsed or requested.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // RESPONSE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// A header expected to carry a single value carried several.
    ///
    /// This is a caller-contract violation, distinct from the header simply
    /// being absent.
    #[error("Header '{name}' has {count} values and cannot be mapped to a single one")]
    AmbiguousHeader {
        /// The header name that was looked up.
        name: String,
        /// How many values the header actually carried.
        count: usize,
    },

    /// Response body could not be decoded with the expected charset.
    #[error("Encoding error: {0}")]
    EncodingError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION & I/O ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FetchError {
    /// Returns true if this error is recoverable (can retry).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FetchError::HttpError(_)
                | FetchError::ConnectionTimeout(_)
                | FetchError::HttpStatus { status: 500..=599, .. }
        )
    }

    /// Returns true if this is a configuration error.
    pub fn is_config_error(&self) -> bool {
        matches!(self, FetchError::ConfigError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FetchError::AmbiguousHeader {
            name: "set-cookie".into(),
            count: 3,
        };
        assert!(err.to_string().contains("set-cookie"));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_error_classification() {
        assert!(FetchError::HttpError("test".into()).is_recoverable());
        assert!(FetchError::ConnectionTimeout("test".into()).is_recoverable());
        assert!(FetchError::HttpStatus { status: 503, url: "http://x".into() }.is_recoverable());
        assert!(!FetchError::HttpStatus { status: 404, url: "http://x".into() }.is_recoverable());
        assert!(!FetchError::ConfigError("test".into()).is_recoverable());

        assert!(FetchError::ConfigError("test".into()).is_config_error());
        assert!(!FetchError::HttpError("test".into()).is_config_error());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("invalid");
        let fetch_result: Result<serde_json::Value> = json_result.map_err(FetchError::from);
        assert!(matches!(fetch_result, Err(FetchError::JsonError(_))));
    }
}
