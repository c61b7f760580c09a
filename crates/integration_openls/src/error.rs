//! OpenLS error types

use thiserror::Error;

/// Errors that can occur while talking to the OpenLS service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpenLsError {
    /// Connection to the service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// The service answered with a non-success status
    #[error("Unexpected HTTP status {status}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
    },

    /// The response body is not a well-formed response document
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// The response is well formed but contains no route geometry
    #[error("No route found")]
    RouteNotFound,

    /// The request could not be built from the given input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl OpenLsError {
    /// Returns true if repeating the same request may succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed(_) | Self::Timeout { .. } => true,
            Self::HttpStatus { status } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(OpenLsError::ConnectionFailed("reset".to_string()).is_retryable());
        assert!(OpenLsError::Timeout { timeout_secs: 10 }.is_retryable());
        assert!(OpenLsError::HttpStatus { status: 503 }.is_retryable());
        assert!(OpenLsError::HttpStatus { status: 429 }.is_retryable());
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!OpenLsError::HttpStatus { status: 404 }.is_retryable());
        assert!(!OpenLsError::DecodeError("eof".to_string()).is_retryable());
        assert!(!OpenLsError::RouteNotFound.is_retryable());
        assert!(!OpenLsError::InvalidRequest("empty".to_string()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        assert!(
            OpenLsError::HttpStatus { status: 502 }
                .to_string()
                .contains("502")
        );
        assert!(
            OpenLsError::Timeout { timeout_secs: 7 }
                .to_string()
                .contains('7')
        );
        assert_eq!(OpenLsError::RouteNotFound.to_string(), "No route found");
    }
}
