//! Application-level errors

use thiserror::Error;

/// Reasons a locatable could not be turned into a coordinate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// The user denied access to the location sensor
    #[error("Location permission denied")]
    PermissionDenied,

    /// The sensor reported a failure
    #[error("Location sensor error: {0}")]
    Sensor(String),

    /// The sensor delivered an update without any fix
    #[error("Location unknown")]
    LocationUnknown,

    /// No fix arrived within the configured time
    #[error("Timed out waiting for a location fix")]
    Timeout,

    /// The sensor stopped delivering updates before the first fix
    #[error("Location sensor closed before reporting a fix")]
    SensorClosed,
}

impl ResolutionError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout | Self::LocationUnknown)
    }
}

/// Errors that can occur in the application layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// Connectivity failure talking to the service
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service did not answer in time
    #[error("Request timed out")]
    Timeout,

    /// The service answered with a non-success status
    #[error("Service returned HTTP {status}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
    },

    /// The response could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// The service found no path between the endpoints
    #[error("No route found")]
    RouteNotFound,

    /// A locatable could not be resolved
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// Caller input was rejected before any request was sent
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout => true,
            Self::HttpStatus { status } => *status == 429 || *status >= 500,
            Self::Resolution(e) => e.is_retryable(),
            Self::Decode(_)
            | Self::RouteNotFound
            | Self::InvalidInput(_)
            | Self::Configuration(_) => false,
        }
    }

    /// Whether the error happened before anything was sent to the service
    pub const fn is_resolution(&self) -> bool {
        matches!(self, Self::Resolution(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_error_converts() {
        let err: ApplicationError = ResolutionError::PermissionDenied.into();
        assert_eq!(
            err,
            ApplicationError::Resolution(ResolutionError::PermissionDenied)
        );
        assert!(err.is_resolution());
        assert_eq!(err.to_string(), "Location permission denied");
    }

    #[test]
    fn retryable_classification() {
        assert!(ApplicationError::Timeout.is_retryable());
        assert!(ApplicationError::Transport("reset".into()).is_retryable());
        assert!(ApplicationError::HttpStatus { status: 503 }.is_retryable());
        assert!(ApplicationError::HttpStatus { status: 429 }.is_retryable());
        assert!(!ApplicationError::HttpStatus { status: 404 }.is_retryable());
        assert!(!ApplicationError::RouteNotFound.is_retryable());
        assert!(!ApplicationError::Decode("bad".into()).is_retryable());
        assert!(ApplicationError::from(ResolutionError::Timeout).is_retryable());
        assert!(!ApplicationError::from(ResolutionError::PermissionDenied).is_retryable());
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            ApplicationError::HttpStatus { status: 500 }.to_string(),
            "Service returned HTTP 500"
        );
        assert_eq!(ApplicationError::RouteNotFound.to_string(), "No route found");
        assert_eq!(
            ResolutionError::Sensor("gps off".into()).to_string(),
            "Location sensor error: gps off"
        );
    }
}
