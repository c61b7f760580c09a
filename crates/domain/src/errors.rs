//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Coordinate text could not be parsed
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Unknown transportation mode name or index
    #[error("Invalid transportation mode: {0}")]
    InvalidTransportationMode(String),
}
