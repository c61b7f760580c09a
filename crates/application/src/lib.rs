//! Application layer - Use cases and orchestration
//!
//! Resolves locatables, orchestrates route, geocode and accessibility
//! requests against a [`GeoServicePort`], and coordinates live search.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, ResolutionError};
pub use ports::*;
pub use services::*;
