//! Locatable port
//!
//! Anything that can be turned into a [`Location`], possibly by waiting on
//! a sensor. Values that already carry a coordinate resolve without
//! suspending.

use async_trait::async_trait;
use domain::{Coordinate, GeocodedLocation, Location};

use crate::error::ResolutionError;

/// Resolves to a concrete location
#[async_trait]
pub trait Locatable: Send + Sync {
    /// Resolve to a location
    async fn locate(&self) -> Result<Location, ResolutionError>;
}

#[async_trait]
impl Locatable for Location {
    async fn locate(&self) -> Result<Location, ResolutionError> {
        Ok(self.clone())
    }
}

#[async_trait]
impl Locatable for Coordinate {
    async fn locate(&self) -> Result<Location, ResolutionError> {
        Ok(Location::from(*self))
    }
}

#[async_trait]
impl Locatable for GeocodedLocation {
    async fn locate(&self) -> Result<Location, ResolutionError> {
        Ok(Location::Geocoded(self.clone()))
    }
}
