//! Geographic service port
//!
//! Defines the interface for routing, geocoding and accessibility analysis.
//! Adapters in the infrastructure layer implement this port on top of the
//! OpenLS client.

use std::time::Duration;

use async_trait::async_trait;
use domain::{AccessibleArea, Coordinate, GeocodedLocation, RoutePath, TransportationMode};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for geographic service operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeoServicePort: Send + Sync {
    /// Compute the path between two coordinates
    async fn route(
        &self,
        start: Coordinate,
        end: Coordinate,
        transportation_mode: TransportationMode,
    ) -> Result<RoutePath, ApplicationError>;

    /// Look up candidates for a free-form address, in service order
    async fn geocode(
        &self,
        address: &str,
        max_responses: Option<u32>,
    ) -> Result<Vec<GeocodedLocation>, ApplicationError>;

    /// Compute the isochrones reachable from a position
    async fn accessibility(
        &self,
        position: Coordinate,
        transportation_mode: TransportationMode,
        time_budget: Duration,
        interval: Duration,
    ) -> Result<AccessibleArea, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn GeoServicePort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn GeoServicePort>();
    }
}
