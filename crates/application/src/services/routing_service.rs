//! Routing service
//!
//! Resolves origin and destination concurrently, then asks the geographic
//! service for the path between them. Geocode and accessibility requests
//! take concrete inputs and go straight to the service.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use domain::{AccessibleArea, Coordinate, GeocodedLocation, Route, RouteOptions, TransportationMode};
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{GeoServicePort, Locatable};

/// Smallest time budget the service accepts
const MIN_TIME_BUDGET: Duration = Duration::from_secs(60);

/// Orchestrates route, geocode and accessibility requests
pub struct RoutingService {
    geo: Arc<dyn GeoServicePort>,
}

impl fmt::Debug for RoutingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingService")
            .field("geo", &"<GeoServicePort>")
            .finish()
    }
}

impl RoutingService {
    /// Create a new routing service
    #[must_use]
    pub fn new(geo: Arc<dyn GeoServicePort>) -> Self {
        Self { geo }
    }

    /// Request a route between two locatables
    ///
    /// Both ends are resolved concurrently. The first resolution failure
    /// fails the request and the other resolution is dropped.
    #[instrument(skip(self, origin, destination), fields(mode = %options.transportation_mode))]
    pub async fn request_route(
        &self,
        origin: &dyn Locatable,
        destination: &dyn Locatable,
        options: RouteOptions,
    ) -> Result<Route, ApplicationError> {
        let (origin, destination) = tokio::try_join!(origin.locate(), destination.locate())
            .map_err(|e| {
                warn!(error = %e, "Route endpoint could not be resolved");
                ApplicationError::from(e)
            })?;
        debug!(%origin, %destination, "Route endpoints resolved");

        let path = self
            .geo
            .route(
                origin.coordinate(),
                destination.coordinate(),
                options.transportation_mode,
            )
            .await?;

        Ok(Route::new(origin, destination, options, path))
    }

    /// Look up candidates for a free-form address
    #[instrument(skip(self))]
    pub async fn geocode(
        &self,
        address: &str,
        max_responses: Option<u32>,
    ) -> Result<Vec<GeocodedLocation>, ApplicationError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(ApplicationError::InvalidInput(
                "Address must not be empty".to_string(),
            ));
        }
        if max_responses == Some(0) {
            return Err(ApplicationError::InvalidInput(
                "Maximum number of results must be positive".to_string(),
            ));
        }
        self.geo.geocode(address, max_responses).await
    }

    /// Compute the area reachable from `position`
    ///
    /// `time_budget` must be a whole number of minutes, at least one, and
    /// `interval` must be a positive number of whole seconds no larger than
    /// the budget.
    #[instrument(skip(self), fields(position = %position))]
    pub async fn accessible_area(
        &self,
        position: Coordinate,
        transportation_mode: TransportationMode,
        time_budget: Duration,
        interval: Duration,
    ) -> Result<AccessibleArea, ApplicationError> {
        if time_budget < MIN_TIME_BUDGET {
            return Err(ApplicationError::InvalidInput(format!(
                "Time budget must be at least {} seconds",
                MIN_TIME_BUDGET.as_secs()
            )));
        }
        if time_budget.subsec_nanos() != 0 || time_budget.as_secs() % 60 != 0 {
            return Err(ApplicationError::InvalidInput(
                "Time budget must be a whole number of minutes".to_string(),
            ));
        }
        if interval.is_zero() || interval.subsec_nanos() != 0 || interval > time_budget {
            return Err(ApplicationError::InvalidInput(
                "Interval must be positive and within the time budget".to_string(),
            ));
        }
        self.geo
            .accessibility(position, transportation_mode, time_budget, interval)
            .await
    }

    /// Compute the area reachable from a locatable, resolving it first
    pub async fn accessible_area_around(
        &self,
        origin: &dyn Locatable,
        transportation_mode: TransportationMode,
        time_budget: Duration,
        interval: Duration,
    ) -> Result<AccessibleArea, ApplicationError> {
        let origin = origin.locate().await?;
        self.accessible_area(origin.coordinate(), transportation_mode, time_budget, interval)
            .await
    }
}
