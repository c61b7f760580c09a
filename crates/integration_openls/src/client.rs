//! OpenLS client
//!
//! Sends route, geocode and accessibility requests through a [`Transport`]
//! and decodes the responses.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use domain::{AccessibleArea, Coordinate, GeocodedLocation, RoutePath, TransportationMode};
use tracing::{debug, instrument, warn};

use crate::config::OpenLsConfig;
use crate::decode::{decode_accessible_area, decode_geocoded_locations, decode_route};
use crate::error::OpenLsError;
use crate::target::OpenLsTarget;
use crate::transport::{ReqwestTransport, Transport};

/// Client for the OpenLS route, geocode and accessibility services
#[derive(Clone)]
pub struct OpenLsClient {
    transport: Arc<dyn Transport>,
    config: OpenLsConfig,
}

impl fmt::Debug for OpenLsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenLsClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenLsClient {
    /// Create a client that talks HTTP
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &OpenLsConfig) -> Result<Self, OpenLsError> {
        config.validate().map_err(OpenLsError::ConfigurationError)?;
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client on top of an existing transport
    #[must_use]
    pub fn with_transport(config: &OpenLsConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            config: config.clone(),
        }
    }

    /// Send a target and return the body of a successful response
    async fn fetch(&self, target: &OpenLsTarget) -> Result<String, OpenLsError> {
        let request = target.request(&self.config);
        let response = self.transport.send(&request).await?;

        if !response.is_success() {
            warn!(status = response.status, path = target.path(), "OpenLS request failed");
            return Err(OpenLsError::HttpStatus {
                status: response.status,
            });
        }
        Ok(response.body)
    }

    /// Request a route between two coordinates
    ///
    /// # Errors
    ///
    /// Transport failures, non-success statuses, malformed responses, and
    /// [`OpenLsError::RouteNotFound`] when the service found no path.
    #[instrument(skip(self), fields(start = %start, end = %end))]
    pub async fn route(
        &self,
        start: Coordinate,
        end: Coordinate,
        transportation_mode: TransportationMode,
    ) -> Result<RoutePath, OpenLsError> {
        let target = OpenLsTarget::Route {
            start,
            end,
            transportation_mode,
        };
        let body = self.fetch(&target).await?;

        match decode_route(&body) {
            Ok(path) => {
                debug!(waypoints = path.waypoints.len(), "Route found");
                Ok(path)
            },
            Err(OpenLsError::RouteNotFound) => {
                warn!("No route found");
                Err(OpenLsError::RouteNotFound)
            },
            Err(e) => {
                warn!(error = %e, "Unable to decode route response");
                Err(e)
            },
        }
    }

    /// Look up candidates for a free-form address
    ///
    /// `max_responses` defaults to the configured maximum.
    ///
    /// # Errors
    ///
    /// [`OpenLsError::InvalidRequest`] for a blank address, otherwise
    /// transport, status and decode failures.
    #[instrument(skip(self))]
    pub async fn geocode(
        &self,
        address: &str,
        max_responses: Option<u32>,
    ) -> Result<Vec<GeocodedLocation>, OpenLsError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(OpenLsError::InvalidRequest(
                "Address must not be empty".to_string(),
            ));
        }

        let target = OpenLsTarget::Geocode {
            free_form_address: address.to_string(),
            max_responses: max_responses.unwrap_or(self.config.max_geocode_results),
        };
        let body = self.fetch(&target).await?;
        let locations = decode_geocoded_locations(&body)?;

        debug!(%address, count = locations.len(), "Geocoded address");
        Ok(locations)
    }

    /// Request the areas reachable from `position`
    ///
    /// The service takes the budget in whole minutes and the interval in
    /// whole seconds.
    ///
    /// # Errors
    ///
    /// [`OpenLsError::InvalidRequest`] for a budget or interval the wire
    /// format cannot carry exactly, otherwise transport, status and decode
    /// failures.
    #[instrument(skip(self), fields(position = %position))]
    pub async fn accessibility(
        &self,
        position: Coordinate,
        transportation_mode: TransportationMode,
        time_budget: Duration,
        interval: Duration,
    ) -> Result<AccessibleArea, OpenLsError> {
        if time_budget.subsec_nanos() != 0 || time_budget.as_secs() % 60 != 0 {
            return Err(OpenLsError::InvalidRequest(format!(
                "Time budget must be a whole number of minutes, got {time_budget:?}"
            )));
        }
        if interval.subsec_nanos() != 0 {
            return Err(OpenLsError::InvalidRequest(format!(
                "Interval must be a whole number of seconds, got {interval:?}"
            )));
        }

        let target = OpenLsTarget::Accessibility {
            position,
            transportation_mode,
            time_budget,
            interval,
        };
        let body = self.fetch(&target).await?;
        let area = decode_accessible_area(&body, position)?;

        debug!(isochrones = area.isochrones.len(), "Accessibility analysed");
        Ok(area)
    }
}
