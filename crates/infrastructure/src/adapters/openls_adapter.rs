//! OpenLS adapter - Implements GeoServicePort using integration_openls

use std::time::Duration;

use application::error::ApplicationError;
use application::ports::GeoServicePort;
use async_trait::async_trait;
use domain::{AccessibleArea, Coordinate, GeocodedLocation, RoutePath, TransportationMode};
use integration_openls::{OpenLsClient, OpenLsConfig, OpenLsError};
use tracing::instrument;

/// Adapter for the OpenLS route, geocode and accessibility services
#[derive(Debug, Clone)]
pub struct OpenLsGeoAdapter {
    client: OpenLsClient,
}

impl OpenLsGeoAdapter {
    /// Create a new adapter talking HTTP
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn new(config: &OpenLsConfig) -> Result<Self, ApplicationError> {
        let client = OpenLsClient::new(config).map_err(Self::map_error)?;
        Ok(Self { client })
    }

    /// Wrap an existing client
    #[must_use]
    pub const fn from_client(client: OpenLsClient) -> Self {
        Self { client }
    }

    /// Classify a client error for the application layer
    fn map_error(error: OpenLsError) -> ApplicationError {
        match error {
            OpenLsError::ConnectionFailed(message) => ApplicationError::Transport(message),
            OpenLsError::Timeout { .. } => ApplicationError::Timeout,
            OpenLsError::HttpStatus { status } => ApplicationError::HttpStatus { status },
            OpenLsError::DecodeError(message) => ApplicationError::Decode(message),
            OpenLsError::RouteNotFound => ApplicationError::RouteNotFound,
            OpenLsError::InvalidRequest(message) => ApplicationError::InvalidInput(message),
            OpenLsError::ConfigurationError(message) => ApplicationError::Configuration(message),
        }
    }
}

#[async_trait]
impl GeoServicePort for OpenLsGeoAdapter {
    #[instrument(skip(self))]
    async fn route(
        &self,
        start: Coordinate,
        end: Coordinate,
        transportation_mode: TransportationMode,
    ) -> Result<RoutePath, ApplicationError> {
        self.client
            .route(start, end, transportation_mode)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn geocode(
        &self,
        address: &str,
        max_responses: Option<u32>,
    ) -> Result<Vec<GeocodedLocation>, ApplicationError> {
        self.client
            .geocode(address, max_responses)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn accessibility(
        &self,
        position: Coordinate,
        transportation_mode: TransportationMode,
        time_budget: Duration,
        interval: Duration,
    ) -> Result<AccessibleArea, ApplicationError> {
        self.client
            .accessibility(position, transportation_mode, time_budget, interval)
            .await
            .map_err(Self::map_error)
    }
}
