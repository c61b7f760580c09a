//! Static location sensor
//!
//! A sensor for hosts without positioning hardware: it reports a configured
//! position as its only fix, or a sensor error when none is configured.

use application::ports::{
    AuthorizationStatus, LocationSensor, LocationSensorProvider, SensorUpdate,
};
use domain::Coordinate;
use tokio::sync::mpsc;
use tracing::debug;

/// Sensor that reports a fixed position once
#[derive(Debug, Clone, Copy)]
pub struct StaticLocationSensor {
    position: Option<Coordinate>,
}

impl StaticLocationSensor {
    /// Create a sensor for `position`
    #[must_use]
    pub const fn new(position: Option<Coordinate>) -> Self {
        Self { position }
    }
}

impl LocationSensor for StaticLocationSensor {
    fn authorization_status(&self) -> AuthorizationStatus {
        AuthorizationStatus::Authorized
    }

    fn request_authorization(&self) {}

    fn start_updates(&self, updates: mpsc::UnboundedSender<SensorUpdate>) {
        let update = match self.position {
            Some(position) => SensorUpdate::Locations(vec![position]),
            None => SensorUpdate::Error("No position configured".to_string()),
        };
        // A closed receiver means the resolution was abandoned
        if updates.send(update).is_err() {
            debug!("Location update dropped, nobody is listening");
        }
    }

    fn stop_updates(&self) {}
}

/// Provider handing out [`StaticLocationSensor`]s
#[derive(Debug, Clone, Copy)]
pub struct StaticLocationSensorProvider {
    position: Option<Coordinate>,
}

impl StaticLocationSensorProvider {
    /// Create a provider whose sensors report `position`
    #[must_use]
    pub const fn new(position: Option<Coordinate>) -> Self {
        Self { position }
    }
}

impl LocationSensorProvider for StaticLocationSensorProvider {
    fn create_sensor(&self) -> Box<dyn LocationSensor> {
        Box::new(StaticLocationSensor::new(self.position))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use application::error::ResolutionError;
    use application::ports::Locatable;
    use application::services::DeviceCurrentLocation;
    use domain::Location;

    use super::*;

    #[tokio::test]
    async fn configured_position_resolves() {
        let position = Coordinate::new(49.4179, 8.6753);
        let provider = StaticLocationSensorProvider::new(Some(position));
        let resolver = DeviceCurrentLocation::new(Arc::new(provider));

        let location = resolver.locate().await.unwrap();
        assert_eq!(
            location,
            Location::UserPosition {
                coordinate: position
            }
        );
    }

    #[tokio::test]
    async fn missing_position_is_a_sensor_error() {
        let provider = StaticLocationSensorProvider::new(None);
        let resolver = DeviceCurrentLocation::new(Arc::new(provider));

        assert!(matches!(
            resolver.locate().await,
            Err(ResolutionError::Sensor(_))
        ));
    }

    #[test]
    fn sensor_sends_one_fix_and_releases_the_channel() {
        let position = Coordinate::new(50.6495, 7.0457);
        let (tx, mut rx) = mpsc::unbounded_channel();
        StaticLocationSensor::new(Some(position)).start_updates(tx);

        assert_eq!(
            tokio_test::block_on(rx.recv()),
            Some(SensorUpdate::Locations(vec![position]))
        );
        assert_eq!(tokio_test::block_on(rx.recv()), None);
    }

    #[test]
    fn sensor_is_always_authorized() {
        let sensor = StaticLocationSensor::new(None);
        assert_eq!(
            sensor.authorization_status(),
            AuthorizationStatus::Authorized
        );
    }
}
