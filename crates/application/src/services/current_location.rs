//! Current device location
//!
//! Resolves the user's position through the location sensor. Each call to
//! [`Locatable::locate`] takes a fresh sensor from the provider, waits for
//! the first update and stops the sensor again on every exit path,
//! including the caller dropping the pending future.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::Location;
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

use crate::error::ResolutionError;
use crate::ports::{
    AuthorizationStatus, Locatable, LocationSensor, LocationSensorProvider, SensorUpdate,
};

/// A running sensor subscription
///
/// Owns the sensor handle and stops updates when dropped.
struct SensorSubscription {
    sensor: Box<dyn LocationSensor>,
    updates: mpsc::UnboundedReceiver<SensorUpdate>,
}

impl SensorSubscription {
    fn start(sensor: Box<dyn LocationSensor>) -> Self {
        let (tx, updates) = mpsc::unbounded_channel();
        sensor.start_updates(tx);
        Self { sensor, updates }
    }

    async fn next_update(&mut self) -> Option<SensorUpdate> {
        self.updates.recv().await
    }
}

impl Drop for SensorSubscription {
    fn drop(&mut self) {
        self.sensor.stop_updates();
        debug!("Location updates stopped");
    }
}

/// The device position as a [`Locatable`]
pub struct DeviceCurrentLocation {
    provider: Arc<dyn LocationSensorProvider>,
    fix_timeout: Option<Duration>,
}

impl fmt::Debug for DeviceCurrentLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceCurrentLocation")
            .field("fix_timeout", &self.fix_timeout)
            .finish_non_exhaustive()
    }
}

impl DeviceCurrentLocation {
    /// Create a resolver that waits for the first fix without a time limit
    #[must_use]
    pub fn new(provider: Arc<dyn LocationSensorProvider>) -> Self {
        Self {
            provider,
            fix_timeout: None,
        }
    }

    /// Fail with [`ResolutionError::Timeout`] if no update arrives in time
    #[must_use]
    pub const fn with_timeout(mut self, fix_timeout: Duration) -> Self {
        self.fix_timeout = Some(fix_timeout);
        self
    }
}

#[async_trait]
impl Locatable for DeviceCurrentLocation {
    #[instrument(skip(self))]
    async fn locate(&self) -> Result<Location, ResolutionError> {
        let sensor = self.provider.create_sensor();

        match sensor.authorization_status() {
            AuthorizationStatus::Denied => {
                warn!("Location access denied");
                return Err(ResolutionError::PermissionDenied);
            },
            AuthorizationStatus::NotDetermined => {
                debug!("Requesting location authorization");
                sensor.request_authorization();
            },
            AuthorizationStatus::Authorized => {},
        }

        let mut subscription = SensorSubscription::start(sensor);
        let update = match self.fix_timeout {
            Some(limit) => tokio::time::timeout(limit, subscription.next_update())
                .await
                .map_err(|_| {
                    warn!(?limit, "No location fix in time");
                    ResolutionError::Timeout
                })?,
            None => subscription.next_update().await,
        };
        drop(subscription);

        match update {
            Some(SensorUpdate::Locations(fixes)) => {
                let coordinate = fixes.first().copied().ok_or_else(|| {
                    warn!("Sensor update carried no fix");
                    ResolutionError::LocationUnknown
                })?;
                debug!(%coordinate, "Resolved current location");
                Ok(Location::UserPosition { coordinate })
            },
            Some(SensorUpdate::Error(message)) => {
                warn!(%message, "Location sensor failed");
                Err(ResolutionError::Sensor(message))
            },
            None => Err(ResolutionError::SensorClosed),
        }
    }
}
