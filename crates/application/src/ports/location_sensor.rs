//! Location sensor port
//!
//! The device positioning hardware, seen through a start/stop subscription
//! that pushes updates into a channel. Each resolution attempt asks the
//! [`LocationSensorProvider`] for its own sensor handle.

use domain::Coordinate;
use tokio::sync::mpsc;

/// Authorization state of the location sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorizationStatus {
    /// The user has not been asked yet
    #[default]
    NotDetermined,
    /// Access was refused
    Denied,
    /// Access was granted
    Authorized,
}

/// An update pushed by a running sensor
#[derive(Debug, Clone, PartialEq)]
pub enum SensorUpdate {
    /// New fixes, oldest first
    Locations(Vec<Coordinate>),
    /// The sensor failed
    Error(String),
}

/// A location sensor handle
pub trait LocationSensor: Send + Sync {
    /// Current authorization state
    fn authorization_status(&self) -> AuthorizationStatus;

    /// Ask the user for access
    fn request_authorization(&self);

    /// Start delivering updates into `updates`
    fn start_updates(&self, updates: mpsc::UnboundedSender<SensorUpdate>);

    /// Stop delivering updates
    fn stop_updates(&self);
}

/// Hands out sensor handles
pub trait LocationSensorProvider: Send + Sync {
    /// Create a fresh sensor handle for one resolution attempt
    fn create_sensor(&self) -> Box<dyn LocationSensor>;
}
