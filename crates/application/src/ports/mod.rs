//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod geo_service_port;
mod locatable;
mod location_sensor;

#[cfg(test)]
pub use geo_service_port::MockGeoServicePort;
pub use geo_service_port::GeoServicePort;
pub use locatable::Locatable;
pub use location_sensor::{
    AuthorizationStatus, LocationSensor, LocationSensorProvider, SensorUpdate,
};
