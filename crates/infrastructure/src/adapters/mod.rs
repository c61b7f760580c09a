//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod openls_adapter;
mod static_location_sensor;

pub use openls_adapter::OpenLsGeoAdapter;
pub use static_location_sensor::{StaticLocationSensor, StaticLocationSensorProvider};
