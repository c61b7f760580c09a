//! Value objects

mod address;
mod coordinate;
mod transportation_mode;

pub use address::Address;
pub use coordinate::Coordinate;
pub use transportation_mode::TransportationMode;
