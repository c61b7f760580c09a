//! Domain layer for the OpenLS client
//!
//! Contains the value types exchanged with the geographic service: coordinates,
//! addresses, routes, and reachability areas. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
