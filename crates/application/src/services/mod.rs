//! Application services - Use case implementations

mod current_location;
mod live_search;
mod routing_service;

pub use current_location::DeviceCurrentLocation;
pub use live_search::{LiveSearch, SearchOutcome};
pub use routing_service::RoutingService;
