//! Domain entities

mod accessible_area;
mod location;
mod route;

pub use accessible_area::{AccessibleArea, Isochrone};
pub use location::{GeocodedLocation, Location};
pub use route::{Route, RouteOptions, RoutePath};
