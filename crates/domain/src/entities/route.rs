//! Route entity

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::entities::location::Location;
use crate::value_objects::{Coordinate, TransportationMode};

/// Options applied to a route request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteOptions {
    /// How the traveller moves
    pub transportation_mode: TransportationMode,
}

impl RouteOptions {
    /// Options for the given mode
    #[must_use]
    pub const fn new(transportation_mode: TransportationMode) -> Self {
        Self {
            transportation_mode,
        }
    }
}

/// Route geometry and summary as decoded from a route response
///
/// Carries no endpoints; see [`Route`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutePath {
    /// Waypoints in path order
    pub waypoints: Vec<Coordinate>,
    /// Total travel time, if reported and parseable
    pub duration: Option<Duration>,
    /// Total distance in meters, if reported and parseable
    pub distance: Option<f64>,
}

/// A route between two resolved locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Where the route starts
    pub origin: Location,
    /// Where the route ends
    pub destination: Location,
    /// Options the route was requested with
    pub options: RouteOptions,
    /// Waypoints in path order; may be empty
    pub waypoints: Vec<Coordinate>,
    /// Total travel time
    pub duration: Option<Duration>,
    /// Total distance in meters
    pub distance: Option<f64>,
}

impl Route {
    /// Attach endpoints and options to a decoded path
    #[must_use]
    pub fn new(
        origin: Location,
        destination: Location,
        options: RouteOptions,
        path: RoutePath,
    ) -> Self {
        Self {
            origin,
            destination,
            options,
            waypoints: path.waypoints,
            duration: path.duration,
            distance: path.distance,
        }
    }

    /// Whether the route carries no waypoints
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Travel time in whole minutes, rounded down
    #[must_use]
    pub fn duration_minutes(&self) -> Option<u64> {
        self.duration.map(|d| d.as_secs() / 60)
    }

    /// Distance in kilometers
    #[must_use]
    pub fn distance_km(&self) -> Option<f64> {
        self.distance.map(|m| m / 1000.0)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {} ({}, {} waypoints",
            self.origin,
            self.destination,
            self.options.transportation_mode,
            self.waypoints.len()
        )?;
        if let Some(km) = self.distance_km() {
            write!(f, ", {km:.1} km")?;
        }
        if let Some(minutes) = self.duration_minutes() {
            write!(f, ", {minutes} min")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(path: RoutePath) -> Route {
        Route::new(
            Coordinate::new(49.41, 8.69).into(),
            Coordinate::new(49.42, 8.70).into(),
            RouteOptions::new(TransportationMode::Bicycle),
            path,
        )
    }

    #[test]
    fn route_takes_path_fields() {
        let path = RoutePath {
            waypoints: vec![Coordinate::new(49.41, 8.69), Coordinate::new(49.42, 8.70)],
            duration: Some(Duration::from_secs(23932)),
            distance: Some(84_000.0),
        };
        let route = route(path);
        assert_eq!(route.waypoints.len(), 2);
        assert_eq!(route.duration_minutes(), Some(398));
        assert_eq!(route.distance_km(), Some(84.0));
        assert!(!route.is_empty());
    }

    #[test]
    fn empty_route_is_a_value() {
        let route = route(RoutePath::default());
        assert!(route.is_empty());
        assert_eq!(route.duration_minutes(), None);
        assert_eq!(route.distance_km(), None);
    }

    #[test]
    fn display_summary() {
        let route = route(RoutePath {
            waypoints: vec![Coordinate::new(49.41, 8.69)],
            duration: Some(Duration::from_secs(600)),
            distance: Some(2500.0),
        });
        let display = route.to_string();
        assert!(display.contains("bicycle"));
        assert!(display.contains("1 waypoints"));
        assert!(display.contains("2.5 km"));
        assert!(display.contains("10 min"));
    }

    #[test]
    fn default_options_are_pedestrian() {
        assert_eq!(
            RouteOptions::default().transportation_mode,
            TransportationMode::Pedestrian
        );
    }
}
