//! Reachability areas

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::value_objects::Coordinate;

/// Border of the area reachable within a time threshold
///
/// The border is a closed ring; the first point is not necessarily repeated
/// at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Isochrone {
    /// Time threshold
    pub time: Duration,
    /// Polygon border in ring order
    pub border: Vec<Coordinate>,
}

/// Result of an accessibility analysis around an origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessibleArea {
    /// Analysis origin
    pub origin: Coordinate,
    /// Isochrones in response order
    pub isochrones: Vec<Isochrone>,
}

impl AccessibleArea {
    /// The isochrone with the largest time threshold
    #[must_use]
    pub fn outermost(&self) -> Option<&Isochrone> {
        self.isochrones.iter().max_by_key(|isochrone| isochrone.time)
    }
}
