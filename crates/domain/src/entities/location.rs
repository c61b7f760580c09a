//! Resolved locations

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::{Address, Coordinate};

/// A geocoder match: a position plus the address it was matched to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedLocation {
    /// Matched position
    pub coordinate: Coordinate,
    /// Matched address
    pub address: Address,
}

impl GeocodedLocation {
    /// Create a geocoded location
    #[must_use]
    pub const fn new(coordinate: Coordinate, address: Address) -> Self {
        Self {
            coordinate,
            address,
        }
    }
}

/// A concrete place with a known coordinate
///
/// This is what a locatable resolves to. The variant records where the
/// coordinate came from so that a route can describe its endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Location {
    /// A plain coordinate, typically typed in by the user
    Coordinate {
        /// Position
        coordinate: Coordinate,
    },
    /// A point picked on the map
    SelectedMapPoint {
        /// Position
        coordinate: Coordinate,
    },
    /// A geocoder result
    Geocoded(GeocodedLocation),
    /// The device position reported by the location sensor
    UserPosition {
        /// Position
        coordinate: Coordinate,
    },
}

impl Location {
    /// The coordinate of this location
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        match self {
            Self::Coordinate { coordinate }
            | Self::SelectedMapPoint { coordinate }
            | Self::UserPosition { coordinate } => *coordinate,
            Self::Geocoded(geocoded) => geocoded.coordinate,
        }
    }

    /// Short label for display next to the coordinate
    #[must_use]
    pub fn title(&self) -> Option<String> {
        match self {
            Self::Coordinate { .. } => None,
            Self::SelectedMapPoint { .. } => Some("Selected Location".to_string()),
            Self::UserPosition { .. } => Some("Current Location".to_string()),
            Self::Geocoded(geocoded) => {
                let title = if geocoded.address.street.is_empty() {
                    &geocoded.address.city
                } else {
                    &geocoded.address.street
                };
                (!title.is_empty()).then(|| title.clone())
            },
        }
    }
}

impl From<Coordinate> for Location {
    fn from(coordinate: Coordinate) -> Self {
        Self::Coordinate { coordinate }
    }
}

impl From<GeocodedLocation> for Location {
    fn from(geocoded: GeocodedLocation) -> Self {
        Self::Geocoded(geocoded)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.title() {
            Some(title) => write!(f, "{title} ({})", self.coordinate()),
            None => write!(f, "{}", self.coordinate()),
        }
    }
}
