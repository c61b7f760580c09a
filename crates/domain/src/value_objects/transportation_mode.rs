//! Transportation mode value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// How the traveller moves along a route
///
/// The persisted preference index (see [`TransportationMode::index`]) is a
/// stable contract: 0 = pedestrian, 1 = bicycle, 2 = wheelchair, 3 = car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportationMode {
    /// On foot
    #[default]
    Pedestrian,
    /// By bicycle
    Bicycle,
    /// By wheelchair
    Wheelchair,
    /// By car
    Car,
}

impl TransportationMode {
    /// All modes in index order
    pub const ALL: [Self; 4] = [Self::Pedestrian, Self::Bicycle, Self::Wheelchair, Self::Car];

    /// Persisted preference index
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Pedestrian => 0,
            Self::Bicycle => 1,
            Self::Wheelchair => 2,
            Self::Car => 3,
        }
    }

    /// Mode for a persisted preference index
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Pedestrian),
            1 => Some(Self::Bicycle),
            2 => Some(Self::Wheelchair),
            3 => Some(Self::Car),
            _ => None,
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Pedestrian => "On foot",
            Self::Bicycle => "Bicycle",
            Self::Wheelchair => "Wheelchair",
            Self::Car => "Car",
        }
    }
}

impl fmt::Display for TransportationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pedestrian => write!(f, "pedestrian"),
            Self::Bicycle => write!(f, "bicycle"),
            Self::Wheelchair => write!(f, "wheelchair"),
            Self::Car => write!(f, "car"),
        }
    }
}

impl FromStr for TransportationMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pedestrian" | "foot" | "walk" => Ok(Self::Pedestrian),
            "bicycle" | "bike" => Ok(Self::Bicycle),
            "wheelchair" => Ok(Self::Wheelchair),
            "car" => Ok(Self::Car),
            _ => Err(DomainError::InvalidTransportationMode(s.to_string())),
        }
    }
}

impl TryFrom<u8> for TransportationMode {
    type Error = DomainError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(index)
            .ok_or_else(|| DomainError::InvalidTransportationMode(index.to_string()))
    }
}
