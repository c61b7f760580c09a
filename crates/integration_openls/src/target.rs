//! Request targets
//!
//! Each [`OpenLsTarget`] knows its path and query parameters. The parameter
//! names (including the `FreeFormAdress` spelling) are fixed by the service.

use std::time::Duration;

use domain::{Coordinate, TransportationMode};
use reqwest::Method;

use crate::config::OpenLsConfig;
use crate::transport::ServiceRequest;

/// A request the service understands
#[derive(Debug, Clone, PartialEq)]
pub enum OpenLsTarget {
    /// Route between two coordinates
    Route {
        /// Start of the route
        start: Coordinate,
        /// End of the route
        end: Coordinate,
        /// Routing preference
        transportation_mode: TransportationMode,
    },
    /// Free-form address lookup
    Geocode {
        /// Address text as typed by the user
        free_form_address: String,
        /// Maximum number of candidates
        max_responses: u32,
    },
    /// Reachability analysis around a position
    Accessibility {
        /// Analysis origin
        position: Coordinate,
        /// Routing preference
        transportation_mode: TransportationMode,
        /// Largest time threshold, sent in whole minutes
        time_budget: Duration,
        /// Spacing between isochrones
        interval: Duration,
    },
}

/// Routing preference identifier for a transportation mode
#[must_use]
pub const fn route_preference(mode: TransportationMode) -> &'static str {
    match mode {
        TransportationMode::Pedestrian => "Pedestrian",
        TransportationMode::Bicycle => "Bicycle",
        TransportationMode::Wheelchair => "Wheelchair",
        TransportationMode::Car => "Car",
    }
}

impl OpenLsTarget {
    /// Path relative to the service base URL
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Route { .. } => "/route",
            Self::Geocode { .. } => "/geocode",
            Self::Accessibility { .. } => "/analyse",
        }
    }

    /// Query parameters in the order the service documents them
    #[must_use]
    pub fn parameters(&self, language: &str) -> Vec<(&'static str, String)> {
        match self {
            Self::Route {
                start,
                end,
                transportation_mode,
            } => vec![
                ("start", start.to_lon_lat_param()),
                ("end", end.to_lon_lat_param()),
                ("via", String::new()),
                ("lang", language.to_string()),
                ("distunit", "KM".to_string()),
                ("routepref", route_preference(*transportation_mode).to_string()),
                ("weighting", "Recommended".to_string()),
                ("avoidAreas", String::new()),
                ("useTMC", "false".to_string()),
                ("noMotorways", "false".to_string()),
                ("noTollways", "false".to_string()),
                ("noUnpavedroads", "false".to_string()),
                ("noSteps", "false".to_string()),
                ("noFerries", "false".to_string()),
                ("instructions", "false".to_string()),
            ],
            Self::Geocode {
                free_form_address,
                max_responses,
            } => vec![
                ("FreeFormAdress", free_form_address.clone()),
                ("MaxResponse", max_responses.to_string()),
            ],
            Self::Accessibility {
                position,
                transportation_mode,
                time_budget,
                interval,
            } => vec![
                ("position", position.to_lon_lat_param()),
                ("routePreference", route_preference(*transportation_mode).to_string()),
                ("minutes", (time_budget.as_secs() / 60).to_string()),
                ("method", "TIN".to_string()),
                ("interval", interval.as_secs().to_string()),
            ],
        }
    }

    /// Build the request against the configured service
    #[must_use]
    pub fn request(&self, config: &OpenLsConfig) -> ServiceRequest {
        ServiceRequest {
            base_url: config.base_url.clone(),
            path: self.path().to_string(),
            method: Method::GET,
            parameters: self
                .parameters(&config.language)
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        }
    }
}
