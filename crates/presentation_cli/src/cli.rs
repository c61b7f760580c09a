//! Command-line arguments

use std::str::FromStr;

use clap::{Parser, Subcommand};
use domain::{Coordinate, TransportationMode};

/// OpenLS command-line client
#[derive(Debug, Parser)]
#[command(name = "openls-cli")]
#[command(author, version, about = "Routes, geocoding and reachability from the OpenLS service", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Override the service base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compute a route between two endpoints
    ///
    /// Endpoints are "lat,lon", "here" for the configured device position,
    /// or free-form address text (the first geocoder match is used).
    /// Example: openls-cli route "49.4179,8.6753" "Bergheimer Straße, Heidelberg"
    Route {
        /// Start of the route
        #[arg(allow_hyphen_values = true)]
        from: Endpoint,

        /// End of the route
        #[arg(allow_hyphen_values = true)]
        to: Endpoint,

        /// Transportation mode
        #[arg(short, long, default_value = "pedestrian")]
        mode: TransportationMode,
    },

    /// Look up an address
    Geocode {
        /// Free-form address text
        address: String,

        /// Maximum number of candidates
        #[arg(long)]
        max: Option<u32>,
    },

    /// Compute the area reachable from an endpoint
    Accessibility {
        /// Analysis origin
        #[arg(allow_hyphen_values = true)]
        from: Endpoint,

        /// Transportation mode
        #[arg(short, long, default_value = "bicycle")]
        mode: TransportationMode,

        /// Time budget in minutes (configured default if omitted)
        #[arg(long)]
        minutes: Option<u64>,

        /// Isochrone spacing in minutes (configured default if omitted)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Replay a sequence of search terms as if typed into a search field
    ///
    /// Only the results for the last term are printed.
    /// Example: openls-cli search B Bo Bon Bonn
    Search {
        /// Terms in typing order
        #[arg(required = true)]
        terms: Vec<String>,

        /// Pause between terms in milliseconds
        #[arg(long, default_value = "150")]
        delay_ms: u64,
    },
}

/// A route or analysis endpoint as given on the command line
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    /// The device position
    Here,
    /// A literal coordinate
    Coordinate(Coordinate),
    /// Address text to geocode
    Address(String),
}

impl FromStr for Endpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("endpoint must not be empty".to_string());
        }
        if s.eq_ignore_ascii_case("here") {
            return Ok(Self::Here);
        }
        match s.parse::<Coordinate>() {
            Ok(coordinate) if coordinate.is_valid() => Ok(Self::Coordinate(coordinate)),
            Ok(coordinate) => Err(format!("coordinate {coordinate} is out of range")),
            Err(_) => Ok(Self::Address(s.to_string())),
        }
    }
}

/// Determine log filter level from verbosity count
pub const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}
