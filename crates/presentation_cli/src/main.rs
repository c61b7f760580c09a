//! OpenLS CLI
//!
//! Command-line client for routes, geocoding, reachability analysis and
//! live search against the OpenLS service.

#![allow(clippy::print_stdout)]

mod cli;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use application::{DeviceCurrentLocation, LiveSearch, Locatable, RoutingService};
use clap::Parser;
use domain::{AccessibleArea, GeocodedLocation, Route, RouteOptions};
use infrastructure::{AppConfig, OpenLsGeoAdapter, StaticLocationSensorProvider, init_tracing};
use tracing::debug;

use crate::cli::{Cli, Commands, Endpoint, log_filter_from_verbosity};

/// Everything a command needs
struct App {
    config: AppConfig,
    routing: RoutingService,
    geo: Arc<OpenLsGeoAdapter>,
    json: bool,
}

impl App {
    /// Build the adapter and services from a validated configuration
    fn new(config: AppConfig, json: bool) -> anyhow::Result<Self> {
        let geo = Arc::new(OpenLsGeoAdapter::new(&config.service)?);
        Ok(Self {
            routing: RoutingService::new(geo.clone()),
            geo,
            config,
            json,
        })
    }

    /// Live search over the same adapter
    fn live_search(&self) -> LiveSearch {
        LiveSearch::new(self.geo.clone()).with_max_results(self.config.service.max_geocode_results)
    }

    /// Turn a command-line endpoint into a locatable
    async fn locatable(&self, endpoint: Endpoint) -> anyhow::Result<Box<dyn Locatable>> {
        match endpoint {
            Endpoint::Here => {
                let provider = StaticLocationSensorProvider::new(self.config.location.position);
                let mut resolver = DeviceCurrentLocation::new(Arc::new(provider));
                if let Some(limit) = self.config.location.fix_timeout() {
                    resolver = resolver.with_timeout(limit);
                }
                Ok(Box::new(resolver))
            },
            Endpoint::Coordinate(coordinate) => Ok(Box::new(coordinate)),
            Endpoint::Address(address) => {
                let candidates = self
                    .routing
                    .geocode(&address, Some(1))
                    .await
                    .with_context(|| format!("Geocoding \"{address}\" failed"))?;
                let Some(first) = candidates.into_iter().next() else {
                    bail!("No match for \"{address}\"");
                };
                debug!(%address, coordinate = %first.coordinate, "Endpoint geocoded");
                Ok(Box::new(first))
            },
        }
    }
}

fn print_route(route: &Route) {
    println!("🗺️  {route}");
    for (i, waypoint) in route.waypoints.iter().enumerate() {
        println!("  {:>3}. {waypoint}", i + 1);
    }
}

fn print_candidates(candidates: &[GeocodedLocation]) {
    if candidates.is_empty() {
        println!("No matches");
        return;
    }
    for (i, candidate) in candidates.iter().enumerate() {
        let title = candidate.address.formatted().replace('\n', ", ");
        println!("{:>3}. {title} ({})", i + 1, candidate.coordinate);
    }
}

fn print_area(area: &AccessibleArea) {
    println!("📍 {}", area.origin);
    if area.isochrones.is_empty() {
        println!("No isochrones");
    }
    for isochrone in &area.isochrones {
        println!(
            "  {:>4} min: {} border points",
            isochrone.time.as_secs() / 60,
            isochrone.border.len()
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config.service.base_url = base_url;
    }
    config.validate().map_err(anyhow::Error::msg)?;

    // Set up logging based on verbosity
    let filter = log_filter_from_verbosity(cli.verbose).unwrap_or(config.logging.filter.as_str());
    init_tracing(filter, config.logging.json)?;

    let app = App::new(config, cli.json)?;

    match cli.command {
        Commands::Route { from, to, mode } => {
            let origin = app.locatable(from).await?;
            let destination = app.locatable(to).await?;
            let route = app
                .routing
                .request_route(origin.as_ref(), destination.as_ref(), RouteOptions::new(mode))
                .await?;

            if app.json {
                println!("{}", serde_json::to_string_pretty(&route)?);
            } else {
                print_route(&route);
            }
        },

        Commands::Geocode { address, max } => {
            let candidates = app.routing.geocode(&address, max).await?;

            if app.json {
                println!("{}", serde_json::to_string_pretty(&candidates)?);
            } else {
                print_candidates(&candidates);
            }
        },

        Commands::Accessibility {
            from,
            mode,
            minutes,
            interval,
        } => {
            let service = &app.config.service;
            let time_budget = minutes.map_or(Duration::from_secs(service.time_budget_secs), |m| {
                Duration::from_secs(m * 60)
            });
            let interval = interval.map_or(Duration::from_secs(service.interval_secs), |m| {
                Duration::from_secs(m * 60)
            });

            let origin = app.locatable(from).await?;
            let area = app
                .routing
                .accessible_area_around(origin.as_ref(), mode, time_budget, interval)
                .await?;

            if app.json {
                println!("{}", serde_json::to_string_pretty(&area)?);
            } else {
                print_area(&area);
            }
        },

        Commands::Search { terms, delay_ms } => {
            let search = Arc::new(app.live_search());
            for term in &terms {
                debug!(%term, "Search term changed");
                search.submit(term);
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
            search.settle().await;

            if let Some(error) = search.last_error() {
                bail!("Search for \"{}\" failed: {error}", search.current_term());
            }
            let results = search.results();
            if app.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                println!("🔎 {}", search.current_term());
                print_candidates(&results);
            }
        },
    }

    Ok(())
}
