//! OpenLS integration
//!
//! Client for the Heidelberg OpenLS service (`openls.geog.uni-heidelberg.de`),
//! which answers route, geocode and accessibility ("isochrone") queries with
//! OGC-style namespaced XML.
//!
//! # Architecture
//!
//! [`OpenLsTarget`] describes a request (path and query parameters) and turns
//! into a [`ServiceRequest`]. A [`Transport`] sends it and returns the raw
//! status and body; [`ReqwestTransport`] is the HTTP implementation. The
//! decoders in [`decode`] walk the XML tree built by [`xml::XmlElement`] and
//! produce domain values. [`OpenLsClient`] ties the three together and
//! classifies failures as [`OpenLsError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::{Coordinate, TransportationMode};
//! use integration_openls::{OpenLsClient, OpenLsConfig};
//!
//! let client = OpenLsClient::new(&OpenLsConfig::default())?;
//! let path = client
//!     .route(
//!         Coordinate::new(49.4179, 8.6753),
//!         Coordinate::new(49.4093, 8.6937),
//!         TransportationMode::Bicycle,
//!     )
//!     .await?;
//! ```

mod client;
mod config;
pub mod decode;
mod error;
pub mod parse;
mod target;
mod transport;
pub mod xml;

pub use client::OpenLsClient;
pub use config::OpenLsConfig;
pub use error::OpenLsError;
pub use target::{OpenLsTarget, route_preference};
pub use transport::{ReqwestTransport, ServiceRequest, ServiceResponse, Transport};
