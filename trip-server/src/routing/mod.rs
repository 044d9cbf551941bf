//! Route computation against an external routing backend.
//!
//! The itinerary engine only sees the `RouteProvider` trait; the OSRM
//! client is the production implementation and the mock provider serves
//! tests and local development.

mod client;
mod error;
mod mock;
mod provider;

pub use client::{OsrmClient, OsrmConfig};
pub use error::RoutingError;
pub use mock::{MockFailure, MockRouteProvider};
pub use provider::{RouteLeg, RouteProvider};
