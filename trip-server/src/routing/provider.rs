//! Routing provider seam.

use std::future::Future;

use chrono::Duration;

use crate::domain::Point;

use super::error::RoutingError;

/// One driving leg between two consecutive waypoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteLeg {
    /// Travel time for the leg.
    pub duration: Duration,
    /// Driven distance for the leg, in meters.
    pub distance_meters: f64,
}

/// Source of driving legs through an ordered list of waypoints.
///
/// Implementations return exactly one leg per consecutive waypoint pair,
/// in route order. A provider that cannot connect the waypoints reports
/// `RoutingError::NoRoute` rather than inventing zero-length legs.
pub trait RouteProvider {
    /// Fetches the legs for a route through `waypoints`.
    fn route(
        &self,
        waypoints: &[Point],
    ) -> impl Future<Output = Result<Vec<RouteLeg>, RoutingError>> + Send;
}
