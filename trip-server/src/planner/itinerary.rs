//! Itinerary computation.
//!
//! Turns a validated trip draft into a stored trip: fetches driving legs
//! from the route provider, walks them forward from a departure anchor or
//! backward from an arrival anchor to assign stop timestamps, and derives
//! total distance and price.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{DomainError, Schedule, Stop, StopId, Trip, TripDraft, TripId};
use crate::routing::{RouteLeg, RouteProvider, RoutingError};

use super::config::EngineConfig;

/// Errors from itinerary computation.
#[derive(Debug, thiserror::Error)]
pub enum ItineraryError {
    /// The draft failed shell validation
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// The backend answered but no route connects the waypoints
    #[error("no route connects the requested stops")]
    NoRoute,

    /// The routing call itself failed
    #[error("routing backend failed: {0}")]
    Routing(RoutingError),
}

/// Computes itineraries using a route provider.
///
/// Stop timestamps are taken from the provider's leg durations, never
/// guessed: if the provider fails, the whole trip creation fails.
pub struct ItineraryEngine<P> {
    provider: P,
    config: EngineConfig,
}

impl<P> ItineraryEngine<P>
where
    P: RouteProvider + Sync,
{
    /// Creates an engine over the given provider.
    pub fn new(provider: P, config: EngineConfig) -> Self {
        Self { provider, config }
    }

    /// Resolves a draft into a trip with timestamps, distance and price.
    ///
    /// The returned trip carries `TripId::UNASSIGNED` and revision zero;
    /// the store fills both in on creation.
    pub async fn plan(&self, draft: TripDraft) -> Result<Trip, ItineraryError> {
        draft.validate()?;

        let legs = self
            .provider
            .route(&draft.route)
            .await
            .map_err(|e| match e {
                RoutingError::NoRoute => ItineraryError::NoRoute,
                other => ItineraryError::Routing(other),
            })?;

        if legs.len() != draft.route.len() - 1 {
            return Err(ItineraryError::Routing(RoutingError::Protocol(format!(
                "expected {} legs, got {}",
                draft.route.len() - 1,
                legs.len()
            ))));
        }
        if let Some(leg) = legs.iter().find(|l| l.duration < Duration::zero()) {
            return Err(ItineraryError::Routing(RoutingError::Protocol(format!(
                "negative leg duration {}",
                leg.duration
            ))));
        }

        let timestamps = stop_timestamps(&draft.schedule, &legs);
        let distance_meters: f64 = legs.iter().map(|l| l.distance_meters).sum();
        let price = round_to_cents(distance_meters / 1000.0 * self.config.price_per_km);

        let stops = draft
            .route
            .iter()
            .zip(timestamps)
            .enumerate()
            .map(|(i, (point, timestamp))| {
                Stop::new(StopId(i as u32), point.clone(), draft.seats, timestamp)
            })
            .collect();

        Ok(Trip {
            id: TripId::UNASSIGNED,
            driver: draft.driver,
            vehicle: draft.vehicle,
            seats: draft.seats,
            schedule: draft.schedule,
            stops,
            distance_meters,
            price,
            details: draft.details,
            revision: 0,
        })
    }
}

/// Assigns one timestamp per stop by walking the legs from the anchor.
///
/// A departure anchor fixes the first stop and accumulates forward; an
/// arrival anchor fixes the last stop and subtracts backward. Durations
/// are non-negative, so timestamps never decrease along the route.
fn stop_timestamps(schedule: &Schedule, legs: &[RouteLeg]) -> Vec<DateTime<Utc>> {
    let mut timestamps = Vec::with_capacity(legs.len() + 1);

    match schedule {
        Schedule::Departure(start) => {
            let mut t = *start;
            timestamps.push(t);
            for leg in legs {
                t += leg.duration;
                timestamps.push(t);
            }
        }
        Schedule::Arrival(end) => {
            let mut t = *end;
            timestamps.push(t);
            for leg in legs.iter().rev() {
                t -= leg.duration;
                timestamps.push(t);
            }
            timestamps.reverse();
        }
    }

    timestamps
}

fn round_to_cents(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}
