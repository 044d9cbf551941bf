//! Trip aggregate.
//!
//! `TripDraft` is what a driver submits; `Trip` is the stored aggregate
//! after the itinerary engine has resolved stop timestamps, distance and
//! price from the routing provider.

use chrono::{DateTime, Utc};

use super::{
    DomainError, DriverId, Point, RideDetails, Schedule, Stop, StopId, TripId, VehicleId,
};

/// Minimum number of seats a driver can offer.
pub const MIN_SEATS: u8 = 1;

/// Maximum number of seats a driver can offer.
pub const MAX_SEATS: u8 = 10;

/// Minimum number of stops on a route.
pub const MIN_STOPS: usize = 2;

/// A trip as submitted by a driver, before the itinerary is computed.
#[derive(Debug, Clone)]
pub struct TripDraft {
    /// Driver offering the trip.
    pub driver: DriverId,
    /// Vehicle used for the trip.
    pub vehicle: VehicleId,
    /// Seats offered on every leg.
    pub seats: u8,
    /// Departure or arrival anchor.
    pub schedule: Schedule,
    /// Route waypoints in travel order.
    pub route: Vec<Point>,
    /// Cargo allowance.
    pub details: RideDetails,
}

impl TripDraft {
    /// Checks the shell of the draft before any routing work is done.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&self.seats) {
            return Err(DomainError::SeatsOutOfRange(self.seats));
        }
        if self.route.len() < MIN_STOPS {
            return Err(DomainError::TooFewStops(self.route.len()));
        }
        Ok(())
    }
}

/// A trip with a computed itinerary.
///
/// Stops are in route order, their ids match their position, and their
/// timestamps never decrease. Every mutation goes through the store, which
/// bumps `revision` so concurrent writers cannot silently overwrite each
/// other.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    /// Store-assigned identifier, `TripId::UNASSIGNED` until persisted.
    pub id: TripId,
    /// Driver offering the trip.
    pub driver: DriverId,
    /// Vehicle used for the trip.
    pub vehicle: VehicleId,
    /// Total seats offered; per-stop availability lives on the stops.
    pub seats: u8,
    /// Departure or arrival anchor the itinerary was computed from.
    pub schedule: Schedule,
    /// Stops in route order.
    pub stops: Vec<Stop>,
    /// Length of the full route in meters.
    pub distance_meters: f64,
    /// Price for the full route.
    pub price: f64,
    /// Cargo allowance.
    pub details: RideDetails,
    /// Store revision, bumped on every successful update.
    pub revision: u64,
}

impl Trip {
    /// When the trip leaves its first stop.
    pub fn departure(&self) -> Option<DateTime<Utc>> {
        self.stops.first().map(|s| s.timestamp)
    }

    /// When the trip reaches its last stop.
    pub fn arrival(&self) -> Option<DateTime<Utc>> {
        self.stops.last().map(|s| s.timestamp)
    }

    /// The final stop of the route.
    pub fn final_stop(&self) -> Option<&Stop> {
        self.stops.last()
    }

    /// Looks up a stop by id.
    pub fn stop(&self, id: StopId) -> Option<&Stop> {
        self.stops.iter().find(|s| s.id == id)
    }

    /// Position of a stop within the route.
    pub fn stop_index(&self, id: StopId) -> Option<usize> {
        self.stops.iter().position(|s| s.id == id)
    }

    /// Whether the trip is full, meaning nobody can board at the origin.
    ///
    /// Later stops may still have seats for partial spans; the flag only
    /// tracks the origin.
    pub fn is_full(&self) -> bool {
        self.stops.first().map_or(true, |s| s.remaining_seats == 0)
    }
}
