//! A single stop on a trip's route.

use chrono::{DateTime, Utc};

use super::{Point, StopId};

/// A stop on a trip's route.
///
/// `remaining_seats` counts seats still free on the leg that leaves this
/// stop. A rider travelling from stop `a` to stop `b` occupies one seat at
/// every stop from `a` up to but not including `b`, so the counter on the
/// final stop never gates a reservation.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    /// Position of the stop within the trip, assigned in route order.
    pub id: StopId,
    /// Where the stop is.
    pub point: Point,
    /// Seats still free on the leg leaving this stop.
    pub remaining_seats: u8,
    /// When the trip reaches this stop.
    pub timestamp: DateTime<Utc>,
}

impl Stop {
    /// Creates a stop.
    pub fn new(id: StopId, point: Point, remaining_seats: u8, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            point,
            remaining_seats,
            timestamp,
        }
    }

    /// Whether at least `seats` seats are free on the leg leaving this stop.
    pub fn has_seats(&self, seats: u8) -> bool {
        self.remaining_seats >= seats
    }
}
