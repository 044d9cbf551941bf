//! Seat reservation requests.

use super::{DomainError, MAX_SEATS, MIN_SEATS, RiderId, StopId, TripId};

/// A rider's request to occupy seats over a span of stops.
///
/// The span is half open: seats are taken at every stop from `source` up
/// to but not including `destination`. Stop ids follow route order, so a
/// valid span always has `source < destination`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    /// The trip the seats are reserved on.
    pub trip: TripId,
    /// Who the seats are for.
    pub rider: RiderId,
    /// Stop where the rider boards.
    pub source: StopId,
    /// Stop where the rider gets off.
    pub destination: StopId,
    /// Number of seats requested.
    pub seats: u8,
}

impl Reservation {
    /// Constructs a reservation, validating the seat count and span order.
    pub fn new(
        trip: TripId,
        rider: RiderId,
        source: StopId,
        destination: StopId,
        seats: u8,
    ) -> Result<Self, DomainError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&seats) {
            return Err(DomainError::SeatsOutOfRange(seats));
        }
        if source >= destination {
            return Err(DomainError::InvalidSpan);
        }
        Ok(Self {
            trip,
            rider,
            source,
            destination,
            seats,
        })
    }
}
