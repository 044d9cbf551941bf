//! Seat accounting over reservation spans.
//!
//! A reservation occupies seats at every stop from its source up to but
//! not including its destination. Both mutations are all or nothing: the
//! whole span is checked before any counter changes, so a failed call
//! leaves the trip exactly as it was.

use std::ops::Range;

use crate::domain::{Reservation, StopId, Trip};

/// Errors from seat accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CapacityError {
    /// Referenced stop does not belong to the trip
    #[error("stop {0} is not on the trip")]
    UnknownStop(StopId),

    /// Span is empty or runs against route order
    #[error("reservation source stop must precede its destination stop")]
    InvalidSpan,

    /// At least one stop in the span lacks the requested seats
    #[error("not enough seats between the requested stops")]
    Insufficient,

    /// Releasing would push a stop above the trip's total capacity
    #[error("released seats would exceed the trip's capacity")]
    OverCapacity,
}

/// Takes the reserved seats out of every stop in the span.
///
/// Fails without modifying the trip if any stop in the span has fewer
/// free seats than requested.
pub fn reserve(trip: &mut Trip, reservation: &Reservation) -> Result<(), CapacityError> {
    let span = span_indices(trip, reservation.source, reservation.destination)?;

    if trip.stops[span.clone()]
        .iter()
        .any(|s| s.remaining_seats < reservation.seats)
    {
        return Err(CapacityError::Insufficient);
    }

    for stop in &mut trip.stops[span] {
        stop.remaining_seats -= reservation.seats;
    }
    Ok(())
}

/// Gives the reserved seats back to every stop in the span.
///
/// Fails without modifying the trip if any stop in the span would end up
/// above the trip's total seat count, which means the span or seat count
/// does not match an earlier reservation.
pub fn release(trip: &mut Trip, reservation: &Reservation) -> Result<(), CapacityError> {
    let span = span_indices(trip, reservation.source, reservation.destination)?;

    if trip.stops[span.clone()]
        .iter()
        .any(|s| s.remaining_seats + reservation.seats > trip.seats)
    {
        return Err(CapacityError::OverCapacity);
    }

    for stop in &mut trip.stops[span] {
        stop.remaining_seats += reservation.seats;
    }
    Ok(())
}

/// Resolves a half-open stop span to stop indices.
fn span_indices(
    trip: &Trip,
    source: StopId,
    destination: StopId,
) -> Result<Range<usize>, CapacityError> {
    let from = trip
        .stop_index(source)
        .ok_or(CapacityError::UnknownStop(source))?;
    let to = trip
        .stop_index(destination)
        .ok_or(CapacityError::UnknownStop(destination))?;

    if from >= to {
        return Err(CapacityError::InvalidSpan);
    }
    Ok(from..to)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use super::tests_support::make_trip_with_seats;
    use crate::domain::{Reservation, RiderId, TripId};
    use proptest::prelude::*;

    proptest! {
        /// Reserving and then releasing the same span restores every counter.
        #[test]
        fn reserve_release_round_trips(
            stop_count in 2usize..8,
            seats in 1u8..=10,
            request in 1u8..=10,
            from in 0u32..7,
            len in 1u32..7,
        ) {
            let mut trip = make_trip_with_seats(seats, stop_count);
            let to = from + len;

            let Ok(r) = Reservation::new(
                TripId(1),
                RiderId::parse("u-1").unwrap(),
                StopId(from),
                StopId(to),
                request,
            ) else {
                return Ok(());
            };

            let before: Vec<u8> = trip.stops.iter().map(|s| s.remaining_seats).collect();

            if reserve(&mut trip, &r).is_ok() {
                prop_assert!(release(&mut trip, &r).is_ok());
            }

            let after: Vec<u8> = trip.stops.iter().map(|s| s.remaining_seats).collect();
            prop_assert_eq!(before, after);
        }

        /// A failed reserve never changes any counter.
        #[test]
        fn failed_reserve_is_a_no_op(
            stop_count in 2usize..6,
            seats in 1u8..=4,
            request in 5u8..=10,
        ) {
            let mut trip = make_trip_with_seats(seats, stop_count);
            let r = Reservation::new(
                TripId(1),
                RiderId::parse("u-1").unwrap(),
                StopId(0),
                StopId(1),
                request,
            ).unwrap();

            let before: Vec<u8> = trip.stops.iter().map(|s| s.remaining_seats).collect();
            prop_assert!(reserve(&mut trip, &r).is_err());
            let after: Vec<u8> = trip.stops.iter().map(|s| s.remaining_seats).collect();
            prop_assert_eq!(before, after);
        }
    }
}
