//! Reservation service.
//!
//! Applies seat reservations and releases on top of the trip store's
//! optimistic revision check. A write that loses a race is retried a
//! few times from a fresh read before the conflict is surfaced.

use crate::domain::{Reservation, Trip};
use crate::notify::{ChangeNotifier, TripEvent};
use crate::planner::{self, CapacityError};
use crate::store::{StoreError, TripStore};

use super::ServiceError;

/// Re-reads before giving up on a concurrently modified trip.
const MAX_ATTEMPTS: u32 = 3;

/// Books and cancels seat spans on stored trips.
pub struct ReservationService<S, N> {
    store: S,
    notifier: N,
}

impl<S, N> ReservationService<S, N>
where
    S: TripStore + Sync,
    N: ChangeNotifier + Sync,
{
    pub fn new(store: S, notifier: N) -> Self {
        Self { store, notifier }
    }

    /// Reserves the requested seats on every stop of the span.
    pub async fn reserve(&self, reservation: &Reservation) -> Result<Trip, ServiceError> {
        self.apply(reservation, planner::reserve).await
    }

    /// Returns previously reserved seats to every stop of the span.
    pub async fn release(&self, reservation: &Reservation) -> Result<Trip, ServiceError> {
        self.apply(reservation, planner::release).await
    }

    async fn apply(
        &self,
        reservation: &Reservation,
        mutate: fn(&mut Trip, &Reservation) -> Result<(), CapacityError>,
    ) -> Result<Trip, ServiceError> {
        let mut attempt = 0;
        loop {
            attempt += 1;

            let mut trip = self.store.get(reservation.trip).await?;
            mutate(&mut trip, reservation)?;

            match self.store.update(trip).await {
                Ok(stored) => {
                    if let Err(message) =
                        self.notifier.notify(TripEvent::Changed(stored.clone())).await
                    {
                        tracing::warn!(%message, "change notification failed");
                    }
                    return Ok(stored);
                }
                Err(StoreError::RevisionConflict(id)) if attempt < MAX_ATTEMPTS => {
                    tracing::debug!(trip_id = %id, attempt, "lost a write race, retrying");
                }
                Err(other) => return Err(other.into()),
            }
        }
    }
}
