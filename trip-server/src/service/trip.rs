//! Trip lifecycle service.
//!
//! Glues the itinerary engine, the trip store and the change notifier
//! together. Every mutation plans or checks first, persists second and
//! notifies last, so an emitted event always describes a committed
//! state.

use crate::domain::{Trip, TripDraft, TripFilters, TripId};
use crate::notify::{ChangeNotifier, TripEvent};
use crate::planner::ItineraryEngine;
use crate::routing::RouteProvider;
use crate::store::TripStore;

use super::ServiceError;

/// Coordinates trip creation, lookup, replacement and deletion.
pub struct TripService<S, P, N> {
    store: S,
    engine: ItineraryEngine<P>,
    notifier: N,
}

impl<S, P, N> TripService<S, P, N>
where
    S: TripStore + Sync,
    P: RouteProvider + Sync,
    N: ChangeNotifier + Sync,
{
    pub fn new(store: S, engine: ItineraryEngine<P>, notifier: N) -> Self {
        Self {
            store,
            engine,
            notifier,
        }
    }

    /// Plans and stores a new trip from a draft.
    pub async fn register(&self, draft: TripDraft) -> Result<Trip, ServiceError> {
        let planned = self.engine.plan(draft).await?;
        let stored = self.store.create(planned).await?;

        self.emit(TripEvent::Added(stored.clone())).await;
        Ok(stored)
    }

    /// Fetches a single trip.
    pub async fn trip(&self, id: TripId) -> Result<Trip, ServiceError> {
        Ok(self.store.get(id).await?)
    }

    /// Returns all trips matching the filters, ordered by id.
    pub async fn search(&self, filters: TripFilters) -> Result<Vec<Trip>, ServiceError> {
        let predicate = filters.compile()?;
        Ok(self.store.find(&predicate).await?)
    }

    /// Replaces a trip with a freshly planned itinerary.
    ///
    /// The new itinerary starts with every seat free again, so callers
    /// replacing a trip that already has reservations must re-apply
    /// them. The stored revision guards the swap: a concurrent write
    /// between the read and the update surfaces as a conflict.
    pub async fn replace(&self, id: TripId, draft: TripDraft) -> Result<Trip, ServiceError> {
        let existing = self.store.get(id).await?;

        let mut planned = self.engine.plan(draft).await?;
        planned.id = existing.id;
        planned.revision = existing.revision;

        let stored = self.store.update(planned).await?;
        self.emit(TripEvent::Changed(stored.clone())).await;
        Ok(stored)
    }

    /// Deletes a trip.
    pub async fn remove(&self, id: TripId) -> Result<(), ServiceError> {
        self.store.delete(id).await?;
        self.emit(TripEvent::Deleted(id)).await;
        Ok(())
    }

    async fn emit(&self, event: TripEvent) {
        if let Err(message) = self.notifier.notify(event).await {
            tracing::warn!(%message, "change notification failed");
        }
    }
}
