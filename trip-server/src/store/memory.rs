//! In-memory trip store.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use crate::domain::{FilterPredicate, Trip, TripId};

use super::{StoreError, TripStore};

/// Trip store backed by a shared map.
///
/// The map lock is held for the whole of `update`, so the revision check
/// and the swap happen atomically.
#[derive(Clone, Default)]
pub struct MemoryStore {
    trips: Arc<RwLock<HashMap<u64, Trip>>>,
    next_id: Arc<AtomicU64>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored trips.
    pub async fn len(&self) -> usize {
        self.trips.read().await.len()
    }

    /// Whether the store holds no trips.
    pub async fn is_empty(&self) -> bool {
        self.trips.read().await.is_empty()
    }
}

impl TripStore for MemoryStore {
    async fn create(&self, mut trip: Trip) -> Result<Trip, StoreError> {
        // ids start at 1 so the unassigned sentinel can never be stored
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        trip.id = TripId(id);
        trip.revision = 1;

        self.trips.write().await.insert(id, trip.clone());
        Ok(trip)
    }

    async fn get(&self, id: TripId) -> Result<Trip, StoreError> {
        self.trips
            .read()
            .await
            .get(&id.0)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn find(&self, predicate: &FilterPredicate) -> Result<Vec<Trip>, StoreError> {
        let trips = self.trips.read().await;

        let mut matches: Vec<Trip> = trips
            .values()
            .filter(|t| predicate.matches(t))
            .cloned()
            .collect();
        matches.sort_by_key(|t| t.id);

        Ok(matches)
    }

    async fn update(&self, mut trip: Trip) -> Result<Trip, StoreError> {
        let mut trips = self.trips.write().await;

        let stored = trips
            .get_mut(&trip.id.0)
            .ok_or(StoreError::NotFound(trip.id))?;

        if stored.revision != trip.revision {
            return Err(StoreError::RevisionConflict(trip.id));
        }

        trip.revision += 1;
        *stored = trip.clone();
        Ok(trip)
    }

    async fn delete(&self, id: TripId) -> Result<(), StoreError> {
        self.trips
            .write()
            .await
            .remove(&id.0)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
