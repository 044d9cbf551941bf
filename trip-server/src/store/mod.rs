//! Trip persistence seam.
//!
//! Services only see the `TripStore` trait. The in-memory store is the
//! default implementation; a database-backed store would slot in behind
//! the same interface.

mod memory;

pub use memory::MemoryStore;

use std::future::Future;

use crate::domain::{FilterPredicate, Trip, TripId};

/// Errors from the trip store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No trip with the given id
    #[error("trip {0} not found")]
    NotFound(TripId),

    /// The trip changed since the caller read it
    #[error("trip {0} was modified concurrently")]
    RevisionConflict(TripId),

    /// The backing store itself failed
    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Persistent storage for trips.
///
/// Every write of an existing trip goes through `update`, which checks
/// the caller's revision against the stored one and bumps it atomically.
/// Two writers racing on the same trip therefore cannot both win; the
/// loser gets `StoreError::RevisionConflict` and must re-read.
pub trait TripStore {
    /// Persists a new trip, assigning its id and first revision.
    fn create(&self, trip: Trip) -> impl Future<Output = Result<Trip, StoreError>> + Send;

    /// Fetches a trip by id.
    fn get(&self, id: TripId) -> impl Future<Output = Result<Trip, StoreError>> + Send;

    /// Returns all trips matching the predicate, ordered by id.
    fn find(
        &self,
        predicate: &FilterPredicate,
    ) -> impl Future<Output = Result<Vec<Trip>, StoreError>> + Send;

    /// Replaces a stored trip if its revision still matches.
    ///
    /// Returns the stored trip with its revision bumped.
    fn update(&self, trip: Trip) -> impl Future<Output = Result<Trip, StoreError>> + Send;

    /// Removes a trip by id.
    fn delete(&self, id: TripId) -> impl Future<Output = Result<(), StoreError>> + Send;
}
