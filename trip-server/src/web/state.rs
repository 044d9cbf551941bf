//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedRouter;
use crate::notify::LogNotifier;
use crate::routing::OsrmClient;
use crate::service::{ReservationService, TripService};
use crate::store::MemoryStore;

use super::auth::AuthConfig;

/// Trip service wiring used by the HTTP handlers.
pub type Trips = TripService<MemoryStore, CachedRouter<OsrmClient>, LogNotifier>;

/// Reservation service wiring used by the HTTP handlers.
pub type Reservations = ReservationService<MemoryStore, LogNotifier>;

/// Shared application state.
///
/// Both services must be built over the same store so reservations see
/// the trips the lifecycle service creates.
#[derive(Clone)]
pub struct AppState {
    pub trips: Arc<Trips>,

    pub reservations: Arc<Reservations>,

    pub auth: Arc<AuthConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(trips: Trips, reservations: Reservations, auth: AuthConfig) -> Self {
        Self {
            trips: Arc::new(trips),
            reservations: Arc::new(reservations),
            auth: Arc::new(auth),
        }
    }
}
