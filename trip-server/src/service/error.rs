//! Service-level error taxonomy.
//!
//! Every operation across the trip and reservation services funnels
//! into `ServiceError`, so the web layer maps errors to responses in
//! exactly one place.

use crate::domain::{DomainError, TripId};
use crate::planner::{CapacityError, ItineraryError};
use crate::routing::RoutingError;
use crate::store::StoreError;

/// Errors surfaced by the trip and reservation services.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The request payload failed validation
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// No trip with the given id
    #[error("trip {0} not found")]
    NotFound(TripId),

    /// The trip changed under the caller and retries ran out
    #[error("trip {0} was modified concurrently, try again")]
    Conflict(TripId),

    /// Seat accounting refused the reservation span
    #[error(transparent)]
    Capacity(#[from] CapacityError),

    /// The routing backend answered but found no route
    #[error("no route connects the requested stops")]
    NoRoute,

    /// The routing backend itself failed
    #[error("routing backend failed: {0}")]
    Routing(RoutingError),

    /// The trip store itself failed
    #[error("storage backend failed: {0}")]
    Backend(String),
}

impl From<ItineraryError> for ServiceError {
    fn from(err: ItineraryError) -> Self {
        match err {
            ItineraryError::Validation(e) => ServiceError::Validation(e),
            ItineraryError::NoRoute => ServiceError::NoRoute,
            ItineraryError::Routing(e) => ServiceError::Routing(e),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ServiceError::NotFound(id),
            StoreError::RevisionConflict(id) => ServiceError::Conflict(id),
            StoreError::Backend(message) => ServiceError::Backend(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StopId;

    #[test]
    fn store_errors_map_to_their_service_variants() {
        assert!(matches!(
            ServiceError::from(StoreError::NotFound(TripId(7))),
            ServiceError::NotFound(TripId(7))
        ));
        assert!(matches!(
            ServiceError::from(StoreError::RevisionConflict(TripId(7))),
            ServiceError::Conflict(TripId(7))
        ));
        assert!(matches!(
            ServiceError::from(StoreError::Backend("down".into())),
            ServiceError::Backend(_)
        ));
    }

    #[test]
    fn itinerary_errors_keep_the_no_route_distinction() {
        assert!(matches!(
            ServiceError::from(ItineraryError::NoRoute),
            ServiceError::NoRoute
        ));
        assert!(matches!(
            ServiceError::from(ItineraryError::Routing(RoutingError::Protocol(
                "bad legs".into()
            ))),
            ServiceError::Routing(_)
        ));
        assert!(matches!(
            ServiceError::from(ItineraryError::Validation(DomainError::SeatsOutOfRange(0))),
            ServiceError::Validation(DomainError::SeatsOutOfRange(0))
        ));
    }

    #[test]
    fn capacity_errors_convert_directly() {
        assert!(matches!(
            ServiceError::from(CapacityError::UnknownStop(StopId(9))),
            ServiceError::Capacity(CapacityError::UnknownStop(StopId(9)))
        ));
    }
}
