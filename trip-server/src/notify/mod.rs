//! Trip change notifications.
//!
//! Every successful mutation emits one event after the store write
//! commits. Delivery is fire and forget: the services log a failed
//! notification and carry on, so a flaky notifier can never fail a
//! request that already persisted.

use std::future::Future;

use crate::domain::{Trip, TripId};

/// A committed change to a trip.
#[derive(Debug, Clone, PartialEq)]
pub enum TripEvent {
    /// A new trip was stored
    Added(Trip),

    /// An existing trip was replaced
    Changed(Trip),

    /// A trip was removed
    Deleted(TripId),
}

impl TripEvent {
    /// Stable event name for logs and downstream consumers.
    pub fn kind(&self) -> &'static str {
        match self {
            TripEvent::Added(_) => "trip_added",
            TripEvent::Changed(_) => "trip_changed",
            TripEvent::Deleted(_) => "trip_deleted",
        }
    }

    /// Id of the trip the event concerns.
    pub fn trip_id(&self) -> TripId {
        match self {
            TripEvent::Added(trip) | TripEvent::Changed(trip) => trip.id,
            TripEvent::Deleted(id) => *id,
        }
    }
}

/// Sink for committed trip changes.
pub trait ChangeNotifier {
    /// Delivers one event. Errors are reported as a string for logging;
    /// callers must not fail the originating request on them.
    fn notify(&self, event: TripEvent) -> impl Future<Output = Result<(), String>> + Send;
}

/// Notifier that writes events to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl ChangeNotifier for LogNotifier {
    async fn notify(&self, event: TripEvent) -> Result<(), String> {
        tracing::info!(
            event = event.kind(),
            trip_id = %event.trip_id(),
            "trip change"
        );
        Ok(())
    }
}

#[cfg(test)]
pub use recording::RecordingNotifier;

#[cfg(test)]
mod recording {
    use std::sync::Arc;

    use tokio::sync::RwLock;

    use super::{ChangeNotifier, TripEvent};

    /// Test notifier that keeps every event it receives.
    #[derive(Clone, Default)]
    pub struct RecordingNotifier {
        events: Arc<RwLock<Vec<TripEvent>>>,
        failing: Arc<RwLock<bool>>,
    }

    impl RecordingNotifier {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn events(&self) -> Vec<TripEvent> {
            self.events.read().await.clone()
        }

        pub async fn kinds(&self) -> Vec<&'static str> {
            self.events.read().await.iter().map(|e| e.kind()).collect()
        }

        /// Makes every subsequent delivery fail.
        pub async fn start_failing(&self) {
            *self.failing.write().await = true;
        }
    }

    impl ChangeNotifier for RecordingNotifier {
        async fn notify(&self, event: TripEvent) -> Result<(), String> {
            if *self.failing.read().await {
                return Err("recording notifier set to fail".to_string());
            }
            self.events.write().await.push(event);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DriverId, RideDetails, Schedule, Trip, VehicleId};
    use chrono::{TimeZone, Utc};

    fn trip(id: u64) -> Trip {
        Trip {
            id: TripId(id),
            driver: DriverId::parse("d-1").unwrap(),
            vehicle: VehicleId::parse("v-1").unwrap(),
            seats: 4,
            schedule: Schedule::Departure(Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()),
            stops: vec![],
            distance_meters: 0.0,
            price: 0.0,
            details: RideDetails::default(),
            revision: 1,
        }
    }

    #[test]
    fn kinds_are_stable_names() {
        assert_eq!(TripEvent::Added(trip(1)).kind(), "trip_added");
        assert_eq!(TripEvent::Changed(trip(1)).kind(), "trip_changed");
        assert_eq!(TripEvent::Deleted(TripId(1)).kind(), "trip_deleted");
    }

    #[test]
    fn trip_id_is_extracted_from_every_variant() {
        assert_eq!(TripEvent::Added(trip(3)).trip_id(), TripId(3));
        assert_eq!(TripEvent::Changed(trip(4)).trip_id(), TripId(4));
        assert_eq!(TripEvent::Deleted(TripId(5)).trip_id(), TripId(5));
    }

    #[tokio::test]
    async fn log_notifier_always_succeeds() {
        let notifier = LogNotifier::new();
        assert!(notifier.notify(TripEvent::Deleted(TripId(1))).await.is_ok());
    }

    #[tokio::test]
    async fn recording_notifier_keeps_events_in_order() {
        let notifier = RecordingNotifier::new();

        notifier.notify(TripEvent::Added(trip(1))).await.unwrap();
        notifier.notify(TripEvent::Deleted(TripId(1))).await.unwrap();

        assert_eq!(notifier.kinds().await, vec!["trip_added", "trip_deleted"]);
    }

    #[tokio::test]
    async fn recording_notifier_can_be_made_to_fail() {
        let notifier = RecordingNotifier::new();
        notifier.start_failing().await;

        let result = notifier.notify(TripEvent::Added(trip(1))).await;
        assert!(result.is_err());
        assert!(notifier.events().await.is_empty());
    }
}
