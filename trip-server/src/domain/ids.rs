//! Identifier newtypes.
//!
//! Driver, vehicle and rider identifiers are opaque references owned by
//! other services; we only require that they are non-empty. Trip and stop
//! identifiers are assigned locally: trips by the store, stops by the
//! itinerary engine in route order.

use std::fmt;

/// Error returned when parsing an invalid external identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {entity} id: must not be empty")]
pub struct InvalidId {
    entity: &'static str,
}

macro_rules! external_id {
    ($(#[$doc:meta])* $name:ident, $entity:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Parse from a string; the value must contain a non-space
            /// character.
            pub fn parse(s: &str) -> Result<Self, InvalidId> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(InvalidId { entity: $entity });
                }
                Ok(Self(trimmed.to_string()))
            }

            /// The identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

external_id!(
    /// Reference to the driver offering a trip.
    DriverId,
    "driver"
);

external_id!(
    /// Reference to the vehicle used for a trip.
    VehicleId,
    "vehicle"
);

external_id!(
    /// Reference to the rider making a reservation.
    RiderId,
    "rider"
);

/// Unique identifier of a stored trip, assigned by the trip store.
///
/// `TripId::UNASSIGNED` marks a trip that has not been persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TripId(pub u64);

impl TripId {
    /// Sentinel for a trip that the store has not assigned an id to.
    pub const UNASSIGNED: TripId = TripId(0);

    /// Whether this id is the unassigned sentinel.
    pub fn is_unassigned(self) -> bool {
        self == Self::UNASSIGNED
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a stop within a trip's itinerary.
///
/// Assigned at trip creation in route order and unique within the trip.
/// Stop ids are stable: stops are never reordered after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(pub u32);

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
