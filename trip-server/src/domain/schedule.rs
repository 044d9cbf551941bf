//! Trip scheduling anchor.

use chrono::{DateTime, Utc};

use super::DomainError;

/// When a trip is anchored in time.
///
/// A trip is scheduled either by when it leaves its first stop or by when
/// it must reach its last stop, never both. The itinerary engine walks the
/// route forward from a departure anchor and backward from an arrival one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// The trip departs its first stop at this instant.
    Departure(DateTime<Utc>),
    /// The trip must reach its last stop by this instant.
    Arrival(DateTime<Utc>),
}

impl Schedule {
    /// Builds a schedule from the two optional wire fields.
    ///
    /// Exactly one of `leave_at` and `arrive_by` must be present.
    pub fn from_parts(
        leave_at: Option<DateTime<Utc>>,
        arrive_by: Option<DateTime<Utc>>,
    ) -> Result<Self, DomainError> {
        match (leave_at, arrive_by) {
            (Some(t), None) => Ok(Schedule::Departure(t)),
            (None, Some(t)) => Ok(Schedule::Arrival(t)),
            (None, None) => Err(DomainError::MissingSchedule),
            (Some(_), Some(_)) => Err(DomainError::ConflictingSchedule),
        }
    }

    /// The instant the schedule is anchored to.
    pub fn anchor(&self) -> DateTime<Utc> {
        match self {
            Schedule::Departure(t) | Schedule::Arrival(t) => *t,
        }
    }

    /// Returns true if the trip is anchored on its departure.
    pub fn is_departure(&self) -> bool {
        matches!(self, Schedule::Departure(_))
    }

    /// Returns true if the trip is anchored on its arrival.
    pub fn is_arrival(&self) -> bool {
        matches!(self, Schedule::Arrival(_))
    }
}
