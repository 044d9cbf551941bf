//! Domain types for the trip coordination service.
//!
//! This module contains the core domain model types that represent
//! validated ride-sharing data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod details;
mod error;
mod filters;
mod ids;
mod point;
mod reservation;
mod schedule;
mod stop;
mod trip;

pub use details::{MAX_ANIMALS, MAX_LUGGAGE, RideDetails};
pub use error::DomainError;
pub use filters::{DEFAULT_RADIUS_METERS, FilterPredicate, TripFilters};
pub use ids::{DriverId, InvalidId, RiderId, StopId, TripId, VehicleId};
pub use point::{InvalidPoint, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE, Point};
pub use reservation::Reservation;
pub use schedule::Schedule;
pub use stop::Stop;
pub use trip::{MAX_SEATS, MIN_SEATS, MIN_STOPS, Trip, TripDraft};
