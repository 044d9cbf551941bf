//! Itinerary computation and seat accounting.
//!
//! The itinerary engine resolves a trip draft into timed, priced stops
//! using a route provider; the capacity functions mutate per-stop seat
//! counters for reservation spans.

mod capacity;
mod config;
mod itinerary;

pub use capacity::{CapacityError, release, reserve};
pub use config::EngineConfig;
pub use itinerary::{ItineraryEngine, ItineraryError};
