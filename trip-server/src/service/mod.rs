//! Application services.
//!
//! The web layer talks only to these services; they own the ordering
//! of planning, persistence and notification.

mod error;
mod reservation;
mod trip;


pub use error::ServiceError;
pub use reservation::ReservationService;
pub use trip::TripService;
