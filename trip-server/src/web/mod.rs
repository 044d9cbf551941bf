//! Web layer for the trip service.
//!
//! JSON endpoints for trip lifecycle, search and seat reservations,
//! fronted by a basic-auth middleware.

mod auth;
mod dto;
mod routes;
mod state;

pub use auth::AuthConfig;
pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
