//! Ride-sharing trip coordination server.
//!
//! Plans trip itineraries against an external routing backend and
//! manages seat reservations over spans of each trip's stops.

pub mod cache;
pub mod domain;
pub mod notify;
pub mod planner;
pub mod routing;
pub mod service;
pub mod store;
pub mod web;
