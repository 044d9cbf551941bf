//! Mock route provider for testing without a routing backend.
//!
//! Computes straight-line legs at a configurable speed and can be switched
//! into failure modes to exercise error paths.

use std::sync::Arc;

use chrono::Duration;
use tokio::sync::RwLock;

use crate::domain::Point;

use super::error::RoutingError;
use super::provider::{RouteLeg, RouteProvider};

/// Failure modes the mock can be switched into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// The backend answers but cannot connect the waypoints.
    NoRoute,
    /// The backend call itself fails.
    Backend,
}

#[derive(Debug)]
struct MockState {
    speed_mps: f64,
    failure: Option<MockFailure>,
}

/// Mock provider that derives legs from great-circle distances.
///
/// Legs follow the crow-flies distance between consecutive waypoints at a
/// fixed speed, so tests get deterministic durations without any HTTP.
#[derive(Debug, Clone)]
pub struct MockRouteProvider {
    state: Arc<RwLock<MockState>>,
}

impl MockRouteProvider {
    /// Default mock travel speed, roughly highway pace.
    pub const DEFAULT_SPEED_MPS: f64 = 25.0;

    /// Creates a mock travelling at the default speed.
    pub fn new() -> Self {
        Self::with_speed(Self::DEFAULT_SPEED_MPS)
    }

    /// Creates a mock travelling at `speed_mps` meters per second.
    pub fn with_speed(speed_mps: f64) -> Self {
        Self {
            state: Arc::new(RwLock::new(MockState {
                speed_mps,
                failure: None,
            })),
        }
    }

    /// Makes every subsequent call fail in the given mode.
    pub async fn fail_with(&self, failure: MockFailure) {
        self.state.write().await.failure = Some(failure);
    }

    /// Clears any configured failure.
    pub async fn recover(&self) {
        self.state.write().await.failure = None;
    }
}

impl Default for MockRouteProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteProvider for MockRouteProvider {
    async fn route(&self, waypoints: &[Point]) -> Result<Vec<RouteLeg>, RoutingError> {
        let state = self.state.read().await;

        match state.failure {
            Some(MockFailure::NoRoute) => return Err(RoutingError::NoRoute),
            Some(MockFailure::Backend) => {
                return Err(RoutingError::Api {
                    status: 500,
                    message: "mock backend failure".to_string(),
                });
            }
            None => {}
        }

        if waypoints.len() < 2 {
            return Err(RoutingError::Protocol(
                "a route needs at least two waypoints".to_string(),
            ));
        }

        Ok(waypoints
            .windows(2)
            .map(|pair| {
                let distance_meters = pair[0].distance_meters(&pair[1]);
                let seconds = distance_meters / state.speed_mps;
                RouteLeg {
                    duration: Duration::milliseconds((seconds * 1000.0).round() as i64),
                    distance_meters,
                }
            })
            .collect())
    }
}
