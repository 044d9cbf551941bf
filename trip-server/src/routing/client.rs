//! OSRM HTTP client.
//!
//! Talks to an OSRM `route/v1` endpoint and converts its per-leg durations
//! and distances into domain legs. Uses a semaphore to bound concurrent
//! requests against the routing backend.

use std::sync::Arc;

use chrono::Duration;
use serde::Deserialize;
use tokio::sync::Semaphore;

use crate::domain::Point;

use super::error::RoutingError;
use super::provider::{RouteLeg, RouteProvider};

/// Default base URL for a local OSRM instance.
const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default routing profile.
const DEFAULT_PROFILE: &str = "driving";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Configuration for the OSRM client.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL of the OSRM server
    pub base_url: String,
    /// Routing profile (path segment of `route/v1`)
    pub profile: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 10,
        }
    }
}

impl OsrmConfig {
    /// Create a config pointing at the given OSRM server.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the routing profile.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// OSRM `route/v1` client.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
    profile: String,
    semaphore: Arc<Semaphore>,
}

impl OsrmClient {
    /// Create a new OSRM client with the given configuration.
    pub fn new(config: OsrmConfig) -> Result<Self, RoutingError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            profile: config.profile,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    async fn fetch_route(&self, waypoints: &[Point]) -> Result<Vec<RouteLeg>, RoutingError> {
        if waypoints.len() < 2 {
            return Err(RoutingError::Protocol(
                "a route needs at least two waypoints".to_string(),
            ));
        }

        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| RoutingError::Protocol("semaphore closed".to_string()))?;

        let url = format!(
            "{}/route/v1/{}/{}",
            self.base_url,
            self.profile,
            coordinate_path(waypoints)
        );

        let response = self
            .http
            .get(&url)
            .query(&[("overview", "false"), ("steps", "false")])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // OSRM reports "no route" as a client error with a code in the body
            if let Ok(err) = serde_json::from_str::<OsrmErrorBody>(&body) {
                if err.code == "NoRoute" {
                    return Err(RoutingError::NoRoute);
                }
            }
            return Err(RoutingError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: OsrmRouteResponse =
            serde_json::from_str(&body).map_err(|e| RoutingError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        legs_from_response(parsed, waypoints.len() - 1)
    }
}

impl RouteProvider for OsrmClient {
    async fn route(&self, waypoints: &[Point]) -> Result<Vec<RouteLeg>, RoutingError> {
        self.fetch_route(waypoints).await
    }
}

/// Formats waypoints as an OSRM coordinate path: `lon,lat;lon,lat;...`.
fn coordinate_path(waypoints: &[Point]) -> String {
    waypoints
        .iter()
        .map(|p| format!("{:.6},{:.6}", p.longitude(), p.latitude()))
        .collect::<Vec<_>>()
        .join(";")
}

/// Converts an OSRM response into per-leg domain values.
///
/// Takes the first returned route. The leg count must match the waypoint
/// pair count, otherwise stop timestamps could not be assigned.
fn legs_from_response(
    response: OsrmRouteResponse,
    expected_legs: usize,
) -> Result<Vec<RouteLeg>, RoutingError> {
    if response.code != "Ok" {
        if response.code == "NoRoute" {
            return Err(RoutingError::NoRoute);
        }
        return Err(RoutingError::Protocol(format!(
            "unexpected response code {}",
            response.code
        )));
    }

    let Some(route) = response.routes.into_iter().next() else {
        return Err(RoutingError::NoRoute);
    };

    if route.legs.len() != expected_legs {
        return Err(RoutingError::Protocol(format!(
            "expected {} legs, got {}",
            expected_legs,
            route.legs.len()
        )));
    }

    Ok(route
        .legs
        .into_iter()
        .map(|leg| RouteLeg {
            duration: Duration::milliseconds((leg.duration * 1000.0).round() as i64),
            distance_meters: leg.distance,
        })
        .collect())
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    /// Travel time in seconds
    duration: f64,
    /// Distance in meters
    distance: f64,
}

#[derive(Debug, Deserialize)]
struct OsrmErrorBody {
    code: String,
}
