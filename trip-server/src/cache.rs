//! Caching layer for routing responses.
//!
//! Route geometry between a fixed set of waypoints changes rarely, so legs
//! are cached keyed by the waypoint coordinates. Coordinates are quantized
//! to about a meter before keying, which bounds cache cardinality when
//! callers send floats that differ only in noise digits.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::Point;
use crate::routing::{RouteLeg, RouteProvider, RoutingError};

/// Quantization step for cache keys, in degrees. Roughly one meter.
const KEY_QUANTUM_DEG: f64 = 1e-5;

/// Cache key: quantized (longitude, latitude) per waypoint, in order.
type RouteKey = Vec<(i64, i64)>;

/// Cached legs for one waypoint sequence.
type RouteEntry = Arc<Vec<RouteLeg>>;

/// Configuration for the route cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 10_000,
        }
    }
}

/// Route provider with caching.
///
/// Wraps any `RouteProvider` and caches successful responses. Failures are
/// never cached, so a transient backend error does not poison the entry.
pub struct CachedRouter<P> {
    inner: P,
    cache: MokaCache<RouteKey, RouteEntry>,
}

impl<P> CachedRouter<P> {
    /// Creates a caching wrapper around `inner`.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, cache }
    }

    /// Number of cached waypoint sequences.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

impl<P> RouteProvider for CachedRouter<P>
where
    P: RouteProvider + Send + Sync,
{
    async fn route(&self, waypoints: &[Point]) -> Result<Vec<RouteLeg>, RoutingError> {
        let key = route_key(waypoints);

        if let Some(cached) = self.cache.get(&key).await {
            return Ok((*cached).clone());
        }

        let legs = self.inner.route(waypoints).await?;
        self.cache.insert(key, Arc::new(legs.clone())).await;

        Ok(legs)
    }
}

/// Quantizes waypoints into a cache key.
fn route_key(waypoints: &[Point]) -> RouteKey {
    waypoints
        .iter()
        .map(|p| (quantize(p.longitude()), quantize(p.latitude())))
        .collect()
}

fn quantize(coord: f64) -> i64 {
    (coord / KEY_QUANTUM_DEG).round() as i64
}
