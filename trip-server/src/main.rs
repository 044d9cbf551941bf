use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use trip_server::cache::{CacheConfig, CachedRouter};
use trip_server::notify::LogNotifier;
use trip_server::planner::{EngineConfig, ItineraryEngine};
use trip_server::routing::{OsrmClient, OsrmConfig};
use trip_server::service::{ReservationService, TripService};
use trip_server::store::MemoryStore;
use trip_server::web::{AppState, AuthConfig, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let osrm_url =
        std::env::var("OSRM_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());

    let auth_credentials = std::env::var("AUTH_CREDENTIALS").ok();
    if auth_credentials.is_none() {
        tracing::warn!("AUTH_CREDENTIALS not set, the API accepts unauthenticated requests");
    }

    let engine_config = std::env::var("PRICE_PER_KM")
        .ok()
        .and_then(|p| p.parse().ok())
        .map(EngineConfig::new)
        .unwrap_or_default();

    let osrm_client =
        OsrmClient::new(OsrmConfig::new(&osrm_url)).expect("failed to create routing client");
    let router = CachedRouter::new(osrm_client, &CacheConfig::default());
    let engine = ItineraryEngine::new(router, engine_config);

    let store = MemoryStore::new();
    let trips = TripService::new(store.clone(), engine, LogNotifier::new());
    let reservations = ReservationService::new(store, LogNotifier::new());

    let state = AppState::new(trips, reservations, AuthConfig::new(auth_credentials));
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, routing = %osrm_url, "trip server listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app).await.expect("server failed");
}
