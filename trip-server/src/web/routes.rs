//! HTTP route handlers.

use axum::{
    Json, Router, middleware,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::domain::TripId;
use crate::planner::CapacityError;
use crate::service::ServiceError;

use super::auth::require_auth;
use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/trips", get(search_trips).post(create_trip))
        .route(
            "/trips/:id",
            get(get_trip).put(replace_trip).delete(delete_trip),
        )
        .route(
            "/trips/:id/reservation",
            axum::routing::post(create_reservation).delete(delete_reservation),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Create a trip from a draft, planning its itinerary.
async fn create_trip(
    State(state): State<AppState>,
    Json(request): Json<TripRequest>,
) -> Result<Response, AppError> {
    let draft = request.into_draft().map_err(AppError::bad_request)?;
    let trip = state.trips.register(draft).await?;

    Ok((StatusCode::CREATED, Json(TripResponse::from_trip(&trip))).into_response())
}

/// Fetch a trip by id.
async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<TripResponse>, AppError> {
    let trip = state.trips.trip(TripId(id)).await?;
    Ok(Json(TripResponse::from_trip(&trip)))
}

/// Search trips with query filters.
async fn search_trips(
    State(state): State<AppState>,
    Query(query): Query<FiltersQuery>,
) -> Result<Json<Vec<TripResponse>>, AppError> {
    let filters = query.into_filters().map_err(AppError::bad_request)?;
    let trips = state.trips.search(filters).await?;

    Ok(Json(trips.iter().map(TripResponse::from_trip).collect()))
}

/// Replace a trip with a freshly planned itinerary.
async fn replace_trip(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<TripRequest>,
) -> Result<Json<TripResponse>, AppError> {
    let draft = request.into_draft().map_err(AppError::bad_request)?;
    let trip = state.trips.replace(TripId(id), draft).await?;

    Ok(Json(TripResponse::from_trip(&trip)))
}

/// Delete a trip by id.
async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    state.trips.remove(TripId(id)).await?;
    Ok(StatusCode::OK)
}

/// Reserve seats on a span of the trip's stops.
async fn create_reservation(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<ReservationRequest>,
) -> Result<Response, AppError> {
    let reservation = request
        .into_reservation(TripId(id))
        .map_err(AppError::bad_request)?;
    let trip = state.reservations.reserve(&reservation).await?;

    Ok((StatusCode::CREATED, Json(TripResponse::from_trip(&trip))).into_response())
}

/// Cancel a reservation, returning its seats to the span.
async fn delete_reservation(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<ReservationRequest>,
) -> Result<Json<TripResponse>, AppError> {
    let reservation = request
        .into_reservation(TripId(id))
        .map_err(AppError::bad_request)?;
    let trip = state.reservations.release(&reservation).await?;

    Ok(Json(TripResponse::from_trip(&trip)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unauthorized,
    NotFound { message: String },
    Conflict { message: String },
    UpstreamUnavailable { message: String },
    Internal { message: String },
}

impl AppError {
    fn bad_request(message: String) -> Self {
        AppError::BadRequest { message }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::UpstreamUnavailable { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Conflict { message }
            | AppError::UpstreamUnavailable { message }
            | AppError::Internal { message } => message,
            AppError::Unauthorized => "unauthorized",
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        let message = err.to_string();
        match err {
            ServiceError::Validation(_) => AppError::BadRequest { message },
            ServiceError::NotFound(_) => AppError::NotFound { message },
            ServiceError::Conflict(_) => AppError::Conflict { message },
            ServiceError::Capacity(CapacityError::Insufficient) => AppError::Conflict { message },
            ServiceError::Capacity(_) => AppError::BadRequest { message },
            ServiceError::NoRoute => AppError::UpstreamUnavailable { message },
            ServiceError::Routing(_) => AppError::UpstreamUnavailable { message },
            ServiceError::Backend(_) => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message().to_string();

        tracing::warn!(%status, message, "request failed");

        let body = Json(ErrorResponse {
            code: status.as_u16(),
            message,
        });
        (status, body).into_response()
    }
}
