//! Data transfer objects for web requests and responses.
//!
//! Field names follow the public API contract (`leaveAt`, `arriveBy`,
//! `radiusThresh`, ...); conversion into domain types happens here so
//! the handlers only ever see validated values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    DriverId, Point, Reservation, RideDetails, RiderId, Schedule, Stop, StopId, Trip, TripDraft,
    TripFilters, TripId, VehicleId,
};

/// A geographic point on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointDto {
    pub longitude: f64,
    pub latitude: f64,
    pub name: String,
}

impl PointDto {
    fn to_domain(&self) -> Result<Point, String> {
        Point::new(self.longitude, self.latitude, &self.name).map_err(|e| e.to_string())
    }

    fn from_domain(point: &Point) -> Self {
        Self {
            longitude: point.longitude(),
            latitude: point.latitude(),
            name: point.name().to_string(),
        }
    }
}

/// Ride comfort details on the wire.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DetailsDto {
    #[serde(default)]
    pub luggages: u8,

    #[serde(default)]
    pub animals: u8,
}

impl DetailsDto {
    fn to_domain(self) -> Result<RideDetails, String> {
        RideDetails::new(self.luggages, self.animals).map_err(|e| e.to_string())
    }

    fn from_domain(details: &RideDetails) -> Self {
        Self {
            luggages: details.luggage(),
            animals: details.animals(),
        }
    }
}

/// Request body for creating or replacing a trip.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub driver_id: String,

    pub vehicle_id: String,

    pub seats: u8,

    /// Target departure time; mutually exclusive with `arriveBy`
    #[serde(default)]
    pub leave_at: Option<DateTime<Utc>>,

    /// Target arrival time; mutually exclusive with `leaveAt`
    #[serde(default)]
    pub arrive_by: Option<DateTime<Utc>>,

    /// Ordered waypoints, origin first, final destination last
    pub stops: Vec<PointDto>,

    #[serde(default)]
    pub details: Option<DetailsDto>,
}

impl TripRequest {
    /// Converts the request into a draft ready for planning.
    pub fn into_draft(self) -> Result<TripDraft, String> {
        let schedule =
            Schedule::from_parts(self.leave_at, self.arrive_by).map_err(|e| e.to_string())?;
        let driver = DriverId::parse(&self.driver_id).map_err(|e| e.to_string())?;
        let vehicle = VehicleId::parse(&self.vehicle_id).map_err(|e| e.to_string())?;
        let details = self.details.unwrap_or_default().to_domain()?;
        let route = self
            .stops
            .iter()
            .map(PointDto::to_domain)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TripDraft {
            driver,
            vehicle,
            seats: self.seats,
            schedule,
            route,
            details,
        })
    }
}

/// A timed stop in a trip response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopDto {
    pub id: u32,

    pub point: PointDto,

    pub remaining_seats: u8,

    pub timestamp: DateTime<Utc>,
}

impl StopDto {
    fn from_domain(stop: &Stop) -> Self {
        Self {
            id: stop.id.0,
            point: PointDto::from_domain(&stop.point),
            remaining_seats: stop.remaining_seats,
            timestamp: stop.timestamp,
        }
    }
}

/// A stored trip on the wire.
///
/// Both `leaveAt` and `arriveBy` are populated with the resolved
/// itinerary times regardless of which one the creator supplied.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripResponse {
    pub id: u64,

    pub driver_id: String,

    pub vehicle_id: String,

    pub seats: u8,

    pub leave_at: DateTime<Utc>,

    pub arrive_by: DateTime<Utc>,

    pub full: bool,

    pub distance: f64,

    pub price: f64,

    pub stops: Vec<StopDto>,

    pub details: DetailsDto,
}

impl TripResponse {
    pub fn from_trip(trip: &Trip) -> Self {
        let anchor = trip.schedule.anchor();
        Self {
            id: trip.id.0,
            driver_id: trip.driver.as_str().to_string(),
            vehicle_id: trip.vehicle.as_str().to_string(),
            seats: trip.seats,
            leave_at: trip.departure().unwrap_or(anchor),
            arrive_by: trip.arrival().unwrap_or(anchor),
            full: trip.is_full(),
            distance: trip.distance_meters,
            price: trip.price,
            stops: trip.stops.iter().map(StopDto::from_domain).collect(),
            details: DetailsDto::from_domain(&trip.details),
        }
    }
}

/// Request body for booking or cancelling seats on a trip.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub user_id: String,

    pub source_id: u32,

    pub destination_id: u32,

    pub seats: u8,
}

impl ReservationRequest {
    /// Converts the request into a reservation against the given trip.
    pub fn into_reservation(self, trip: TripId) -> Result<Reservation, String> {
        let rider = RiderId::parse(&self.user_id).map_err(|e| e.to_string())?;
        Reservation::new(
            trip,
            rider,
            StopId(self.source_id),
            StopId(self.destination_id),
            self.seats,
        )
        .map_err(|e| e.to_string())
    }
}

/// Query parameters for trip search.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiltersQuery {
    #[serde(default)]
    pub driver_id: Option<String>,

    #[serde(default)]
    pub seats: Option<u8>,

    #[serde(default)]
    pub leave_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub arrive_by: Option<DateTime<Utc>>,

    #[serde(default)]
    pub details_luggages: Option<u8>,

    #[serde(default)]
    pub details_animals: Option<u8>,

    #[serde(default)]
    pub radius_thresh: Option<f64>,

    #[serde(default)]
    pub destination_latitude: Option<f64>,

    #[serde(default)]
    pub destination_longitude: Option<f64>,

    /// Match the geo filter against any stop instead of the final one
    #[serde(default)]
    pub any_stop: bool,
}

impl FiltersQuery {
    /// Converts the query into domain filters.
    pub fn into_filters(self) -> Result<TripFilters, String> {
        let driver = self
            .driver_id
            .as_deref()
            .map(DriverId::parse)
            .transpose()
            .map_err(|e| e.to_string())?;

        let destination = match (self.destination_longitude, self.destination_latitude) {
            (Some(longitude), Some(latitude)) => {
                Some(Point::new(longitude, latitude, "destination").map_err(|e| e.to_string())?)
            }
            (None, None) => None,
            _ => {
                return Err(
                    "destinationLatitude and destinationLongitude must be provided together"
                        .to_string(),
                );
            }
        };

        Ok(TripFilters {
            driver,
            seats: self.seats,
            leave_at: self.leave_at,
            arrive_by: self.arrive_by,
            luggage: self.details_luggages,
            animals: self.details_animals,
            destination,
            radius_meters: self.radius_thresh,
            any_stop: self.any_stop,
        })
    }
}

/// Error body returned by every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn trip_request_json() -> serde_json::Value {
        json!({
            "driverId": "d-1",
            "vehicleId": "v-1",
            "seats": 4,
            "leaveAt": "2024-06-01T09:00:00Z",
            "stops": [
                {"longitude": -73.5673, "latitude": 45.5017, "name": "Montreal"},
                {"longitude": -71.2080, "latitude": 46.8139, "name": "Quebec"}
            ],
            "details": {"luggages": 1, "animals": 0}
        })
    }

    #[test]
    fn trip_request_uses_the_wire_field_names() {
        let request: TripRequest = serde_json::from_value(trip_request_json()).unwrap();
        let draft = request.into_draft().unwrap();

        assert_eq!(draft.driver.as_str(), "d-1");
        assert_eq!(draft.seats, 4);
        assert!(draft.schedule.is_departure());
        assert_eq!(draft.route.len(), 2);
        assert_eq!(draft.details.luggage(), 1);
    }

    #[test]
    fn both_schedule_fields_is_a_conversion_error() {
        let mut body = trip_request_json();
        body["arriveBy"] = json!("2024-06-01T12:00:00Z");

        let request: TripRequest = serde_json::from_value(body).unwrap();
        let err = request.into_draft().unwrap_err();
        assert!(err.contains("mutually exclusive"));
    }

    #[test]
    fn missing_details_default_to_zero() {
        let mut body = trip_request_json();
        body.as_object_mut().unwrap().remove("details");

        let request: TripRequest = serde_json::from_value(body).unwrap();
        let draft = request.into_draft().unwrap();
        assert_eq!(draft.details.luggage(), 0);
        assert_eq!(draft.details.animals(), 0);
    }

    #[test]
    fn bad_coordinates_are_a_conversion_error() {
        let mut body = trip_request_json();
        body["stops"][0]["latitude"] = json!(123.0);

        let request: TripRequest = serde_json::from_value(body).unwrap();
        assert!(request.into_draft().is_err());
    }

    #[test]
    fn trip_response_serializes_with_wire_field_names() {
        let anchor = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        let trip = Trip {
            id: TripId(7),
            driver: DriverId::parse("d-1").unwrap(),
            vehicle: VehicleId::parse("v-1").unwrap(),
            seats: 4,
            schedule: Schedule::Departure(anchor),
            stops: vec![
                Stop::new(
                    StopId(0),
                    Point::new(-73.5673, 45.5017, "Montreal").unwrap(),
                    4,
                    anchor,
                ),
                Stop::new(
                    StopId(1),
                    Point::new(-71.2080, 46.8139, "Quebec").unwrap(),
                    4,
                    anchor + chrono::Duration::hours(3),
                ),
            ],
            distance_meters: 250_000.0,
            price: 37.5,
            details: RideDetails::default(),
            revision: 1,
        };

        let value = serde_json::to_value(TripResponse::from_trip(&trip)).unwrap();

        assert_eq!(value["id"], json!(7));
        assert_eq!(value["driverId"], json!("d-1"));
        assert_eq!(value["leaveAt"], json!("2024-06-01T09:00:00Z"));
        assert_eq!(value["arriveBy"], json!("2024-06-01T12:00:00Z"));
        assert_eq!(value["full"], json!(false));
        assert_eq!(value["stops"][1]["remainingSeats"], json!(4));
        assert_eq!(value["stops"][1]["id"], json!(1));
    }

    #[test]
    fn reservation_request_converts_against_the_path_trip() {
        let request: ReservationRequest = serde_json::from_value(json!({
            "userId": "u-1",
            "sourceId": 0,
            "destinationId": 2,
            "seats": 2
        }))
        .unwrap();

        let reservation = request.into_reservation(TripId(3)).unwrap();
        assert_eq!(reservation.trip, TripId(3));
        assert_eq!(reservation.source, StopId(0));
        assert_eq!(reservation.destination, StopId(2));
    }

    #[test]
    fn backwards_reservation_span_is_rejected() {
        let request: ReservationRequest = serde_json::from_value(json!({
            "userId": "u-1",
            "sourceId": 2,
            "destinationId": 1,
            "seats": 1
        }))
        .unwrap();

        assert!(request.into_reservation(TripId(1)).is_err());
    }

    #[test]
    fn filters_query_translates_the_destination_pair() {
        let query: FiltersQuery = serde_json::from_value(json!({
            "driverId": "d-1",
            "seats": 2,
            "radiusThresh": 500.0,
            "destinationLatitude": 46.8139,
            "destinationLongitude": -71.2080
        }))
        .unwrap();

        let filters = query.into_filters().unwrap();
        assert_eq!(filters.driver.unwrap().as_str(), "d-1");
        assert_eq!(filters.radius_meters, Some(500.0));
        assert!(filters.destination.is_some());
        assert!(!filters.any_stop);
    }

    #[test]
    fn half_a_destination_is_rejected() {
        let query: FiltersQuery = serde_json::from_value(json!({
            "destinationLatitude": 46.8139
        }))
        .unwrap();

        assert!(query.into_filters().is_err());
    }

    #[test]
    fn empty_query_is_the_empty_filter_set() {
        let query: FiltersQuery = serde_json::from_value(json!({})).unwrap();
        let filters = query.into_filters().unwrap();

        assert!(filters.driver.is_none());
        assert!(filters.destination.is_none());
        assert!(filters.radius_meters.is_none());
    }
}
