//! Search filters over stored trips.
//!
//! Filters arrive from the query layer as a bag of optional fields
//! (`TripFilters`), get validated once, and compile into a
//! `FilterPredicate` that the store evaluates against each trip.

use chrono::{DateTime, Duration, Utc};

use super::{
    DomainError, DriverId, MAX_ANIMALS, MAX_LUGGAGE, MAX_SEATS, MIN_SEATS, Point, Trip,
};

/// Radius applied to a geographic filter when none is given, in meters.
pub const DEFAULT_RADIUS_METERS: f64 = 2_000.0;

/// Half-width of the window a time filter matches, in hours.
const WINDOW_HOURS: i64 = 12;

/// Raw search filters as they arrive from the query layer.
///
/// All fields are optional. `compile` validates them and produces a
/// predicate with defaults applied.
#[derive(Debug, Clone, Default)]
pub struct TripFilters {
    /// Only trips offered by this driver.
    pub driver: Option<DriverId>,
    /// Only trips with at least this many seats free at the first stop.
    pub seats: Option<u8>,
    /// Only trips departing near this instant.
    pub leave_at: Option<DateTime<Utc>>,
    /// Only trips arriving near this instant.
    pub arrive_by: Option<DateTime<Utc>>,
    /// Only trips allowing at least this much luggage.
    pub luggage: Option<u8>,
    /// Only trips allowing at least this many animals.
    pub animals: Option<u8>,
    /// Only trips passing near this point.
    pub destination: Option<Point>,
    /// Radius for the geographic filter, defaulted when absent.
    pub radius_meters: Option<f64>,
    /// Match any stop against the geographic filter, not just the last.
    pub any_stop: bool,
}

impl TripFilters {
    /// Validates the filters and compiles them into a predicate.
    pub fn compile(self) -> Result<FilterPredicate, DomainError> {
        if self.leave_at.is_some() && self.arrive_by.is_some() {
            return Err(DomainError::ConflictingSchedule);
        }
        if let Some(seats) = self.seats {
            if !(MIN_SEATS..=MAX_SEATS).contains(&seats) {
                return Err(DomainError::SeatsOutOfRange(seats));
            }
        }
        if let Some(luggage) = self.luggage {
            if luggage > MAX_LUGGAGE {
                return Err(DomainError::LuggageOutOfRange(luggage));
            }
        }
        if let Some(animals) = self.animals {
            if animals > MAX_ANIMALS {
                return Err(DomainError::AnimalsOutOfRange(animals));
            }
        }
        if let Some(radius) = self.radius_meters {
            // NaN fails this comparison, so it is rejected too.
            if !(radius > 0.0) {
                return Err(DomainError::NonPositiveRadius);
            }
        }

        let geo = self.destination.map(|point| GeoFilter {
            point,
            radius_meters: self.radius_meters.unwrap_or(DEFAULT_RADIUS_METERS),
            any_stop: self.any_stop,
        });

        Ok(FilterPredicate {
            driver: self.driver,
            seats: self.seats,
            leave_at: self.leave_at,
            arrive_by: self.arrive_by,
            luggage: self.luggage,
            animals: self.animals,
            geo,
        })
    }
}

/// A geographic constraint on a trip's stops.
#[derive(Debug, Clone)]
struct GeoFilter {
    point: Point,
    radius_meters: f64,
    any_stop: bool,
}

impl GeoFilter {
    fn matches(&self, trip: &Trip) -> bool {
        let within = |p: &Point| p.distance_meters(&self.point) <= self.radius_meters;
        if self.any_stop {
            trip.stops.iter().any(|s| within(&s.point))
        } else {
            trip.final_stop().is_some_and(|s| within(&s.point))
        }
    }
}

/// Validated search filters, ready to match against trips.
///
/// A predicate with no constraints matches every trip.
#[derive(Debug, Clone)]
pub struct FilterPredicate {
    driver: Option<DriverId>,
    seats: Option<u8>,
    leave_at: Option<DateTime<Utc>>,
    arrive_by: Option<DateTime<Utc>>,
    luggage: Option<u8>,
    animals: Option<u8>,
    geo: Option<GeoFilter>,
}

impl FilterPredicate {
    /// Whether the trip satisfies every constraint.
    pub fn matches(&self, trip: &Trip) -> bool {
        if let Some(driver) = &self.driver {
            if &trip.driver != driver {
                return false;
            }
        }
        if let Some(seats) = self.seats {
            if !trip.stops.first().is_some_and(|s| s.has_seats(seats)) {
                return false;
            }
        }
        if let Some(wanted) = self.leave_at {
            if !trip.departure().is_some_and(|t| within_window(t, wanted)) {
                return false;
            }
        }
        if let Some(wanted) = self.arrive_by {
            if !trip.arrival().is_some_and(|t| within_window(t, wanted)) {
                return false;
            }
        }
        if self.luggage.is_some() || self.animals.is_some() {
            let luggage = self.luggage.unwrap_or(0);
            let animals = self.animals.unwrap_or(0);
            if !trip.details.accommodates(luggage, animals) {
                return false;
            }
        }
        if let Some(geo) = &self.geo {
            if !geo.matches(trip) {
                return false;
            }
        }
        true
    }
}

fn within_window(actual: DateTime<Utc>, wanted: DateTime<Utc>) -> bool {
    (actual - wanted).abs() <= Duration::hours(WINDOW_HOURS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RideDetails, Schedule, Stop, StopId, TripId, VehicleId};
    use chrono::TimeZone;

    const EARTH_RADIUS_M: f64 = 6_371_000.0;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }

    fn base_point() -> Point {
        Point::new(-73.5673, 45.5017, "Montreal").unwrap()
    }

    /// A point exactly `meters` due north of `base` on the spherical model.
    fn point_north_of(base: &Point, meters: f64) -> Point {
        let offset = (meters / EARTH_RADIUS_M).to_degrees();
        Point::new(base.longitude(), base.latitude() + offset, "offset").unwrap()
    }

    fn make_trip(stops: Vec<(Point, u8)>, details: RideDetails) -> Trip {
        let stops = stops
            .into_iter()
            .enumerate()
            .map(|(i, (point, seats))| {
                Stop::new(
                    StopId(i as u32),
                    point,
                    seats,
                    anchor() + Duration::minutes(30 * i as i64),
                )
            })
            .collect();

        Trip {
            id: TripId(1),
            driver: DriverId::parse("d-1").unwrap(),
            vehicle: VehicleId::parse("v-1").unwrap(),
            seats: 4,
            schedule: Schedule::Departure(anchor()),
            stops,
            distance_meters: 10_000.0,
            price: 1.5,
            details,
            revision: 1,
        }
    }

    fn simple_trip() -> Trip {
        make_trip(
            vec![
                (base_point(), 4),
                (point_north_of(&base_point(), 50_000.0), 4),
            ],
            RideDetails::default(),
        )
    }

    #[test]
    fn empty_filters_match_everything() {
        let predicate = TripFilters::default().compile().unwrap();
        assert!(predicate.matches(&simple_trip()));
    }

    #[test]
    fn driver_filter() {
        let matching = TripFilters {
            driver: Some(DriverId::parse("d-1").unwrap()),
            ..Default::default()
        };
        assert!(matching.compile().unwrap().matches(&simple_trip()));

        let other = TripFilters {
            driver: Some(DriverId::parse("d-2").unwrap()),
            ..Default::default()
        };
        assert!(!other.compile().unwrap().matches(&simple_trip()));
    }

    #[test]
    fn seats_filter_checks_the_first_stop() {
        let trip = make_trip(
            vec![
                (base_point(), 2),
                (point_north_of(&base_point(), 10_000.0), 4),
            ],
            RideDetails::default(),
        );

        let wants_two = TripFilters {
            seats: Some(2),
            ..Default::default()
        };
        assert!(wants_two.compile().unwrap().matches(&trip));

        let wants_three = TripFilters {
            seats: Some(3),
            ..Default::default()
        };
        assert!(!wants_three.compile().unwrap().matches(&trip));
    }

    #[test]
    fn leave_at_matches_a_twelve_hour_window() {
        let trip = simple_trip();

        let near = TripFilters {
            leave_at: Some(anchor() + Duration::hours(11)),
            ..Default::default()
        };
        assert!(near.compile().unwrap().matches(&trip));

        let far = TripFilters {
            leave_at: Some(anchor() + Duration::hours(13)),
            ..Default::default()
        };
        assert!(!far.compile().unwrap().matches(&trip));

        let earlier = TripFilters {
            leave_at: Some(anchor() - Duration::hours(11)),
            ..Default::default()
        };
        assert!(earlier.compile().unwrap().matches(&trip));
    }

    #[test]
    fn arrive_by_checks_the_last_stop() {
        let trip = simple_trip();
        // arrival is anchor + 30 min
        let near = TripFilters {
            arrive_by: Some(anchor() + Duration::minutes(30) + Duration::hours(12)),
            ..Default::default()
        };
        assert!(near.compile().unwrap().matches(&trip));

        let far = TripFilters {
            arrive_by: Some(anchor() + Duration::minutes(30) + Duration::hours(13)),
            ..Default::default()
        };
        assert!(!far.compile().unwrap().matches(&trip));
    }

    #[test]
    fn cargo_filter_requires_the_allowance() {
        let roomy = make_trip(
            vec![
                (base_point(), 4),
                (point_north_of(&base_point(), 10_000.0), 4),
            ],
            RideDetails::new(2, 1).unwrap(),
        );
        let bare = simple_trip();

        let filters = TripFilters {
            luggage: Some(1),
            animals: Some(1),
            ..Default::default()
        };
        let predicate = filters.compile().unwrap();

        assert!(predicate.matches(&roomy));
        assert!(!predicate.matches(&bare));
    }

    #[test]
    fn destination_filter_uses_the_default_radius() {
        let target = base_point();

        let near_trip = make_trip(
            vec![
                (point_north_of(&target, 50_000.0), 4),
                (point_north_of(&target, 1_999.0), 4),
            ],
            RideDetails::default(),
        );
        let far_trip = make_trip(
            vec![
                (point_north_of(&target, 50_000.0), 4),
                (point_north_of(&target, 2_001.0), 4),
            ],
            RideDetails::default(),
        );

        let filters = TripFilters {
            destination: Some(target),
            ..Default::default()
        };
        let predicate = filters.compile().unwrap();

        assert!(predicate.matches(&near_trip));
        assert!(!predicate.matches(&far_trip));
    }

    #[test]
    fn destination_filter_ignores_intermediate_stops_by_default() {
        let target = base_point();
        // passes right by the target but ends far away
        let trip = make_trip(
            vec![
                (point_north_of(&target, 100.0), 4),
                (point_north_of(&target, 50_000.0), 4),
            ],
            RideDetails::default(),
        );

        let last_only = TripFilters {
            destination: Some(target.clone()),
            ..Default::default()
        };
        assert!(!last_only.compile().unwrap().matches(&trip));

        let any_stop = TripFilters {
            destination: Some(target),
            any_stop: true,
            ..Default::default()
        };
        assert!(any_stop.compile().unwrap().matches(&trip));
    }

    #[test]
    fn explicit_radius_overrides_the_default() {
        let target = base_point();
        let trip = make_trip(
            vec![
                (point_north_of(&target, 50_000.0), 4),
                (point_north_of(&target, 5_000.0), 4),
            ],
            RideDetails::default(),
        );

        let wide = TripFilters {
            destination: Some(target.clone()),
            radius_meters: Some(6_000.0),
            ..Default::default()
        };
        assert!(wide.compile().unwrap().matches(&trip));

        let tight = TripFilters {
            destination: Some(target),
            radius_meters: Some(4_000.0),
            ..Default::default()
        };
        assert!(!tight.compile().unwrap().matches(&trip));
    }

    #[test]
    fn compile_rejects_invalid_filters() {
        let both_times = TripFilters {
            leave_at: Some(anchor()),
            arrive_by: Some(anchor()),
            ..Default::default()
        };
        assert_eq!(
            both_times.compile().unwrap_err(),
            DomainError::ConflictingSchedule
        );

        let bad_seats = TripFilters {
            seats: Some(11),
            ..Default::default()
        };
        assert_eq!(
            bad_seats.compile().unwrap_err(),
            DomainError::SeatsOutOfRange(11)
        );

        let bad_luggage = TripFilters {
            luggage: Some(3),
            ..Default::default()
        };
        assert_eq!(
            bad_luggage.compile().unwrap_err(),
            DomainError::LuggageOutOfRange(3)
        );

        let bad_animals = TripFilters {
            animals: Some(2),
            ..Default::default()
        };
        assert_eq!(
            bad_animals.compile().unwrap_err(),
            DomainError::AnimalsOutOfRange(2)
        );

        let bad_radius = TripFilters {
            radius_meters: Some(0.0),
            ..Default::default()
        };
        assert_eq!(
            bad_radius.compile().unwrap_err(),
            DomainError::NonPositiveRadius
        );

        let nan_radius = TripFilters {
            radius_meters: Some(f64::NAN),
            ..Default::default()
        };
        assert_eq!(
            nan_radius.compile().unwrap_err(),
            DomainError::NonPositiveRadius
        );
    }
}
