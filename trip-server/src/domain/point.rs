//! Geographic point type.

use std::fmt;

/// Error returned when constructing an invalid point.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid point: {reason}")]
pub struct InvalidPoint {
    reason: &'static str,
}

/// A validated geographic coordinate with a display label.
///
/// Longitude is bounded to [-180, 180] and latitude to [-90, 90]. A `Point`
/// is immutable once constructed, so code that receives one can trust both
/// coordinates are in range and the label is non-empty.
///
/// # Examples
///
/// ```
/// use trip_server::domain::Point;
///
/// let home = Point::new(-73.5673, 45.5017, "Montreal").unwrap();
/// assert_eq!(home.name(), "Montreal");
///
/// // Out-of-range coordinates are rejected
/// assert!(Point::new(-181.0, 45.0, "nowhere").is_err());
/// assert!(Point::new(0.0, 90.5, "nowhere").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    longitude: f64,
    latitude: f64,
    name: String,
}

/// Minimum longitude value.
pub const MIN_LONGITUDE: f64 = -180.0;

/// Maximum longitude value.
pub const MAX_LONGITUDE: f64 = 180.0;

/// Minimum latitude value.
pub const MIN_LATITUDE: f64 = -90.0;

/// Maximum latitude value.
pub const MAX_LATITUDE: f64 = 90.0;

impl Point {
    /// Construct a point, validating coordinate ranges and the label.
    pub fn new(
        longitude: f64,
        latitude: f64,
        name: impl Into<String>,
    ) -> Result<Self, InvalidPoint> {
        // NaN fails the range check, so non-finite values are rejected too.
        if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
            return Err(InvalidPoint {
                reason: "longitude must be between -180 and 180",
            });
        }

        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
            return Err(InvalidPoint {
                reason: "latitude must be between -90 and 90",
            });
        }

        let name = name.into();
        if name.trim().is_empty() {
            return Err(InvalidPoint {
                reason: "name is empty",
            });
        }

        Ok(Self {
            longitude,
            latitude,
            name,
        })
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Display label for this location.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Great-circle distance to another point, in meters.
    ///
    /// Haversine formula on a spherical Earth. Accurate to well under 0.5%
    /// for the distances a trip search cares about.
    pub fn distance_meters(&self, other: &Point) -> f64 {
        const EARTH_RADIUS_M: f64 = 6_371_000.0;

        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_M * c
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}
