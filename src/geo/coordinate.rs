/// Coordinates and distances
///
/// Plain WGS84 latitude/longitude pairs plus the haversine distance between
/// them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mean earth radius used for great-circle distances
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Statute mile in meters
pub const METERS_PER_MILE: f64 = 1609.34;

/// A point on the map, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another point in meters (haversine)
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_METERS * c
    }

    /// Whether the values are usable lat/lon degrees
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

/// Convert a distance in meters to miles
pub fn meters_to_miles(meters: f64) -> f64 {
    meters / METERS_PER_MILE
}

/// A single position reading from the location provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub coordinate: Coordinate,
    pub timestamp: DateTime<Utc>,
    /// Radius of uncertainty in meters
    pub horizontal_accuracy: f64,
}

impl LocationFix {
    pub fn new(coordinate: Coordinate, timestamp: DateTime<Utc>, horizontal_accuracy: f64) -> Self {
        Self {
            coordinate,
            timestamp,
            horizontal_accuracy,
        }
    }

    /// Fix stamped with the current time and perfect accuracy
    pub fn now(coordinate: Coordinate) -> Self {
        Self::new(coordinate, Utc::now(), 0.0)
    }

    /// Distance in meters from this fix to a point
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        self.coordinate.distance_to(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_self_is_zero() {
        let sf = Coordinate::new(37.7749, -122.4194);
        assert_eq!(sf.distance_to(&sf), 0.0);
    }

    #[test]
    fn test_known_distance() {
        // San Francisco to Los Angeles is roughly 559 km
        let sf = Coordinate::new(37.7749, -122.4194);
        let la = Coordinate::new(34.0522, -118.2437);

        let km = sf.distance_to(&la) / 1000.0;
        assert!((km - 559.0).abs() < 2.0, "got {} km", km);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Coordinate::new(37.7749, -122.4194);
        let b = Coordinate::new(37.8044, -122.2712);

        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-6);
    }

    #[test]
    fn test_one_degree_latitude() {
        // One degree of latitude is about 111.2 km on a 6371 km sphere
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(1.0, 0.0);

        assert!((a.distance_to(&b) - 111_195.0).abs() < 10.0);
    }

    #[test]
    fn test_meters_to_miles() {
        assert_eq!(meters_to_miles(1609.34), 1.0);
        assert_eq!(meters_to_miles(0.0), 0.0);
        assert!((meters_to_miles(5000.0) - 3.1069).abs() < 1e-3);
    }

    #[test]
    fn test_is_valid() {
        assert!(Coordinate::new(37.0, -122.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, f64::NAN).is_valid());
    }
}
