/// Map regions
///
/// A viewport is a center plus a latitude/longitude span. The locator
/// derives one from the user's position, and another from the bounding box
/// of a search response.

use crate::geo::Coordinate;
use serde::{Deserialize, Serialize};

/// Meters per degree of latitude (and of longitude at the equator)
const METERS_PER_DEGREE: f64 = 111_320.0;

/// Latitude/longitude deltas in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Span {
    pub fn new(latitude_delta: f64, longitude_delta: f64) -> Self {
        Self {
            latitude_delta,
            longitude_delta,
        }
    }
}

/// Visible map area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: Coordinate,
    pub span: Span,
}

impl Viewport {
    pub fn new(center: Coordinate, span: Span) -> Self {
        Self { center, span }
    }

    /// Region `latitudinal_meters` tall and `longitudinal_meters` wide
    /// centered on `center`
    pub fn from_meters(center: Coordinate, latitudinal_meters: f64, longitudinal_meters: f64) -> Self {
        let latitude_delta = latitudinal_meters / METERS_PER_DEGREE;

        // Longitude degrees shrink towards the poles
        let cos_lat = center.latitude.to_radians().cos().abs().max(1e-6);
        let longitude_delta = (longitudinal_meters / (METERS_PER_DEGREE * cos_lat)).min(360.0);

        Self::new(center, Span::new(latitude_delta, longitude_delta))
    }

    /// Smallest region covering every point, with each span scaled by
    /// `multiplier`. Returns None for an empty slice.
    ///
    /// The center is the midpoint of the extremes, not the mean of the
    /// points.
    pub fn fitting(points: &[Coordinate], multiplier: f64) -> Option<Self> {
        let first = points.first()?;

        let (mut min_lat, mut max_lat) = (first.latitude, first.latitude);
        let (mut min_lon, mut max_lon) = (first.longitude, first.longitude);

        for point in &points[1..] {
            min_lat = min_lat.min(point.latitude);
            max_lat = max_lat.max(point.latitude);
            min_lon = min_lon.min(point.longitude);
            max_lon = max_lon.max(point.longitude);
        }

        let center = Coordinate::new((min_lat + max_lat) / 2.0, (min_lon + max_lon) / 2.0);
        let span = Span::new(
            (max_lat - min_lat) * multiplier,
            (max_lon - min_lon) * multiplier,
        );

        Some(Self::new(center, span))
    }

    pub fn min_latitude(&self) -> f64 {
        self.center.latitude - self.span.latitude_delta / 2.0
    }

    pub fn max_latitude(&self) -> f64 {
        self.center.latitude + self.span.latitude_delta / 2.0
    }

    pub fn min_longitude(&self) -> f64 {
        self.center.longitude - self.span.longitude_delta / 2.0
    }

    pub fn max_longitude(&self) -> f64 {
        self.center.longitude + self.span.longitude_delta / 2.0
    }

    /// Whether a point falls inside the region (edges included)
    pub fn contains(&self, point: &Coordinate) -> bool {
        (self.min_latitude()..=self.max_latitude()).contains(&point.latitude)
            && (self.min_longitude()..=self.max_longitude()).contains(&point.longitude)
    }
}
