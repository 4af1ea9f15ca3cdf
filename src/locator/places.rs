/// Places search contract
///
/// Point-of-interest lookup: free-text query plus a square region around a
/// center point. One shot per call, no paging.

use crate::error::PantryError;
use crate::geo::{Coordinate, Viewport};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured address and position of a place
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Placemark {
    /// Street name
    #[serde(default)]
    pub thoroughfare: Option<String>,
    /// Display title, usually the full one-line address
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub coordinate: Option<Coordinate>,
}

/// A single search hit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub name: Option<String>,
    /// Point-of-interest category, e.g. "grocery"
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub placemark: Placemark,
}

impl Place {
    /// Whether any word of `query` shows up in the name or category
    pub fn matches_query(&self, query: &str) -> bool {
        let haystack = format!(
            "{} {}",
            self.name.as_deref().unwrap_or_default(),
            self.category.as_deref().unwrap_or_default()
        )
        .to_lowercase();

        query
            .split_whitespace()
            .any(|term| haystack.contains(&term.to_lowercase()))
    }
}

/// What to look for and where
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub center: Coordinate,
    /// Side length of the square search region
    pub region_meters: f64,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, center: Coordinate, region_meters: f64) -> Self {
        Self {
            query: query.into(),
            center,
            region_meters,
        }
    }

    pub fn radius_meters(&self) -> f64 {
        self.region_meters / 2.0
    }

    /// The search region as map degrees
    pub fn region(&self) -> Viewport {
        Viewport::from_meters(self.center, self.region_meters, self.region_meters)
    }
}

/// Failure from the search backend
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct SearchError {
    pub message: String,
}

impl SearchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<SearchError> for PantryError {
    fn from(err: SearchError) -> Self {
        PantryError::SearchFailed(err.message)
    }
}

/// Point-of-interest search backend.
///
/// `Ok(None)` means the backend answered without a result set, which the
/// locator treats the same as an empty one.
#[async_trait]
pub trait PlacesSearch: Send + Sync {
    async fn search(&self, request: SearchRequest) -> Result<Option<Vec<Place>>, SearchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(name: Option<&str>, category: Option<&str>) -> Place {
        Place {
            name: name.map(str::to_string),
            category: category.map(str::to_string),
            placemark: Placemark::default(),
        }
    }

    #[test]
    fn test_matches_query() {
        let query = "grocery store supermarket";

        assert!(place(Some("Safeway"), Some("supermarket")).matches_query(query));
        assert!(place(Some("Corner Grocery"), None).matches_query(query));
        assert!(place(None, Some("Grocery")).matches_query(query));
        assert!(!place(Some("Blue Bottle"), Some("cafe")).matches_query(query));
        assert!(!place(None, None).matches_query(query));
    }

    #[test]
    fn test_request_region() {
        let request = SearchRequest::new("grocery", Coordinate::new(0.0, 0.0), 5000.0);

        assert_eq!(request.radius_meters(), 2500.0);
        let region = request.region();
        assert_eq!(region.center, Coordinate::new(0.0, 0.0));
        assert!((region.span.latitude_delta - 5000.0 / 111_320.0).abs() < 1e-12);
    }

    #[test]
    fn test_search_error_conversion() {
        let err: PantryError = SearchError::new("timed out").into();
        assert_eq!(err.user_message(), "Failed to find stores: timed out");
    }

    #[test]
    fn test_place_from_json() {
        let json = r#"{"name": "Trader Joe's", "placemark": {"title": "10 4th St"}}"#;
        let place: Place = serde_json::from_str(json).unwrap();

        assert_eq!(place.name.as_deref(), Some("Trader Joe's"));
        assert_eq!(place.placemark.title.as_deref(), Some("10 4th St"));
        assert!(place.placemark.coordinate.is_none());
        assert!(place.category.is_none());
    }
}
