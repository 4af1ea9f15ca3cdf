/// Places search over a fixed catalog
///
/// Loads a JSON array of places and answers queries by keyword and region.
/// Good enough for the CLI and for running the locator without a network.

use crate::error::Result;
use crate::locator::places::{Place, PlacesSearch, SearchError, SearchRequest};
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

/// PlacesSearch backed by an in-memory list
#[derive(Debug, Clone, Default)]
pub struct CatalogPlacesSearch {
    places: Vec<Place>,
}

impl CatalogPlacesSearch {
    pub fn new(places: Vec<Place>) -> Self {
        Self { places }
    }

    /// Load a catalog from a JSON file holding an array of places
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let places: Vec<Place> = serde_json::from_str(raw)?;
        Ok(Self::new(places))
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

#[async_trait]
impl PlacesSearch for CatalogPlacesSearch {
    async fn search(&self, request: SearchRequest) -> std::result::Result<Option<Vec<Place>>, SearchError> {
        let region = request.region();

        // Places with no coordinate can't be placed in a region, skip them
        let hits: Vec<Place> = self
            .places
            .iter()
            .filter(|place| place.matches_query(&request.query))
            .filter(|place| {
                place
                    .placemark
                    .coordinate
                    .map_or(false, |coordinate| region.contains(&coordinate))
            })
            .cloned()
            .collect();

        debug!(
            query = %request.query,
            center = %request.center,
            hits = hits.len(),
            "catalog search"
        );

        Ok(Some(hits))
    }
}
