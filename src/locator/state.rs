/// Published locator state
///
/// Everything a renderer needs to draw the map and the store list. The
/// controller owns the only mutable copy; observers get clones.

use crate::geo::{meters_to_miles, Coordinate, LocationFix, Viewport};
use crate::locator::places::Place;
use crate::locator::provider::AuthorizationStatus;
use serde::Serialize;
use uuid::Uuid;

const UNKNOWN_STORE: &str = "Unknown Store";
const UNKNOWN_ADDRESS: &str = "Unknown Address";

/// A store ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreResult {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub coordinate: Coordinate,
    pub distance_miles: f64,
    /// Raw search hit this was built from
    pub place: Place,
}

impl StoreResult {
    /// Build a display entry for a place as seen from `origin`.
    ///
    /// Address falls back street -> placemark title -> "Unknown Address".
    /// A place without a coordinate is treated as sitting at `origin`, so
    /// its distance comes out as zero.
    pub fn from_place(place: Place, origin: &Coordinate) -> Self {
        let name = place
            .name
            .clone()
            .unwrap_or_else(|| UNKNOWN_STORE.to_string());

        let address = place
            .placemark
            .thoroughfare
            .clone()
            .or_else(|| place.placemark.title.clone())
            .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string());

        let coordinate = place.placemark.coordinate.unwrap_or(*origin);
        let distance_miles = meters_to_miles(origin.distance_to(&coordinate));

        Self {
            id: Uuid::new_v4(),
            name,
            address,
            coordinate,
            distance_miles,
            place,
        }
    }
}

/// Snapshot of the store locator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocatorState {
    /// None until the provider has reported something
    pub authorization_status: Option<AuthorizationStatus>,
    pub user_location: Option<LocationFix>,
    pub stores: Vec<StoreResult>,
    pub viewport: Viewport,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl LocatorState {
    /// Fresh state showing `viewport` and nothing else
    pub fn new(viewport: Viewport) -> Self {
        Self {
            authorization_status: None,
            user_location: None,
            stores: Vec::new(),
            viewport,
            is_loading: false,
            error_message: None,
        }
    }

    /// Not loading, and either something to show or an error explaining why not
    pub fn is_settled(&self) -> bool {
        !self.is_loading && (self.error_message.is_some() || !self.stores.is_empty())
    }
}
