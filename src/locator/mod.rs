/// Store locator
///
/// Finds grocery stores near the user: waits for location permission,
/// follows position updates, searches for stores around each fix and frames
/// the map around what it found.

pub mod catalog;
pub mod controller;
pub mod places;
pub mod presenter;
pub mod provider;
pub mod simulated;
pub mod state;

pub use catalog::CatalogPlacesSearch;
pub use controller::StoreLocator;
pub use places::{Place, Placemark, PlacesSearch, SearchError, SearchRequest};
pub use provider::{
    AuthorizationStatus, LocationError, LocationEvent, LocationEventSender, LocationProvider,
};
pub use simulated::SimulatedLocationProvider;
pub use state::{LocatorState, StoreResult};
