/// Presentation helpers
///
/// The bits of display logic that don't depend on any UI toolkit: how the
/// list is ordered, how distances read, and when to offer a Settings link.

use crate::locator::state::{LocatorState, StoreResult};

const LOADING_MESSAGE: &str = "Finding stores...";

/// Stores nearest first
pub fn stores_by_distance(stores: &[StoreResult]) -> Vec<&StoreResult> {
    let mut sorted: Vec<&StoreResult> = stores.iter().collect();
    sorted.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    sorted
}

/// "1.2 mi"
pub fn distance_label(miles: f64) -> String {
    format!("{:.1} mi", miles)
}

/// "3 stores found nearby", or nothing for an empty list
pub fn results_banner(count: usize) -> Option<String> {
    if count == 0 {
        None
    } else {
        Some(format!("{} stores found nearby", count))
    }
}

/// Only errors that send the user to Settings get an "Open Settings" button
pub fn offers_settings_link(error_message: &str) -> bool {
    error_message.contains("Settings")
}

/// Line shown under the map: progress while loading, otherwise the error
pub fn status_line(state: &LocatorState) -> Option<String> {
    if state.is_loading {
        Some(LOADING_MESSAGE.to_string())
    } else {
        state.error_message.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{Coordinate, Span, Viewport};
    use crate::locator::places::{Place, Placemark};

    fn result(name: &str, latitude: f64) -> StoreResult {
        let origin = Coordinate::new(37.0, -122.0);
        let place = Place {
            name: Some(name.to_string()),
            category: None,
            placemark: Placemark {
                coordinate: Some(Coordinate::new(latitude, -122.0)),
                ..Default::default()
            },
        };
        StoreResult::from_place(place, &origin)
    }

    #[test]
    fn test_stores_by_distance() {
        let stores = vec![result("far", 37.2), result("near", 37.01), result("mid", 37.1)];

        let names: Vec<&str> = stores_by_distance(&stores)
            .iter()
            .map(|store| store.name.as_str())
            .collect();

        assert_eq!(names, vec!["near", "mid", "far"]);
    }

    #[test]
    fn test_distance_label() {
        assert_eq!(distance_label(0.0), "0.0 mi");
        assert_eq!(distance_label(1.26), "1.3 mi");
        assert_eq!(distance_label(12.0), "12.0 mi");
    }

    #[test]
    fn test_results_banner() {
        assert_eq!(results_banner(0), None);
        assert_eq!(results_banner(4).as_deref(), Some("4 stores found nearby"));
    }

    #[test]
    fn test_offers_settings_link() {
        assert!(offers_settings_link(
            "Please enable location access in Settings to find nearby stores."
        ));
        assert!(offers_settings_link("Please enable Location Services in Settings"));
        assert!(!offers_settings_link("No stores found nearby"));
        assert!(!offers_settings_link("Unable to determine location. Please try again."));
    }

    #[test]
    fn test_status_line() {
        let mut state = LocatorState::new(Viewport::new(Coordinate::new(0.0, 0.0), Span::new(0.1, 0.1)));
        assert_eq!(status_line(&state), None);

        state.error_message = Some("No stores found nearby".to_string());
        assert_eq!(status_line(&state).as_deref(), Some("No stores found nearby"));

        state.is_loading = true;
        assert_eq!(status_line(&state).as_deref(), Some("Finding stores..."));
    }
}
