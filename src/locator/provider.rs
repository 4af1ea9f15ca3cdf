/// Location provider contract
///
/// The device side of the store locator: permission state, the system-wide
/// location switch, and a stream of position events pushed to whoever
/// subscribed.

use crate::geo::LocationFix;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

/// Location permission as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    /// User hasn't been asked yet
    NotDetermined,
    /// Blocked by policy (parental controls etc.), user can't change it
    Restricted,
    /// User said no
    Denied,
    AuthorizedWhenInUse,
    AuthorizedAlways,
    /// Anything a newer platform reports that we don't know about
    Unknown,
}

impl AuthorizationStatus {
    pub fn is_granted(&self) -> bool {
        matches!(
            self,
            AuthorizationStatus::AuthorizedWhenInUse | AuthorizationStatus::AuthorizedAlways
        )
    }

    pub fn is_denied(&self) -> bool {
        matches!(
            self,
            AuthorizationStatus::Denied | AuthorizationStatus::Restricted
        )
    }
}

impl std::fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AuthorizationStatus::NotDetermined => "not_determined",
            AuthorizationStatus::Restricted => "restricted",
            AuthorizationStatus::Denied => "denied",
            AuthorizationStatus::AuthorizedWhenInUse => "authorized_when_in_use",
            AuthorizationStatus::AuthorizedAlways => "authorized_always",
            AuthorizationStatus::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Failure reported by the location provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocationError {
    #[error("location access denied")]
    Denied,

    /// Position temporarily unknown; the provider keeps trying
    #[error("location unknown")]
    LocationUnknown,

    #[error("{0}")]
    Other(String),
}

/// Something the location provider wants the locator to know
#[derive(Debug, Clone, PartialEq)]
pub enum LocationEvent {
    AuthorizationChanged(AuthorizationStatus),
    /// One or more fixes, oldest first
    LocationsUpdated(Vec<LocationFix>),
    Failed(LocationError),
}

/// Where a provider pushes its events
pub type LocationEventSender = mpsc::UnboundedSender<LocationEvent>;

/// Device geolocation service.
///
/// Calls are fire-and-forget: anything that happens as a result (the user
/// answering the permission prompt, the first fix arriving) comes back later
/// as a [`LocationEvent`] on the subscribed sender, from whatever thread the
/// provider likes.
pub trait LocationProvider: Send + Sync {
    /// Current permission state
    fn authorization_status(&self) -> AuthorizationStatus;

    /// Whether location services are on system-wide
    fn location_services_enabled(&self) -> bool;

    /// Ask the user for when-in-use permission
    fn request_permission(&self);

    /// Begin delivering position updates. Updates stop when the provider is
    /// dropped.
    fn start_updates(&self);

    /// Register the receiver of future events
    fn subscribe(&self, events: LocationEventSender);
}
