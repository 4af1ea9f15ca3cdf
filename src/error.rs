/// Error types for pantry-tracker
///
/// Everything that can go wrong in the inventory, recipe lookup and store
/// locator ends up as a PantryError. Uses thiserror for the boilerplate.

use thiserror::Error;
use uuid::Uuid;

/// Main error type for pantry-tracker operations
#[derive(Error, Debug)]
pub enum PantryError {
    /// User (or the system) refused location access
    #[error("Location permission denied")]
    PermissionDenied,

    /// Position could not be determined right now (transient)
    #[error("Location unavailable")]
    LocationUnavailable,

    /// Location services are switched off system-wide
    #[error("Location services disabled")]
    LocationServiceDisabled,

    /// The places search backend failed
    #[error("Store search failed: {0}")]
    SearchFailed(String),

    /// Search came back with nothing. Not really an error, just no data.
    #[error("No stores found nearby")]
    NoResults,

    /// Food item not in the inventory
    #[error("Food item not found: {0}")]
    ItemNotFound(Uuid),

    /// Quantity outside the allowed range
    #[error("Quantity {0} is out of range (0-{max})", max = crate::inventory::MAX_QUANTITY)]
    InvalidQuantity(u32),

    /// Recipe lookup called without an ingredient
    #[error("Invalid ingredient: {0:?}")]
    InvalidIngredient(String),

    /// The store locator task is gone (handle outlived it)
    #[error("Store locator has stopped")]
    LocatorStopped,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors (config and catalog files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for pantry-tracker operations
pub type Result<T> = std::result::Result<T, PantryError>;

impl PantryError {
    /// Message suitable for showing to the user as-is.
    ///
    /// The locator only ever surfaces a single string, so the wording here
    /// is what ends up on screen.
    pub fn user_message(&self) -> String {
        match self {
            PantryError::PermissionDenied => {
                "Location access denied. Please enable in Settings.".to_string()
            }
            PantryError::LocationUnavailable => {
                "Unable to determine location. Please try again.".to_string()
            }
            PantryError::LocationServiceDisabled => {
                "Please enable Location Services in Settings".to_string()
            }
            PantryError::SearchFailed(reason) => {
                format!("Failed to find stores: {}", reason)
            }
            PantryError::NoResults => "No stores found nearby".to_string(),
            PantryError::ItemNotFound(id) => {
                format!("Food item {} is no longer in your stock", id)
            }
            PantryError::InvalidQuantity(quantity) => {
                format!(
                    "Quantity must be between 0 and {} (got {})",
                    crate::inventory::MAX_QUANTITY,
                    quantity
                )
            }
            PantryError::InvalidIngredient(_) => {
                "Pick an ingredient to look up recipes for".to_string()
            }
            PantryError::LocatorStopped => {
                "Store search stopped unexpectedly. Please reopen the map.".to_string()
            }
            PantryError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
            PantryError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            PantryError::Serialization(e) => {
                format!("Data format error: {}", e)
            }
        }
    }
}
