/// pantry-tracker library
///
/// Food stock, recipe suggestions, and a nearby grocery store finder.

pub mod config;
pub mod error;
pub mod geo;
pub mod inventory;
pub mod locator;
pub mod logging;

// Re-exports for convenience
pub use config::{Config, LocatorConfig};
pub use error::{PantryError, Result};
pub use inventory::Inventory;
pub use locator::StoreLocator;
