/// Configuration for pantry-tracker
///
/// Read from ~/.pantry-tracker/config.json when it exists, defaults
/// otherwise. PANTRY_LOG overrides the log level.

use crate::error::{PantryError, Result};
use crate::geo::{Coordinate, Span};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the log filter
pub const LOG_ENV_VAR: &str = "PANTRY_LOG";

const CONFIG_DIR: &str = ".pantry-tracker";
const CONFIG_FILE: &str = "config.json";

/// Store locator tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Free-text query sent to the places backend
    pub search_query: String,
    /// Side of the square search region around the user, in meters
    pub search_region_meters: f64,
    /// Map center before the first fix arrives
    pub default_center: Coordinate,
    /// Span used whenever the map re-centers on the user
    pub default_span: Span,
    /// How much to widen the box around search results
    pub fit_multiplier: f64,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            search_query: "grocery store supermarket".to_string(),
            search_region_meters: 5000.0,
            default_center: Coordinate::new(37.7749, -122.4194),
            default_span: Span::new(0.1, 0.1),
            fit_multiplier: 1.5,
        }
    }
}

impl LocatorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.search_query.trim().is_empty() {
            return Err(PantryError::Config("search_query is empty".to_string()));
        }
        if !(self.search_region_meters > 0.0) {
            return Err(PantryError::Config(format!(
                "search_region_meters must be positive, got {}",
                self.search_region_meters
            )));
        }
        if !self.default_center.is_valid() {
            return Err(PantryError::Config(format!(
                "default_center {} is not a valid coordinate",
                self.default_center
            )));
        }
        if !(self.default_span.latitude_delta > 0.0 && self.default_span.longitude_delta > 0.0) {
            return Err(PantryError::Config("default_span must be positive".to_string()));
        }
        if !(self.fit_multiplier >= 1.0) {
            return Err(PantryError::Config(format!(
                "fit_multiplier must be at least 1.0, got {}",
                self.fit_multiplier
            )));
        }
        Ok(())
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// tracing filter directive, e.g. "info" or "pantry_tracker_lib=debug"
    pub log_level: String,
    /// Places catalog used by the CLI when --places isn't given
    pub places_catalog: Option<PathBuf>,
    pub locator: LocatorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            places_catalog: None,
            locator: LocatorConfig::default(),
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults when the
    /// file isn't there
    pub fn load() -> Result<Self> {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };

        config.apply_env();
        config.locator.validate()?;

        Ok(config)
    }

    /// Parse and validate a config file. Env overrides are not applied.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&raw)?;
        config.locator.validate()?;
        Ok(config)
    }

    /// ~/.pantry-tracker/config.json
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    fn apply_env(&mut self) {
        if let Ok(level) = std::env::var(LOG_ENV_VAR) {
            if !level.trim().is_empty() {
                self.log_level = level;
            }
        }
    }
}
