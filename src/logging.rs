/// Logging setup
///
/// tracing everywhere, one fmt subscriber on stderr so stdout stays clean
/// for command output.

use crate::error::{PantryError, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber with the given filter directive.
///
/// Fails if the directive doesn't parse or a subscriber is already set.
pub fn init(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .map_err(|e| PantryError::Config(format!("invalid log level '{}': {}", level, e)))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| PantryError::Config(format!("logging already initialized: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_directive() {
        let result = init("pantry=notalevel");
        assert!(matches!(result, Err(PantryError::Config(_))));
    }
}
