//! Logging setup

use mano_core::{ManoError, ManoResult};
use tracing_subscriber::EnvFilter;

use crate::LogConfig;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.level`. Fails if a subscriber is
/// already installed or the level is not a valid filter directive.
pub fn init(config: &LogConfig) -> ManoResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| ManoError::InvalidConfig(format!("log level {:?}: {}", config.level, e)))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.targets);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| ManoError::InvalidConfig(format!("tracing subscriber: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_level_rejected() {
        std::env::remove_var("RUST_LOG");
        let config = LogConfig {
            level: "mano=loudest".to_string(),
            ..LogConfig::default()
        };
        assert!(matches!(init(&config), Err(ManoError::InvalidConfig(_))));
    }

    #[test]
    fn test_second_init_fails() {
        let config = LogConfig::default();
        let _ = init(&config);
        assert!(init(&config).is_err());
    }
}
