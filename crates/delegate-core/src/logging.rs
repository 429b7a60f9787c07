// Tracing subscriber setup for binaries and tests

use std::sync::Once;

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::config::LoggingConfig;

/// Filter from `RUST_LOG` when set, otherwise from the configured level
fn filter_for(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level).with_context(|| format!("invalid log filter {level:?}")),
    }
}

/// Install the global subscriber described by the `[logging]` section.
///
/// JSON output carries the dispatch span fields (account, mode, depth) on
/// every event so aborted dispatches can be correlated with their caller.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = filter_for(&config.level)?;

    let (json, text) = if config.json {
        let layer = fmt::layer().json().with_current_span(true).with_span_list(false);
        (Some(layer), None)
    } else {
        let layer = fmt::layer().compact().with_target(true);
        (None, Some(layer))
    };

    let subscriber = Registry::default().with(filter).with(json).with(text);
    tracing::subscriber::set_global_default(subscriber)
        .context("a global tracing subscriber is already installed")
}

static TEST_INIT: Once = Once::new();

/// Install a debug-level subscriber that writes through the test harness.
/// Safe to call from every test; only the first call has an effect.
pub fn init_test_logging() {
    TEST_INIT.call_once(|| {
        let filter = filter_for("debug").unwrap_or_else(|_| EnvFilter::new("debug"));
        let layer = fmt::layer().with_target(true).with_test_writer();
        let _ = tracing::subscriber::set_global_default(Registry::default().with(filter).with(layer));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_logging_is_idempotent() {
        init_test_logging();
        init_test_logging();
        tracing::debug!("test logging installed");
    }

    #[test]
    fn test_second_global_install_is_an_error() {
        init_test_logging();
        assert!(init_tracing(&LoggingConfig::default()).is_err());
    }
}
