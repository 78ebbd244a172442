//! Logging bootstrap for plug-in processes.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `GOAT_LOG=goat_graph=trace`.
pub const LOG_ENV: &str = "GOAT_LOG";

const DEFAULT_FILTER: &str = "info";

static LOG_INIT_ONCE: Once = Once::new();

/// Install a stderr `fmt` subscriber filtered by [`LOG_ENV`].
///
/// Safe to call repeatedly. If the host process already installed a global
/// subscriber, that one is kept.
pub fn init_logging() {
    LOG_INIT_ONCE.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .try_init()
            .is_ok();
        tracing::debug!(installed, "logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_harmless() {
        init_logging();
        init_logging();
        tracing::info!("still logging");
    }
}
