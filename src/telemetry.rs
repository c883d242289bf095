//! Tracing subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

use crate::config::ClientConfig;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `client.log_level` when set. Calling this twice is
/// harmless: the second install is ignored.
pub fn init_tracing(config: &ClientConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true);

    let installed = if config.json_logs {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };

    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
