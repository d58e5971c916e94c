//! Logging setup

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "kansa_desk=info,kansa_admin=info";

/// Install the global subscriber; `RUST_LOG` overrides the default filter
pub fn init_logger(json_format: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    if json_format {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
