//! Tracing subscriber setup

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};

/// Map a configured level name to a tracing level; unknown names fall back to info
pub fn parse_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}

/// Install the global stderr subscriber
pub fn init_logging(config: &ServerConfig) -> ServerResult<()> {
    use tracing_subscriber::fmt;

    fmt()
        .with_max_level(parse_level(&config.log_level))
        .with_target(config.debug)
        .with_thread_ids(config.debug)
        .with_file(config.debug)
        .with_line_number(config.debug)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| ServerError::Logging(e.to_string()))
}
