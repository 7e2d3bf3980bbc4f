//! Runtime setup for the command-line entry point.

use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::{load_config, load_config_from, GeneratorConfig};
use crate::errors::GenError;

/// Default log filter for a `-v` count. `RUST_LOG` takes precedence.
pub fn default_log_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `log` records are forwarded to it.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter(verbosity)));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        // Already configured - this is fine, just ignore
        eprintln!("Note: Logging already configured: {}", e);
    }
}

/// Explicit config file if given, otherwise the nearest discovered one.
pub fn resolve_config(explicit: Option<&PathBuf>) -> Result<GeneratorConfig, GenError> {
    match explicit {
        Some(path) => load_config_from(path),
        None => Ok(load_config()),
    }
}
