use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;

use crate::{CliError, CliResult};

const DEFAULT_FILTER: &str = "warn";
const DEFAULT_FILE_FILTER: &str = "info";

/// Installs the global subscriber.
///
/// Without a log file, human-readable events go to stderr filtered by
/// `RUST_LOG`. With one, every event at `info` or above is appended as JSON.
pub fn init_logging(log_file: Option<&Path>) -> CliResult<()> {
    match log_file {
        Some(path) => init_file_logging(path),
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(DEFAULT_FILTER))
                .with_writer(io::stderr)
                .try_init()
                .map_err(|err| CliError::Logging(err.to_string()))
        }
    }
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Appends JSON events to `path`; the file is shared behind a mutex so
/// concurrent events never interleave within a line.
fn init_file_logging(path: &Path) -> CliResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_FILE_FILTER))
        .with(layer)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}
