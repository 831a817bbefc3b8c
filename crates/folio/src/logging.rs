//! Logging through `tracing` and `tracing-subscriber`.
//!
//! The terminal belongs to the UI, so log lines go to a file. The filter is
//! read from `FOLIO_LOG` (same syntax as `RUST_LOG`) and defaults to `info`.
//!
//! # Log Levels
//!
//! - `warn`: storage failures, corrupt persisted state
//! - `info`: startup, shutdown, theme changes
//! - `debug`: focus moves, submits, timer mount/unmount
//! - `trace`: heartbeat activity

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::error::{AppError, Result};

pub const LOG_ENV: &str = "FOLIO_LOG";
pub const DEFAULT_FILTER: &str = "info";

/// Append to `path` and install the global subscriber.
pub fn init_logging(path: &Path) -> Result<()> {
    let file = open_log_file(path)?;
    init_logging_with_writer(Mutex::new(file))
}

/// Install the global subscriber over any writer (tests use a buffer).
pub fn init_logging_with_writer<W>(writer: W) -> Result<()>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    build_subscriber(writer)
        .try_init()
        .map_err(|err| AppError::Logging {
            message: err.to_string(),
        })
}

/// The filtered file subscriber, not yet installed anywhere.
pub fn build_subscriber<W>(writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);
    tracing_subscriber::registry()
        .with(build_env_filter())
        .with(layer)
}

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| AppError::LogFile {
            path: path.to_owned(),
            source,
        })
}

/// `FOLIO_LOG` when set and valid, otherwise [`DEFAULT_FILTER`].
pub fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
