use std::path::PathBuf;

use folio_runtime::StorageError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("logging already initialized: {message}")]
    Logging { message: String },

    #[error("no data directory; pass --data-dir")]
    NoDataDir,
}

impl AppError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        1
    }
}
