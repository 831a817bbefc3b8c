//! Resolved startup configuration.

use std::path::PathBuf;
use std::time::Duration;

use folio_runtime::ProgramConfig;

use crate::cli::Cli;
use crate::error::{AppError, Result};

pub const APP_DIR: &str = "folio";
pub const LOG_FILE_NAME: &str = "folio.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub log_file: PathBuf,
    pub seed: u64,
    pub reset: bool,
    pub mouse: bool,
}

/// `<platform data dir>/folio`, when the platform has one.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR))
}

impl AppConfig {
    pub fn from_cli(mut cli: Cli) -> Result<Self> {
        let data_dir = match cli.data_dir.take() {
            Some(dir) => dir,
            None => default_data_dir().ok_or(AppError::NoDataDir)?,
        };
        Ok(Self::resolve(cli, data_dir))
    }

    fn resolve(cli: Cli, data_dir: PathBuf) -> Self {
        let log_file = cli
            .log_file
            .unwrap_or_else(|| data_dir.join(LOG_FILE_NAME));
        Self {
            data_dir,
            log_file,
            seed: cli.seed.unwrap_or_else(rand::random),
            reset: cli.reset,
            mouse: !cli.no_mouse,
        }
    }

    pub fn program_config(&self) -> ProgramConfig {
        let config = ProgramConfig::default().with_poll_timeout(Duration::from_millis(50));
        if self.mouse {
            config
        } else {
            config.without_mouse()
        }
    }
}
