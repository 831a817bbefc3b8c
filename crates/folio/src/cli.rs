use std::path::PathBuf;

use clap::Parser;
use folio_runtime::{FileStorage, Program, SharedStorage, StorageBackend, shared};

use crate::app::{Portfolio, PortfolioOptions};
use crate::config::AppConfig;
use crate::draft::DRAFT_KEY;
use crate::error::Result;
use crate::logging::init_logging;
use crate::theme_store::THEME_KEY;

#[derive(Debug, Parser)]
#[command(
    name = "folio",
    about = "Homaira Yousufi's developer portfolio, in the terminal",
    version
)]
pub struct Cli {
    /// Directory for persisted state and the log file.
    #[arg(long = "data-dir", env = "FOLIO_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Write logs here instead of `<data-dir>/folio.log`.
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Seed for the header quote and the project-updates feed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Forget the saved theme and contact draft before starting.
    #[arg(long)]
    pub reset: bool,

    /// Leave mouse capture off.
    #[arg(long = "no-mouse")]
    pub no_mouse: bool,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::from_cli(cli)?;
    std::fs::create_dir_all(&config.data_dir)?;
    init_logging(&config.log_file)?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        seed = config.seed,
        "starting folio"
    );

    let storage = shared(FileStorage::open_dir(&config.data_dir)?);
    if config.reset {
        reset_persisted(&storage)?;
    }

    let app = Portfolio::new(storage, PortfolioOptions::new(config.seed));
    let mut program = Program::with_config(app, config.program_config());
    program.run()?;
    tracing::info!("folio exited");
    Ok(())
}

/// Drop the persisted theme and contact draft.
pub fn reset_persisted(storage: &SharedStorage) -> Result<()> {
    let mut storage = storage.borrow_mut();
    storage.remove(THEME_KEY)?;
    storage.remove(DRAFT_KEY)?;
    tracing::info!("cleared persisted state");
    Ok(())
}
