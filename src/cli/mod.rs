//! CLI module for riskmon
//!
//! There are no subcommands: every operation runs through the
//! interactive menu. The CLI carries ambient configuration only (data
//! directory and verbosity) before handing control to the console app.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::console::App;
use crate::data_paths::{DataPaths, DEFAULT_DATA_DIR};
use crate::logging::{init_logging, LogMode, LoggingConfig};
use crate::prices::{PriceSource, YahooFinance};
use crate::store::TradeStore;

#[derive(Parser)]
#[command(name = "riskmon")]
#[command(version)]
#[command(about = "Terminal equity portfolio tracker with live risk analysis", long_about = None)]
pub struct Cli {
    /// Data directory path (default: ./data)
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Verbose logging (mirrors the log stream to stderr)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Wire up paths, logging, storage, and prices, then run the menu
    pub async fn execute(self) -> Result<()> {
        let data_paths = DataPaths::new(&self.data_dir);

        // Ensure all directories exist
        data_paths
            .ensure_directories()
            .context("Failed to create data directories")?;

        let logging_config = if self.verbose > 0 {
            LoggingConfig::new(LogMode::ConsoleAndFile, data_paths.clone())
                .with_default_filter("debug")
        } else {
            LoggingConfig::new(LogMode::FileOnly, data_paths.clone())
        };
        init_logging(logging_config)?;

        let store = TradeStore::new(data_paths.database_file());
        store
            .initialize()
            .context("Failed to initialize the portfolio database")?;

        let prices = PriceSource::new(YahooFinance::new());

        App::new(store, prices).run().await
    }
}
