//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `domain_rank` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Exit status on startup failure
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use domain_rank::config::Opt;
use domain_rank::initialization::init_logger_with;
use domain_rank::{run, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from(Opt::parse());

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let mut stdout = tokio::io::BufWriter::new(tokio::io::stdout());
    match run(config, &mut stdout).await {
        Ok(report) => {
            log::info!(
                "Annotated {} domain{} in {:.1}s using {}",
                report.written,
                if report.written == 1 { "" } else { "s" },
                report.elapsed_seconds,
                report.snapshot_path.display()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("domain_rank error: {:#}", e);
            process::exit(1);
        }
    }
}
