//! domain_rank library: apex domain resolution and Tranco rank lookup
//!
//! This library resolves domain names to their registrable ("apex") domain and
//! annotates each with its rank on the Tranco top sites list. The list is
//! cached on disk as a timestamped snapshot and refreshed once it is older
//! than seven days.
//!
//! # Example
//!
//! ```no_run
//! use domain_rank::{run, Config};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     input: Some(PathBuf::from("domains.txt")),
//!     ..Default::default()
//! };
//!
//! let mut out = tokio::io::stdout();
//! let report = run(config, &mut out).await?;
//! eprintln!("{} lines, {} results", report.lines_read, report.written);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

#![deny(missing_docs)]

pub mod config;
mod domain;
pub mod error_handling;
pub mod initialization;
pub mod ranking;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use domain::effective_apex;
pub use error_handling::{ApexError, RankError};
pub use ranking::{RankIndex, RankingFetcher, RankingService, SnapshotStore};
pub use run::{annotate_lines, run, RunReport};

// Internal run module (reads input, writes `<raw> <apex> <rank>` lines)
mod run {
    use anyhow::{Context, Result};
    use std::path::PathBuf;
    use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

    use crate::config::Config;
    use crate::domain::effective_apex;
    use crate::error_handling::{LineOutcome, ProcessingStats};
    use crate::initialization::init_client;
    use crate::ranking::{RankingFetcher, RankingService, SnapshotStore};

    /// Results of a run.
    #[derive(Debug, Clone)]
    pub struct RunReport {
        /// Lines read from the input, including blank and comment lines
        pub lines_read: usize,
        /// Result lines written
        pub written: usize,
        /// Written lines whose apex was on the ranking list
        pub ranked: usize,
        /// Written lines with rank `-1`
        pub unranked: usize,
        /// Lines dropped because no apex domain could be resolved
        pub apex_failed: usize,
        /// Snapshot the ranks were read from
        pub snapshot_path: PathBuf,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs the tool with the provided configuration, writing one
    /// `<raw> <apex> <rank>` line per input domain to `output`.
    ///
    /// Startup (cache check, optional download, index load) must succeed
    /// before any input is read.
    ///
    /// # Errors
    ///
    /// Returns an error if the ranking list cannot be obtained or loaded, the
    /// input cannot be read, or the output cannot be written. Domains without
    /// an apex are logged and skipped, not treated as errors.
    pub async fn run<W>(config: Config, output: &mut W) -> Result<RunReport>
    where
        W: AsyncWrite + Unpin,
    {
        let start_time = std::time::Instant::now();

        let store = SnapshotStore::new(config.resolved_cache_dir());
        let client = init_client().context("Failed to initialize HTTP client")?;
        let fetcher = RankingFetcher::new(client);

        let service = RankingService::start(&store, &fetcher)
            .await
            .context("Failed to initialize ranking list")?;

        let stats = match &config.input {
            Some(path) => {
                log::info!("Reading domains from {}", path.display());
                let file = tokio::fs::File::open(path)
                    .await
                    .with_context(|| format!("Failed to open input file {}", path.display()))?;
                annotate_lines(&service, BufReader::new(file), output).await?
            }
            None => {
                log::info!("Reading domains from stdin");
                annotate_lines(&service, BufReader::new(tokio::io::stdin()), output).await?
            }
        };

        stats.log_summary();

        Ok(RunReport {
            lines_read: stats.total(),
            written: stats.written(),
            ranked: stats.count(LineOutcome::Ranked),
            unranked: stats.count(LineOutcome::Unranked),
            apex_failed: stats.count(LineOutcome::ApexFailed),
            snapshot_path: service.snapshot_path().to_path_buf(),
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }

    /// Annotates every domain read from `input` and writes the results to
    /// `output`, one line at a time in input order.
    ///
    /// Blank lines and `#` comments are skipped. The raw line is echoed
    /// trimmed of surrounding whitespace.
    pub async fn annotate_lines<R, W>(
        service: &RankingService,
        input: R,
        output: &mut W,
    ) -> Result<ProcessingStats>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut stats = ProcessingStats::new();
        let mut lines = input.lines();

        while let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read input line")?
        {
            let raw = line.trim();
            if raw.is_empty() || raw.starts_with('#') {
                stats.record(LineOutcome::Skipped);
                continue;
            }

            let apex = match effective_apex(raw) {
                Ok(apex) => apex,
                Err(e) => {
                    log::warn!("failed to get apex for {} due to: {}", raw, e);
                    stats.record(LineOutcome::ApexFailed);
                    continue;
                }
            };

            let rank = service.rank(&apex);
            output
                .write_all(format!("{} {} {}\n", raw, apex, rank).as_bytes())
                .await
                .context("Failed to write output")?;

            stats.record(if rank > 0 {
                LineOutcome::Ranked
            } else {
                LineOutcome::Unranked
            });
        }

        output.flush().await.context("Failed to flush output")?;
        Ok(stats)
    }
}
