//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::CACHE_DIR_NAME;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options for the `domain_rank` binary.
#[derive(Debug, Parser)]
#[command(
    name = "domain_rank",
    version,
    about = "Print the apex domain and Tranco rank of every input domain"
)]
pub struct Opt {
    /// File to read domains from (one per line). Reads stdin when omitted.
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Directory holding ranking snapshots (defaults to <temp dir>/domainrank)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use domain_rank::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     input: Some(PathBuf::from("domains.txt")),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// File to read domains from, `None` for stdin
    pub input: Option<PathBuf>,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Snapshot cache directory override
    pub cache_dir: Option<PathBuf>,
}

impl Config {
    /// Returns the snapshot cache directory, falling back to
    /// `<system temp dir>/domainrank`.
    pub fn resolved_cache_dir(&self) -> PathBuf {
        self.cache_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(CACHE_DIR_NAME))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
            cache_dir: None,
        }
    }
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            input: opt.input,
            log_level: opt.log_level,
            log_format: opt.log_format,
            cache_dir: opt.cache_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.input.is_none());
        assert!(config.cache_dir.is_none());
        assert_eq!(
            log::LevelFilter::from(config.log_level),
            log::LevelFilter::Warn
        );
    }

    #[test]
    fn test_resolved_cache_dir_defaults_to_temp_dir() {
        let config = Config::default();
        assert_eq!(
            config.resolved_cache_dir(),
            std::env::temp_dir().join("domainrank")
        );
    }

    #[test]
    fn test_resolved_cache_dir_override() {
        let config = Config {
            cache_dir: Some(PathBuf::from("/var/cache/ranks")),
            ..Default::default()
        };
        assert_eq!(
            config.resolved_cache_dir(),
            PathBuf::from("/var/cache/ranks")
        );
    }

    #[test]
    fn test_opt_parses_input_flag() {
        let opt = Opt::try_parse_from(["domain_rank", "-i", "domains.txt"])
            .expect("Should parse -i flag");
        assert_eq!(opt.input, Some(PathBuf::from("domains.txt")));

        let config = Config::from(opt);
        assert_eq!(config.input, Some(PathBuf::from("domains.txt")));
    }

    #[test]
    fn test_opt_without_input_reads_stdin() {
        let opt = Opt::try_parse_from(["domain_rank"]).expect("Should parse without args");
        assert!(opt.input.is_none());
        match opt.log_format {
            LogFormat::Plain => {}
            LogFormat::Json => panic!("Default log format should be plain"),
        }
    }

    #[test]
    fn test_opt_rejects_unknown_log_format() {
        let result = Opt::try_parse_from(["domain_rank", "--log-format", "xml"]);
        assert!(result.is_err());
    }
}
