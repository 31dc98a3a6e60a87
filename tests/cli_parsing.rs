//! Tests for command-line parsing.

use clap::Parser;
use domain_rank::config::{LogFormat, Opt};
use domain_rank::Config;
use std::path::PathBuf;

#[test]
fn test_cli_defaults() {
    let opt = Opt::try_parse_from(["domain_rank"]).expect("Should parse with no arguments");
    assert!(opt.input.is_none());
    assert!(opt.cache_dir.is_none());
    assert_eq!(
        log::LevelFilter::from(opt.log_level.clone()),
        log::LevelFilter::Warn
    );
}

#[test]
fn test_cli_long_input_flag() {
    let opt = Opt::try_parse_from(["domain_rank", "--input", "domains.txt"])
        .expect("Should parse --input");
    assert_eq!(opt.input, Some(PathBuf::from("domains.txt")));
}

#[test]
fn test_cli_all_options() {
    let opt = Opt::try_parse_from([
        "domain_rank",
        "-i",
        "in.txt",
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "--cache-dir",
        "/tmp/ranks",
    ])
    .expect("Should parse all options");

    let config = Config::from(opt);
    assert_eq!(config.input, Some(PathBuf::from("in.txt")));
    assert_eq!(
        log::LevelFilter::from(config.log_level.clone()),
        log::LevelFilter::Debug
    );
    match config.log_format {
        LogFormat::Json => {}
        LogFormat::Plain => panic!("Expected JSON log format"),
    }
    assert_eq!(config.resolved_cache_dir(), PathBuf::from("/tmp/ranks"));
}

#[test]
fn test_cli_rejects_unknown_flag() {
    assert!(Opt::try_parse_from(["domain_rank", "--max-concurrency", "5"]).is_err());
}

#[test]
fn test_cli_rejects_invalid_log_level() {
    assert!(Opt::try_parse_from(["domain_rank", "--log-level", "verbose"]).is_err());
}
