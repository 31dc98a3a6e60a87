//! Error type definitions.
//!
//! This module defines the error types used throughout the application and the
//! per-line outcome kinds counted during a run.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::{Display, EnumIter as EnumIterMacro};
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// The two requests of the ranking download protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FetchStep {
    /// Resolving the identifier of the current list
    #[strum(serialize = "list id")]
    ListId,
    /// Downloading the full list body
    #[strum(serialize = "list download")]
    Download,
}

/// Errors raised while acquiring, caching or loading a ranking snapshot.
///
/// Every variant is fatal to startup: the caller is expected to abort rather
/// than run with a partial ranking.
#[derive(Error, Debug)]
pub enum RankError {
    /// A filesystem operation on the cache directory or a snapshot failed.
    #[error("{context} ({}): {source}", .path.display())]
    Io {
        /// What was being attempted
        context: &'static str,
        /// File or directory involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A cache file carries the snapshot prefix but no integer timestamp.
    #[error("invalid snapshot file name '{0}': expected <prefix><unix epoch>")]
    InvalidSnapshotName(String),

    /// A snapshot line does not have exactly two comma-separated fields.
    #[error("unable to parse ranking row {line_number}: '{line}'")]
    MalformedRow {
        /// 1-based line number
        line_number: usize,
        /// The offending line as read
        line: String,
    },

    /// A snapshot line has a rank that is not a positive integer.
    #[error("invalid rank '{value}' on ranking row {line_number}")]
    InvalidRank {
        /// 1-based line number
        line_number: usize,
        /// The rank field as read
        value: String,
    },

    /// The HTTP request could not be sent or its body could not be read.
    #[error("ranking request failed: {0}")]
    Http(#[from] ReqwestError),

    /// The ranking service answered with something other than 200 OK.
    #[error("failed getting {step}, unexpected status code {status}")]
    UnexpectedStatus {
        /// Request that failed
        step: FetchStep,
        /// HTTP status code received
        status: u16,
    },

    /// The list identifier endpoint answered 200 with an empty body.
    #[error("ranking service returned an empty list id")]
    EmptyListId,
}

impl RankError {
    /// Builds an [`RankError::Io`] for `path`.
    pub(crate) fn io(
        context: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        RankError::Io {
            context,
            path: path.into(),
            source,
        }
    }
}

/// Reasons a domain has no apex domain.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ApexError {
    /// Blank input.
    #[error("empty domain")]
    Empty,

    /// IP addresses have no registrable domain.
    #[error("IP addresses do not have registrable domains: {0}")]
    IpAddress(String),

    /// The input is a public suffix itself or has no recognizable suffix.
    #[error("no registrable domain found for {0}")]
    NoRegistrableDomain(String),
}

/// Outcome of a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum LineOutcome {
    /// Apex resolved and found on the ranking list
    Ranked,
    /// Apex resolved but absent from the ranking list
    Unranked,
    /// Apex could not be resolved; nothing was written
    ApexFailed,
    /// Blank or comment line
    Skipped,
}

impl LineOutcome {
    /// Label used in the summary log.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineOutcome::Ranked => "Ranked",
            LineOutcome::Unranked => "Not ranked",
            LineOutcome::ApexFailed => "Apex resolution failed",
            LineOutcome::Skipped => "Blank or comment",
        }
    }
}

impl std::fmt::Display for LineOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
