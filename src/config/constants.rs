//! Configuration constants.
//!
//! This module defines the defaults for the ranking cache, the Tranco endpoints
//! and the HTTP client used to reach them.

use std::time::Duration;

/// Name of the cache directory created under the system temp directory.
pub const CACHE_DIR_NAME: &str = "domainrank";

/// Filename prefix of every ranking snapshot; the rest of the name is the
/// Unix epoch (seconds) at which the snapshot was written.
pub const SNAPSHOT_FILE_PREFIX: &str = "tranco-";

/// Maximum snapshot age before a refresh is mandatory: 7 days.
/// Tranco publishes a new list daily, a weekly refresh keeps runs cheap.
pub const SNAPSHOT_MAX_AGE: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Endpoint returning the identifier of the current top-1M list.
pub const TRANCO_LIST_ID_URL: &str = "https://tranco-list.eu/top-1m-id";

/// Endpoint template for the full list download. `{id}` is replaced by the
/// identifier returned from [`TRANCO_LIST_ID_URL`].
pub const TRANCO_DOWNLOAD_URL_TEMPLATE: &str = "https://tranco-list.eu/download/{id}/full";

/// Placeholder substituted in [`TRANCO_DOWNLOAD_URL_TEMPLATE`].
pub const LIST_ID_PLACEHOLDER: &str = "{id}";

/// User-Agent sent to the ranking service.
pub const DEFAULT_USER_AGENT: &str = concat!("domain_rank/", env!("CARGO_PKG_VERSION"));

/// Rank reported for domains that are not on the loaded list.
pub const RANK_NOT_FOUND: i64 = -1;
