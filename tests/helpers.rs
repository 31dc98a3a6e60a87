// Shared test helpers for snapshot directories and a mocked ranking service.

use std::path::{Path, PathBuf};

use domain_rank::ranking::FixedClock;
use domain_rank::{RankingFetcher, SnapshotStore};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Fixed "now" used by the tests (2023-11-14T22:13:20Z).
#[allow(dead_code)]
pub const NOW: i64 = 1_700_000_000;

/// One day in seconds.
#[allow(dead_code)]
pub const DAY: i64 = 24 * 60 * 60;

/// List identifier served by the mock list-id endpoint.
#[allow(dead_code)]
pub const LIST_ID: &str = "TEST1";

/// Creates a store rooted at `dir` whose clock is frozen at `NOW`.
#[allow(dead_code)]
pub fn store_at(dir: &Path) -> SnapshotStore {
    SnapshotStore::new(dir).with_clock(FixedClock(NOW))
}

/// Creates a fetcher pointing at the mock server.
#[allow(dead_code)]
pub fn fetcher_for(server: &MockServer) -> RankingFetcher {
    RankingFetcher::with_endpoints(
        reqwest::Client::new(),
        format!("{}/top-1m-id", server.uri()),
        format!("{}/download/{{id}}/full", server.uri()),
    )
}

/// Mounts both endpoints, each expected to be hit `times` times.
#[allow(dead_code)]
pub async fn mount_ranking_list(server: &MockServer, body: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path("/top-1m-id"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LIST_ID))
        .expect(times)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/download/{}/full", LIST_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(times)
        .mount(server)
        .await;
}

/// Writes a snapshot file named `tranco-<timestamp>` into `dir`.
#[allow(dead_code)]
pub fn write_snapshot(dir: &Path, timestamp: i64, content: &str) -> PathBuf {
    let path = dir.join(format!("tranco-{}", timestamp));
    std::fs::write(&path, content).expect("Failed to write snapshot");
    path
}

/// Names of all `tranco-` snapshot files in `dir`, sorted.
#[allow(dead_code)]
pub fn snapshot_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read cache directory")
        .map(|e| e.expect("Failed to read entry").file_name())
        .filter_map(|n| n.into_string().ok())
        .filter(|n| n.starts_with("tranco-"))
        .collect();
    names.sort();
    names
}
