//! Ranking list download.
//!
//! Tranco exposes the current list in two steps: an endpoint that returns the
//! identifier of today's list, and a download endpoint keyed by that
//! identifier. Both must answer 200; anything else aborts the refresh.

use crate::config::{LIST_ID_PLACEHOLDER, TRANCO_DOWNLOAD_URL_TEMPLATE, TRANCO_LIST_ID_URL};
use crate::error_handling::{FetchStep, RankError};

/// Retrieves the full ranking list from the remote service.
///
/// Endpoints default to the public Tranco service and can be pointed
/// elsewhere with [`RankingFetcher::with_endpoints`].
#[derive(Debug, Clone)]
pub struct RankingFetcher {
    client: reqwest::Client,
    list_id_url: String,
    download_url_template: String,
}

impl RankingFetcher {
    /// Creates a fetcher against the public Tranco endpoints.
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_endpoints(client, TRANCO_LIST_ID_URL, TRANCO_DOWNLOAD_URL_TEMPLATE)
    }

    /// Creates a fetcher against custom endpoints.
    ///
    /// `download_url_template` must contain `{id}`, which is replaced by the
    /// identifier returned from `list_id_url`.
    pub fn with_endpoints(
        client: reqwest::Client,
        list_id_url: impl Into<String>,
        download_url_template: impl Into<String>,
    ) -> Self {
        Self {
            client,
            list_id_url: list_id_url.into(),
            download_url_template: download_url_template.into(),
        }
    }

    /// Downloads the current list and returns its raw body.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::UnexpectedStatus`] if either request does not
    /// answer 200, [`RankError::EmptyListId`] if the identifier is blank, and
    /// [`RankError::Http`] on transport failures.
    pub async fn fetch(&self) -> Result<Vec<u8>, RankError> {
        let list_id = self.fetch_list_id().await?;
        let url = self.download_url(&list_id);

        log::info!("Downloading ranking list {}", list_id);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(RankError::UnexpectedStatus {
                step: FetchStep::Download,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        log::debug!("Downloaded {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }

    async fn fetch_list_id(&self) -> Result<String, RankError> {
        log::debug!("Fetching ranking list id from {}", self.list_id_url);
        let response = self.client.get(&self.list_id_url).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(RankError::UnexpectedStatus {
                step: FetchStep::ListId,
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        let list_id = text.trim();
        if list_id.is_empty() {
            return Err(RankError::EmptyListId);
        }
        Ok(list_id.to_string())
    }

    fn download_url(&self, list_id: &str) -> String {
        self.download_url_template.replace(LIST_ID_PLACEHOLDER, list_id)
    }
}
