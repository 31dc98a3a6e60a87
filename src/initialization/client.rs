//! HTTP client initialization.

use reqwest::ClientBuilder;

use crate::config::DEFAULT_USER_AGENT;
use crate::error_handling::InitializationError;

/// Initializes the HTTP client used to download the ranking list.
///
/// Only the User-Agent is set; timeouts are left at the transport defaults
/// and the request is attempted once.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client() -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .user_agent(DEFAULT_USER_AGENT)
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_client() {
        assert!(init_client().is_ok());
    }
}
