//! HTTP client utilities.

use reqwest::{Client, RequestBuilder};
use std::sync::Arc;
use std::time::Duration;

/// Default request timeout for remote searches
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared HTTP client with sensible defaults
///
/// Cloning is cheap and every clone reuses the same connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a new HTTP client with a custom overall request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_user_agent(
            concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),
            timeout,
        )
    }

    /// Create a new HTTP client with a custom user agent
    pub fn with_user_agent(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Start a GET request
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_pool() {
        let client = HttpClient::new().unwrap();
        let clone = client.clone();
        assert!(Arc::ptr_eq(&client.client, &clone.client));
    }
}
