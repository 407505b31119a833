//! Remote paper search adapters.
//!
//! The query engine only talks to the [`PaperSearch`] trait. Implementations
//! report failures through [`PaperSearch::try_search`], while the engine calls
//! the provided [`PaperSearch::search_remote`], which never fails: any error
//! is logged and turned into an empty list. The engine then only has to
//! distinguish empty from non-empty results.
//!
//! Remote search is disabled unless `remote_search.enabled` is set in the
//! configuration (or `--remote-search` is passed on the command line).

mod dblp;
pub mod mock;

pub use dblp::{DblpSearch, DBLP_SEARCH_URL};
pub use mock::MockSearch;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::RemoteSearchConfig;
use crate::models::{PaperResult, RemoteQuery};
use crate::utils::HttpClient;

/// Interface for remote academic search backends
#[async_trait]
pub trait PaperSearch: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this backend (e.g. "dblp")
    fn id(&self) -> &str;

    /// Human-readable name of this backend
    fn name(&self) -> &str;

    /// Run the search, reporting failures
    async fn try_search(&self, query: &RemoteQuery) -> Result<Vec<PaperResult>, SourceError>;

    /// Run the search, returning an empty list on any failure
    async fn search_remote(&self, query: &RemoteQuery) -> Vec<PaperResult> {
        match self.try_search(query).await {
            Ok(papers) => papers,
            Err(e) => {
                tracing::warn!("Search failed for {}: {}", self.id(), e);
                Vec::new()
            }
        }
    }
}

/// Errors that can occur when calling a remote search backend
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// The request did not complete in time
    #[error("Request timed out")]
    Timeout,

    /// The backend answered with a non-success status
    #[error("API error: {0}")]
    Api(String),

    /// The response body could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout
        } else if let Some(status) = err.status() {
            SourceError::Api(format!("status {}", status))
        } else {
            SourceError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}

/// Build the configured remote searcher, if remote search is enabled
pub fn from_config(
    config: &RemoteSearchConfig,
) -> Result<Option<Arc<dyn PaperSearch>>, SourceError> {
    if !config.enabled {
        tracing::debug!("Remote paper search disabled");
        return Ok(None);
    }

    let client = HttpClient::with_timeout(Duration::from_secs(config.timeout_seconds))?;
    let dblp = DblpSearch::with_endpoint(client, &config.endpoint);
    tracing::info!(
        "Remote paper search enabled via {} ({})",
        dblp.name(),
        config.endpoint
    );

    Ok(Some(Arc::new(dblp)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_search_remote_fails_closed() {
        let mock = MockSearch::failing("connection refused");
        let papers = mock.search_remote(&RemoteQuery::new("anything", 5)).await;
        assert!(papers.is_empty());
        assert_eq!(mock.calls(), 1);
    }

    #[test]
    fn test_disabled_config_builds_nothing() {
        let config = RemoteSearchConfig::default();
        assert!(!config.enabled);
        assert!(from_config(&config).unwrap().is_none());
    }

    #[test]
    fn test_enabled_config_builds_dblp() {
        let config = RemoteSearchConfig {
            enabled: true,
            ..Default::default()
        };
        let searcher = from_config(&config).unwrap().unwrap();
        assert_eq!(searcher.id(), "dblp");
    }
}
