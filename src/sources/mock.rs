//! Mock searcher for testing purposes.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::models::{PaperResult, PaperResultBuilder, PaperSource, RemoteQuery};
use crate::sources::{PaperSearch, SourceError};

#[derive(Debug, Clone)]
enum Behavior {
    Respond(Vec<PaperResult>),
    Fail(String),
}

/// A searcher that returns predefined responses and records every query.
#[derive(Debug)]
pub struct MockSearch {
    behavior: Mutex<Behavior>,
    queries: Mutex<Vec<RemoteQuery>>,
}

impl MockSearch {
    /// A mock that answers every query with the given papers.
    pub fn with_papers(papers: Vec<PaperResult>) -> Self {
        Self {
            behavior: Mutex::new(Behavior::Respond(papers)),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// A mock that answers every query with an empty list.
    pub fn empty() -> Self {
        Self::with_papers(Vec::new())
    }

    /// A mock whose every query fails with a network error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            behavior: Mutex::new(Behavior::Fail(message.into())),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Replace the papers returned from now on.
    pub fn set_papers(&self, papers: Vec<PaperResult>) {
        let mut guard = self.behavior.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Behavior::Respond(papers);
    }

    /// Queries received so far, in call order.
    pub fn queries(&self) -> Vec<RemoteQuery> {
        self.queries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of queries received so far.
    pub fn calls(&self) -> usize {
        self.queries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl PaperSearch for MockSearch {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Search"
    }

    async fn try_search(&self, query: &RemoteQuery) -> Result<Vec<PaperResult>, SourceError> {
        self.queries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(query.clone());

        let behavior = self
            .behavior
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        match behavior {
            Behavior::Respond(mut papers) => {
                papers.truncate(query.limit);
                Ok(papers)
            }
            Behavior::Fail(message) => Err(SourceError::Network(message)),
        }
    }
}

/// Helper function to create a remote-looking paper for testing.
pub fn make_paper(title: &str, year: i32) -> PaperResult {
    PaperResultBuilder::new(title, PaperSource::Dblp)
        .authors(["Test Author"])
        .year(year)
        .build()
}
