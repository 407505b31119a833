//! Search request and response models.

use serde::{Deserialize, Serialize};

use super::paper::PaperResult;

/// Default number of results for `search_papers`
pub const DEFAULT_LIMIT: i64 = 10;

/// Smallest accepted result limit
pub const MIN_LIMIT: usize = 1;

/// Largest accepted result limit
pub const MAX_LIMIT: usize = 50;

/// Clamp a caller-supplied limit into `[MIN_LIMIT, MAX_LIMIT]`
///
/// Out-of-range values, including negatives, are normalized rather than
/// rejected.
pub fn clamp_limit(limit: i64) -> usize {
    limit.clamp(MIN_LIMIT as i64, MAX_LIMIT as i64) as usize
}

/// Parameters of a paper search over the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperSearchRequest {
    /// Free-text query (title, keywords or author names)
    pub query: String,

    /// Restrict to one conference id (exact match)
    pub conference_id: Option<String>,

    /// Restrict to a research field (case-insensitive)
    pub field: Option<String>,

    /// Restrict to a tier label (case-insensitive)
    pub tier: Option<String>,

    /// Publication year filter
    pub year: Option<i32>,

    /// Requested limit, clamped on use
    pub limit: i64,
}

impl Default for PaperSearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            conference_id: None,
            field: None,
            tier: None,
            year: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PaperSearchRequest {
    /// Create a new search request
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Set conference id filter
    pub fn conference_id(mut self, id: impl Into<String>) -> Self {
        self.conference_id = Some(id.into());
        self
    }

    /// Set field filter
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Set tier filter
    pub fn tier(mut self, tier: impl Into<String>) -> Self {
        self.tier = Some(tier.into());
        self
    }

    /// Set year filter
    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Set requested limit
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// The limit after clamping
    pub fn effective_limit(&self) -> usize {
        clamp_limit(self.limit)
    }
}

/// Query sent to a remote paper searcher for one conference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteQuery {
    pub query: String,
    pub venue_acronym: Option<String>,
    pub year: Option<i32>,
    pub limit: usize,
}

impl RemoteQuery {
    pub fn new(query: impl Into<String>, limit: usize) -> Self {
        Self {
            query: query.into(),
            venue_acronym: None,
            year: None,
            limit,
        }
    }

    pub fn venue(mut self, acronym: impl Into<String>) -> Self {
        self.venue_acronym = Some(acronym.into());
        self
    }

    pub fn year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }
}

/// Result of `search_papers`
///
/// Either real hits from the remote source, or locally synthesized
/// placeholders when the remote source is disabled or returned nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Remote(Vec<PaperResult>),
    Fallback(Vec<PaperResult>),
}

impl SearchOutcome {
    /// Whether this is the degraded placeholder branch
    pub fn is_fallback(&self) -> bool {
        matches!(self, SearchOutcome::Fallback(_))
    }

    /// Borrow the papers regardless of branch
    pub fn papers(&self) -> &[PaperResult] {
        match self {
            SearchOutcome::Remote(papers) | SearchOutcome::Fallback(papers) => papers,
        }
    }

    /// Take the papers regardless of branch
    pub fn into_papers(self) -> Vec<PaperResult> {
        match self {
            SearchOutcome::Remote(papers) | SearchOutcome::Fallback(papers) => papers,
        }
    }

    pub fn len(&self) -> usize {
        self.papers().len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(-5), 1);
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(1), 1);
        assert_eq!(clamp_limit(10), 10);
        assert_eq!(clamp_limit(50), 50);
        assert_eq!(clamp_limit(500), 50);
    }

    #[test]
    fn test_search_request_builder() {
        let request = PaperSearchRequest::new("fuzzing")
            .conference_id("ccs")
            .field("CyberSecurity")
            .tier("top-tier")
            .year(2023)
            .limit(100);

        assert_eq!(request.query, "fuzzing");
        assert_eq!(request.conference_id.as_deref(), Some("ccs"));
        assert_eq!(request.year, Some(2023));
        assert_eq!(request.limit, 100);
        assert_eq!(request.effective_limit(), 50);
        assert_eq!(PaperSearchRequest::new("x").effective_limit(), 10);
    }

    #[test]
    fn test_outcome_accessors() {
        let outcome = SearchOutcome::Fallback(Vec::new());
        assert!(outcome.is_fallback());
        assert!(outcome.is_empty());

        let outcome = SearchOutcome::Remote(vec![PaperResult::new(
            "t",
            crate::models::PaperSource::Dblp,
        )]);
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.len(), 1);
    }
}
