//! Query engine over the conference catalog.
//!
//! Every operation is a read of the shared [`CatalogStore`]; the only side
//! effect is the optional remote call made by [`QueryEngine::search_papers`].
//! Misses are reported as structured [`NotFound`] payloads rather than errors,
//! and remote failures degrade to locally synthesized placeholder results.

use std::sync::Arc;

use crate::catalog::CatalogStore;
use crate::models::{
    ConferenceRecord, FieldStatistics, Lookup, NotFound, PaperResult, PaperResultBuilder,
    PaperSearchRequest, PaperSource, RemoteQuery, SearchOutcome,
};
use crate::sources::PaperSearch;

/// Maximum number of conferences consulted (remote) or synthesized (fallback) per search
pub const CONFERENCE_CAP: usize = 5;

/// Year used by placeholder results when the request has no year filter
pub const FALLBACK_YEAR: i32 = 2024;

/// Note attached to every placeholder result
pub const SIMULATED_NOTE: &str = "Simulated result. Enable remote search \
    (remote_search.enabled = true or --remote-search) to query DBLP for real papers.";

/// Title prefix of placeholder results
const SIMULATED_TITLE_PREFIX: &str = "[Example] Paper related to: ";

/// Treat empty strings the same as an absent argument
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Filter and lookup operations over an immutable catalog
#[derive(Debug, Clone)]
pub struct QueryEngine {
    catalog: Arc<CatalogStore>,
    searcher: Option<Arc<dyn PaperSearch>>,
}

impl QueryEngine {
    /// Create an engine without remote search
    pub fn new(catalog: Arc<CatalogStore>) -> Self {
        Self {
            catalog,
            searcher: None,
        }
    }

    /// Consult a remote searcher before falling back to placeholders
    pub fn with_searcher(mut self, searcher: Arc<dyn PaperSearch>) -> Self {
        self.searcher = Some(searcher);
        self
    }

    /// Optionally attach a remote searcher
    pub fn with_optional_searcher(mut self, searcher: Option<Arc<dyn PaperSearch>>) -> Self {
        self.searcher = searcher;
        self
    }

    /// The catalog this engine reads from
    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// Shared handle to the catalog
    pub fn shared_catalog(&self) -> Arc<CatalogStore> {
        self.catalog.clone()
    }

    /// Whether a remote searcher is attached
    pub fn remote_enabled(&self) -> bool {
        self.searcher.is_some()
    }

    /// Search for papers from the conferences matching the request filters
    ///
    /// An unknown `conference_id` yields an empty result. Otherwise the
    /// remote searcher (if any) is asked about the first matched conferences;
    /// when it returns nothing, one placeholder per matched conference is
    /// produced instead. The result never exceeds the clamped limit.
    pub async fn search_papers(&self, request: &PaperSearchRequest) -> SearchOutcome {
        let limit = request.effective_limit();

        let Some(conferences) = self.matching_conferences(request) else {
            tracing::debug!(
                "Unknown conference id '{}', returning no papers",
                request.conference_id.as_deref().unwrap_or_default()
            );
            return SearchOutcome::Fallback(Vec::new());
        };

        let cap = CONFERENCE_CAP.min(limit);

        if let Some(searcher) = &self.searcher {
            let consulted = &conferences[..cap.min(conferences.len())];
            let papers = self
                .query_remote(searcher.as_ref(), request, consulted, limit)
                .await;
            if !papers.is_empty() {
                return SearchOutcome::Remote(papers);
            }
            tracing::debug!(
                "{} returned no papers for '{}', using placeholders",
                searcher.name(),
                request.query
            );
        }

        let papers = conferences
            .iter()
            .take(cap)
            .map(|conference| simulated_paper(&request.query, conference, request.year))
            .collect();

        SearchOutcome::Fallback(papers)
    }

    async fn query_remote(
        &self,
        searcher: &dyn PaperSearch,
        request: &PaperSearchRequest,
        conferences: &[&ConferenceRecord],
        limit: usize,
    ) -> Vec<PaperResult> {
        let mut papers = Vec::new();

        for conference in conferences {
            let query = RemoteQuery::new(request.query.clone(), limit)
                .venue(conference.acronym.clone())
                .year(request.year);

            let hits = searcher.search_remote(&query).await;
            papers.extend(hits.into_iter().map(|p| p.with_conference(conference)));

            if papers.len() >= limit {
                break;
            }
        }

        papers.truncate(limit);
        papers
    }

    /// Conferences selected by the request filters, or `None` for an unknown id
    fn matching_conferences(&self, request: &PaperSearchRequest) -> Option<Vec<&ConferenceRecord>> {
        let field = non_empty(request.field.as_deref());
        let tier = non_empty(request.tier.as_deref());

        let candidates: Vec<&ConferenceRecord> =
            match non_empty(request.conference_id.as_deref()) {
                Some(id) => vec![self.catalog.get(id)?],
                None => self.catalog.all().collect(),
            };

        Some(
            candidates
                .into_iter()
                .filter(|c| c.matches(field, tier))
                .collect(),
        )
    }

    /// Exact lookup by conference id
    pub fn get_conference(&self, id: &str) -> Lookup<'_> {
        match self.catalog.get(id) {
            Some(record) => Lookup::Found(record),
            None => Lookup::NotFound(NotFound::conference(
                id,
                self.catalog.ids().map(str::to_string).collect(),
            )),
        }
    }

    /// Conferences matching the optional field and tier filters, in catalog order
    pub fn list_conferences(
        &self,
        field: Option<&str>,
        tier: Option<&str>,
    ) -> Vec<&ConferenceRecord> {
        let field = non_empty(field);
        let tier = non_empty(tier);

        self.catalog
            .all()
            .filter(|c| c.matches(field, tier))
            .collect()
    }

    /// Case-insensitive acronym lookup; the first match in catalog order wins
    pub fn find_by_acronym(&self, acronym: &str) -> Lookup<'_> {
        match self.catalog.all().find(|c| c.has_acronym(acronym)) {
            Some(record) => Lookup::Found(record),
            None => Lookup::NotFound(NotFound::acronym(
                acronym,
                self.catalog.acronyms().map(str::to_string).collect(),
            )),
        }
    }

    /// Per-field counts and member conferences
    pub fn field_statistics(&self) -> FieldStatistics {
        FieldStatistics::from_records(self.catalog.all())
    }
}

/// Placeholder paper describing what would have been searched
fn simulated_paper(query: &str, conference: &ConferenceRecord, year: Option<i32>) -> PaperResult {
    PaperResultBuilder::new(
        format!("{}{}", SIMULATED_TITLE_PREFIX, query),
        PaperSource::Simulated,
    )
    .authors(["Author One", "Author Two"])
    .year(year.unwrap_or(FALLBACK_YEAR))
    .conference(conference)
    .note(SIMULATED_NOTE)
    .build()
}
