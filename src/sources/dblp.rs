//! DBLP publication search.
//!
//! Uses the JSON flavour of the DBLP search API. Venue and year restrictions
//! are appended to the free-text query as `venue:` and `year:` terms.

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{PaperResult, PaperResultBuilder, PaperSource, RemoteQuery};
use crate::sources::{PaperSearch, SourceError};
use crate::utils::HttpClient;

/// Public DBLP publication search endpoint
pub const DBLP_SEARCH_URL: &str = "https://dblp.org/search/publ/api";

/// DBLP search backend
#[derive(Debug, Clone)]
pub struct DblpSearch {
    client: HttpClient,
    endpoint: String,
}

impl DblpSearch {
    /// Search the public DBLP endpoint
    pub fn new(client: HttpClient) -> Self {
        Self::with_endpoint(client, DBLP_SEARCH_URL)
    }

    /// Search a custom endpoint speaking the DBLP API
    pub fn with_endpoint(client: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// The endpoint requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Build the DBLP `q` parameter from a remote query
fn build_query_string(query: &RemoteQuery) -> String {
    let mut q = query.query.clone();
    if let Some(venue) = &query.venue_acronym {
        q = format!("{} venue:{}", q, venue);
    }
    if let Some(year) = query.year {
        q = format!("{} year:{}", q, year);
    }
    q
}

#[async_trait]
impl PaperSearch for DblpSearch {
    fn id(&self) -> &str {
        "dblp"
    }

    fn name(&self) -> &str {
        "DBLP"
    }

    async fn try_search(&self, query: &RemoteQuery) -> Result<Vec<PaperResult>, SourceError> {
        let q = build_query_string(query);
        let hits = query.limit.to_string();
        tracing::debug!("Searching DBLP for '{}'", q);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", q.as_str()),
                ("h", hits.as_str()),
                ("format", "json"),
            ])
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Api(format!(
                "DBLP API returned status: {}",
                status
            )));
        }

        let body = response.text().await?;
        let mut papers = parse_response(&body)?;
        papers.truncate(query.limit);

        tracing::debug!("DBLP returned {} papers", papers.len());
        Ok(papers)
    }
}

// ========== Response Model ==========

#[derive(Debug, Deserialize)]
struct DblpResponse {
    result: DblpResult,
}

#[derive(Debug, Deserialize)]
struct DblpResult {
    hits: DblpHits,
}

#[derive(Debug, Deserialize)]
struct DblpHits {
    #[serde(default)]
    hit: Vec<DblpHit>,
}

#[derive(Debug, Deserialize)]
struct DblpHit {
    info: DblpInfo,
}

#[derive(Debug, Deserialize)]
struct DblpInfo {
    title: Option<String>,
    authors: Option<DblpAuthors>,
    venue: Option<OneOrMany<String>>,
    year: Option<String>,
    doi: Option<String>,
    ee: Option<OneOrMany<String>>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DblpAuthors {
    author: OneOrMany<DblpAuthor>,
}

/// DBLP renders an author either as a bare string or as `{"@pid": .., "text": ..}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DblpAuthor {
    Name(String),
    Entry { text: String },
}

impl DblpAuthor {
    fn into_name(self) -> String {
        match self {
            DblpAuthor::Name(name) | DblpAuthor::Entry { text: name } => name,
        }
    }
}

/// Single values are not wrapped in an array by DBLP
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }

    fn into_first(self) -> Option<T> {
        self.into_vec().into_iter().next()
    }
}

/// Parse a DBLP JSON search response
fn parse_response(body: &str) -> Result<Vec<PaperResult>, SourceError> {
    let response: DblpResponse = serde_json::from_str(body)?;

    let papers = response
        .result
        .hits
        .hit
        .into_iter()
        .map(|hit| info_to_paper(hit.info))
        .collect();

    Ok(papers)
}

fn info_to_paper(info: DblpInfo) -> PaperResult {
    let title = info.title.unwrap_or_else(|| "Unknown".to_string());

    let authors = info
        .authors
        .map(|a| {
            a.author
                .into_vec()
                .into_iter()
                .map(DblpAuthor::into_name)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let mut builder = PaperResultBuilder::new(title, PaperSource::Dblp).authors(authors);

    if let Some(year) = info.year.and_then(|y| y.trim().parse::<i32>().ok()) {
        builder = builder.year(year);
    }
    if let Some(venue) = info.venue.and_then(OneOrMany::into_first) {
        builder = builder.venue(venue);
    }
    if let Some(doi) = info.doi {
        builder = builder.doi(doi);
    }
    if let Some(ee) = info.ee.and_then(OneOrMany::into_first) {
        builder = builder.ee(ee);
    }
    if let Some(url) = info.url {
        builder = builder.url(url);
    }

    builder.build()
}
