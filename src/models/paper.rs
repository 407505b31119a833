//! Paper search result model.

use serde::{Deserialize, Serialize};

use super::conference::{ConferenceRecord, Tier};

/// Where a paper result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSource {
    /// Returned by the DBLP publication search API
    Dblp,
    /// Synthesized locally because no remote result was available
    Simulated,
}

impl PaperSource {
    /// Returns the display name of the source
    pub fn name(&self) -> &str {
        match self {
            PaperSource::Dblp => "DBLP",
            PaperSource::Simulated => "Simulated",
        }
    }
}

impl std::fmt::Display for PaperSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A paper returned by `search_papers`
///
/// Built per request and discarded after serialization. Remote hits start out
/// with only bibliographic data and are enriched with the matched
/// conference's metadata by the query engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperResult {
    /// Paper title
    pub title: String,

    /// Authors in publication order
    pub authors: Vec<String>,

    /// Conference display name
    pub conference: String,

    /// Conference acronym
    pub conference_acronym: String,

    /// Publication year
    pub year: Option<i32>,

    /// Research field of the conference
    pub field: String,

    /// Tier of the conference
    pub tier: Option<Tier>,

    /// DBLP venue page of the conference
    pub dblp_url: Option<String>,

    /// Venue string as reported by the remote source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,

    /// Digital Object Identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,

    /// Electronic edition URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ee: Option<String>,

    /// Record detail URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Provenance tag
    pub source: PaperSource,

    /// True when this is a placeholder and not a real publication
    pub simulated: bool,

    /// Human-readable explanation attached to placeholder results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl PaperResult {
    /// Create a bare result with a title and provenance
    pub fn new(title: impl Into<String>, source: PaperSource) -> Self {
        Self {
            title: title.into(),
            authors: Vec::new(),
            conference: String::new(),
            conference_acronym: String::new(),
            year: None,
            field: String::new(),
            tier: None,
            dblp_url: None,
            venue: None,
            doi: None,
            ee: None,
            url: None,
            simulated: source == PaperSource::Simulated,
            source,
            note: None,
        }
    }

    /// Fill in the conference metadata from a catalog record
    pub fn with_conference(mut self, conference: &ConferenceRecord) -> Self {
        self.conference = conference.name.clone();
        self.conference_acronym = conference.acronym.clone();
        self.field = conference.field.clone();
        self.tier = Some(conference.tier);
        self.dblp_url = Some(conference.dblp_url.clone());
        self
    }

    /// Returns the authors joined for display
    pub fn author_line(&self) -> String {
        self.authors.join(", ")
    }
}

/// Builder for constructing PaperResult objects
#[derive(Debug, Clone)]
pub struct PaperResultBuilder {
    paper: PaperResult,
}

impl PaperResultBuilder {
    /// Create a new builder with required fields
    pub fn new(title: impl Into<String>, source: PaperSource) -> Self {
        Self {
            paper: PaperResult::new(title, source),
        }
    }

    /// Set authors
    pub fn authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paper.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Set year
    pub fn year(mut self, year: i32) -> Self {
        self.paper.year = Some(year);
        self
    }

    /// Set venue
    pub fn venue(mut self, venue: impl Into<String>) -> Self {
        self.paper.venue = Some(venue.into());
        self
    }

    /// Set DOI
    pub fn doi(mut self, doi: impl Into<String>) -> Self {
        self.paper.doi = Some(doi.into());
        self
    }

    /// Set electronic edition URL
    pub fn ee(mut self, ee: impl Into<String>) -> Self {
        self.paper.ee = Some(ee.into());
        self
    }

    /// Set record URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.paper.url = Some(url.into());
        self
    }

    /// Set note
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.paper.note = Some(note.into());
        self
    }

    /// Set conference metadata
    pub fn conference(mut self, conference: &ConferenceRecord) -> Self {
        self.paper = self.paper.with_conference(conference);
        self
    }

    /// Build the PaperResult
    pub fn build(self) -> PaperResult {
        self.paper
    }
}
