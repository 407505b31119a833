//! Core data models for conferences, papers and query results.

mod conference;
mod paper;
mod search;
mod stats;

pub use conference::{ConferenceRecord, Tier};
pub use paper::{PaperResult, PaperResultBuilder, PaperSource};
pub use search::{
    clamp_limit, PaperSearchRequest, RemoteQuery, SearchOutcome, DEFAULT_LIMIT, MAX_LIMIT,
    MIN_LIMIT,
};
pub use stats::{ConferenceSummary, FieldStatistics, FieldSummary, Lookup, NotFound};
