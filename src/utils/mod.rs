//! Utility modules supporting the query engine and CLI.
//!
//! - [`HttpClient`]: shared HTTP client used by remote search backends
//! - [`conference_table`], [`paper_table`], [`statistics_table`]: terminal tables
//! - [`truncate_with_ellipsis`]: width-limited text for table cells

mod display;
mod http;

pub use display::{
    conference_detail_table, conference_table, is_terminal, paper_table, statistics_table,
    truncate_with_ellipsis,
};
pub use http::{HttpClient, DEFAULT_TIMEOUT};
