//! # Conference Master
//!
//! A Model Context Protocol (MCP) server for looking up academic conferences
//! and searching their papers.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`catalog`]: Immutable conference catalog loaded from JSON
//! - [`query`]: Filter and lookup operations over the catalog
//! - [`models`]: Core data structures (ConferenceRecord, PaperResult, etc.)
//! - [`sources`]: Remote paper search backends (DBLP) behind a fail-closed trait
//! - [`mcp`]: MCP protocol implementation and server
//! - [`utils`]: HTTP client and terminal rendering
//! - [`config`]: Configuration management

pub mod catalog;
pub mod config;
pub mod mcp;
pub mod models;
pub mod query;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use catalog::{CatalogError, CatalogStore};
pub use models::{ConferenceRecord, PaperResult, Tier};
pub use query::QueryEngine;
pub use sources::{PaperSearch, SourceError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
