//! Tool handlers backed by the query engine.
//!
//! Each handler parses its JSON arguments, runs one query and serializes the
//! result. Lookups that miss return the not-found payload as a normal value;
//! only missing required arguments produce a tool error.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::tools::ToolHandler;
use crate::models::{PaperSearchRequest, DEFAULT_LIMIT};
use crate::query::QueryEngine;

/// Required string argument
fn required_str<'a>(args: &'a Value, name: &str) -> Result<&'a str, String> {
    args.get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("Missing '{}' parameter", name))
}

/// Optional string argument; empty strings count as absent
fn optional_str<'a>(args: &'a Value, name: &str) -> Option<&'a str> {
    args.get(name)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}

/// Optional integer argument, accepting numbers or numeric strings
fn optional_int(args: &Value, name: &str) -> Option<i64> {
    let value = args.get(name)?;
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| format!("Failed to serialize result: {}", e))
}

/// Handler for `search_papers`
#[derive(Debug)]
pub struct SearchPapersHandler {
    pub engine: Arc<QueryEngine>,
}

#[async_trait::async_trait]
impl ToolHandler for SearchPapersHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let query = required_str(&args, "query")?;

        let mut request = PaperSearchRequest::new(query)
            .limit(optional_int(&args, "limit").unwrap_or(DEFAULT_LIMIT));

        match args.get("conference_id") {
            Some(Value::String(id)) if !id.is_empty() => request = request.conference_id(id),
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            // Catalog ids are strings, so nothing can match
            Some(other) => {
                tracing::debug!("search_papers with non-string conference_id {}", other);
                return Ok(Value::Array(Vec::new()));
            }
        }
        if let Some(field) = optional_str(&args, "field") {
            request = request.field(field);
        }
        if let Some(tier) = optional_str(&args, "tier") {
            request = request.tier(tier);
        }
        // Year 0 means no year filter
        if let Some(year) = optional_int(&args, "year")
            .filter(|&y| y != 0)
            .and_then(|y| i32::try_from(y).ok())
        {
            request = request.year(year);
        }

        let outcome = self.engine.search_papers(&request).await;
        tracing::debug!(
            "search_papers '{}' returned {} papers (fallback: {})",
            request.query,
            outcome.len(),
            outcome.is_fallback()
        );

        to_json(&outcome.papers())
    }
}

/// Handler for `get_conference_info`
#[derive(Debug)]
pub struct GetConferenceInfoHandler {
    pub engine: Arc<QueryEngine>,
}

#[async_trait::async_trait]
impl ToolHandler for GetConferenceInfoHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let id = required_str(&args, "conference_id")?;
        to_json(&self.engine.get_conference(id))
    }
}

/// Handler for `list_conferences`
#[derive(Debug)]
pub struct ListConferencesHandler {
    pub engine: Arc<QueryEngine>,
}

#[async_trait::async_trait]
impl ToolHandler for ListConferencesHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let field = optional_str(&args, "field");
        let tier = optional_str(&args, "tier");
        to_json(&self.engine.list_conferences(field, tier))
    }
}

/// Handler for `get_conference_by_acronym`
#[derive(Debug)]
pub struct GetConferenceByAcronymHandler {
    pub engine: Arc<QueryEngine>,
}

#[async_trait::async_trait]
impl ToolHandler for GetConferenceByAcronymHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let acronym = required_str(&args, "acronym")?;
        to_json(&self.engine.find_by_acronym(acronym))
    }
}

/// Handler for `get_field_statistics`
#[derive(Debug)]
pub struct FieldStatisticsHandler {
    pub engine: Arc<QueryEngine>,
}

#[async_trait::async_trait]
impl ToolHandler for FieldStatisticsHandler {
    async fn execute(&self, _args: Value) -> Result<Value, String> {
        to_json(&self.engine.field_statistics())
    }
}
