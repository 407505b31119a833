//! Tool registry for MCP tools.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::models::{DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};
use crate::query::QueryEngine;

use super::handlers::{
    FieldStatisticsHandler, GetConferenceByAcronymHandler, GetConferenceInfoHandler,
    ListConferencesHandler, SearchPapersHandler,
};

/// An MCP tool that can be called by the client
#[derive(Clone)]
pub struct Tool {
    /// Tool name (e.g., "search_papers")
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema for input parameters
    pub input_schema: serde_json::Value,

    /// Handler function to execute the tool
    pub handler: Arc<dyn ToolHandler>,
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .finish()
    }
}

/// Handler for executing a tool
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync + std::fmt::Debug {
    /// Execute the tool with the given arguments
    async fn execute(&self, args: Value) -> Result<Value, String>;
}

/// Registry for all MCP tools
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Tool>,
}

impl ToolRegistry {
    /// Create a registry holding the five catalog tools
    pub fn new(engine: Arc<QueryEngine>) -> Self {
        let mut registry = Self {
            tools: HashMap::new(),
        };
        registry.register_catalog_tools(&engine);
        registry
    }

    fn register_catalog_tools(&mut self, engine: &Arc<QueryEngine>) {
        let conference_count = engine.catalog().len();

        // 1. search_papers
        self.register(Tool {
            name: "search_papers".to_string(),
            description: format!(
                "Search for papers from {} academic conferences, optionally filtered by conference, field, tier and year. \
                 Results marked \"simulated\": true are placeholders, not real publications.",
                conference_count
            ),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query (paper title, keywords, or author names)"
                    },
                    "conference_id": {
                        "type": "string",
                        "description": "Specific conference ID to search (e.g., 'ccs', 'neurips')"
                    },
                    "field": {
                        "type": "string",
                        "description": "Filter by research field (e.g., 'CyberSecurity', 'AI', 'Systems', 'Networking')"
                    },
                    "tier": {
                        "type": "string",
                        "description": "Filter by conference tier ('Top-tier' or 'Second-tier')"
                    },
                    "year": {
                        "type": "integer",
                        "description": "Filter by publication year"
                    },
                    "limit": {
                        "type": "integer",
                        "description": format!(
                            "Maximum number of results to return (default: {}, max: {})",
                            DEFAULT_LIMIT, MAX_LIMIT
                        ),
                        "default": DEFAULT_LIMIT,
                        "minimum": MIN_LIMIT,
                        "maximum": MAX_LIMIT
                    }
                },
                "required": ["query"]
            }),
            handler: Arc::new(SearchPapersHandler {
                engine: engine.clone(),
            }),
        });

        // 2. get_conference_info
        self.register(Tool {
            name: "get_conference_info".to_string(),
            description: "Get detailed information about a specific conference by its ID, including name, field, tier and publisher.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "conference_id": {
                        "type": "string",
                        "description": "Conference identifier (e.g., 'ccs', 'neurips', 'icml')"
                    }
                },
                "required": ["conference_id"]
            }),
            handler: Arc::new(GetConferenceInfoHandler {
                engine: engine.clone(),
            }),
        });

        // 3. list_conferences
        self.register(Tool {
            name: "list_conferences".to_string(),
            description: "List all available conferences, optionally filtered by field or tier.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "field": {
                        "type": "string",
                        "description": "Filter by research field (e.g., 'CyberSecurity', 'AI', 'Systems', 'Networking')"
                    },
                    "tier": {
                        "type": "string",
                        "description": "Filter by conference tier ('Top-tier' or 'Second-tier')"
                    }
                }
            }),
            handler: Arc::new(ListConferencesHandler {
                engine: engine.clone(),
            }),
        });

        // 4. get_conference_by_acronym
        self.register(Tool {
            name: "get_conference_by_acronym".to_string(),
            description: "Find a conference by its acronym (e.g., 'CCS', 'NeurIPS', 'ICML'). Matching is case-insensitive.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "acronym": {
                        "type": "string",
                        "description": "Conference acronym (case-insensitive)"
                    }
                },
                "required": ["acronym"]
            }),
            handler: Arc::new(GetConferenceByAcronymHandler {
                engine: engine.clone(),
            }),
        });

        // 5. get_field_statistics
        self.register(Tool {
            name: "get_field_statistics".to_string(),
            description: "Get statistics about conferences grouped by research field, with counts per tier.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
            handler: Arc::new(FieldStatisticsHandler {
                engine: engine.clone(),
            }),
        });
    }

    /// Register a tool
    pub fn register(&mut self, tool: Tool) {
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Get all tools
    pub fn all(&self) -> Vec<&Tool> {
        self.tools.values().collect()
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, args: Value) -> Result<Value, String> {
        let tool = self
            .get(name)
            .ok_or_else(|| format!("Tool '{}' not found", name))?;

        tool.handler.execute(args).await
    }
}
