//! MCP server implementation using pmcp.
//!
//! Serves the catalog tools and `conference://` resources over stdio or
//! streamable HTTP.

use crate::mcp::resources::ConferenceResources;
use crate::mcp::tools::ToolRegistry;
use crate::query::QueryEngine;
use async_trait::async_trait;
use pmcp::{
    server::streamable_http_server::StreamableHttpServer, Error, RequestHandlerExtra, Server,
    ServerCapabilities, ToolHandler, ToolInfo,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Server name announced to MCP clients
pub const SERVER_NAME: &str = "conference-master";

/// The MCP server for Conference Master
#[derive(Debug, Clone)]
pub struct McpServer {
    server: Arc<Mutex<Server>>,
}

impl McpServer {
    /// Create a new MCP server answering from the given engine
    pub fn new(engine: Arc<QueryEngine>) -> Result<Self, pmcp::Error> {
        let tools = ToolRegistry::new(engine.clone());
        let resources = ConferenceResources::new(engine.shared_catalog());
        let server = Self::build_server_impl(tools, resources)?;
        Ok(Self {
            server: Arc::new(Mutex::new(server)),
        })
    }

    /// Shared handle to the underlying pmcp server
    pub fn inner(&self) -> Arc<Mutex<Server>> {
        self.server.clone()
    }

    fn build_server_impl(
        tools: ToolRegistry,
        resources: ConferenceResources,
    ) -> Result<Server, pmcp::Error> {
        let mut builder = Server::builder()
            .name(SERVER_NAME)
            .version(env!("CARGO_PKG_VERSION"))
            .capabilities(ServerCapabilities::default());

        for tool in tools.all() {
            let tool_handler = ToolWrapper {
                name: tool.name.clone(),
                description: Some(tool.description.clone()),
                input_schema: tool.input_schema.clone(),
                handler: tool.handler.clone(),
            };
            builder = builder.tool(tool_handler.name.clone(), tool_handler);
        }

        builder.resources(resources).build()
    }

    /// Run the server in stdio mode (for desktop MCP clients)
    pub async fn run(self) -> Result<(), pmcp::Error> {
        tracing::info!("Starting MCP server in stdio mode");

        // run_stdio() takes ownership of the Server
        let server = Arc::try_unwrap(self.server)
            .map_err(|_| Error::internal("Cannot unwrap Arc - multiple references exist"))?
            .into_inner();

        server.run_stdio().await
    }

    /// Run the server in streamable HTTP mode
    pub async fn run_http(&self, addr: &str) -> Result<(SocketAddr, JoinHandle<()>), pmcp::Error> {
        tracing::info!("Starting MCP server in HTTP mode on {}", addr);

        let socket_addr: SocketAddr = addr
            .parse()
            .map_err(|e| Error::invalid_params(format!("Invalid address: {}", e)))?;

        let http_server = StreamableHttpServer::new(socket_addr, self.server.clone());
        http_server.start().await
    }
}

/// Wrapper for adapting our Tool to pmcp's ToolHandler
#[derive(Clone)]
struct ToolWrapper {
    name: String,
    description: Option<String>,
    input_schema: Value,
    handler: Arc<dyn crate::mcp::tools::ToolHandler>,
}

#[async_trait]
impl ToolHandler for ToolWrapper {
    async fn handle(&self, args: Value, _extra: RequestHandlerExtra) -> Result<Value, Error> {
        self.handler
            .execute(args)
            .await
            .map_err(|e| Error::internal(&e))
    }

    fn metadata(&self) -> Option<ToolInfo> {
        Some(ToolInfo::new(
            self.name.clone(),
            self.description.clone(),
            self.input_schema.clone(),
        ))
    }
}
