//! MCP (Model Context Protocol) implementation.

mod handlers;
mod resources;
pub mod server;
mod tools;

pub use resources::{
    conference_uri, read_conference_resource, ConferenceResources, CONFERENCE_URI_PREFIX,
};
pub use server::McpServer;
pub use tools::{Tool, ToolHandler, ToolRegistry};
