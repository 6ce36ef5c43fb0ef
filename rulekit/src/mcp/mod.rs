//! MCP (Model Context Protocol) server for rulekit
//!
//! This module implements an MCP server using stdio transport, exposing
//! the rule store to AI agents.
//!
//! ## Tools Exposed
//!
//! - `list_rules` - Rule files per purpose, with descriptions
//! - `get_rule` - Raw text of one rule file
//! - `enable_rules` - Install purposes into a project's rule directory
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rulekit::mcp::McpServer;
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = McpServer::new("/usr/share/rulekit/rules");
//!     server.run().await.unwrap();
//! }
//! ```

mod protocol;
mod server;
pub mod tools;

pub use protocol::{
    ErrorCode, InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolContent,
    ToolDefinition, ToolResult, MCP_PROTOCOL_VERSION,
};
pub use server::McpServer;
