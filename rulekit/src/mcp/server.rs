//! MCP server implementation
//!
//! Implements the stdio transport for the Model Context Protocol: one
//! JSON-RPC message per line in, one response per line out.

use super::protocol::{
    InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolResult,
    MCP_PROTOCOL_VERSION,
};
use super::tools::{get_tool_definitions, handle_tool_call};
use crate::config::Config;
use crate::installer::{Installer, DEFAULT_RULES_SUBDIR};
use crate::store::RuleStore;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// MCP server for rulekit
///
/// Exposes rule listing, fetching and installation to AI agents.
pub struct McpServer {
    store: RuleStore,
    rules_subdir: PathBuf,
}

impl McpServer {
    /// Create a server over the rule store at `rules_dir`
    pub fn new<P: AsRef<Path>>(rules_dir: P) -> Self {
        Self::with_store(RuleStore::new(rules_dir))
    }

    /// Create a server from resolved configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            store: RuleStore::new(&config.rules_dir),
            rules_subdir: config.rules_subdir.clone(),
        }
    }

    /// Create a server with an existing store
    pub fn with_store(store: RuleStore) -> Self {
        Self {
            store,
            rules_subdir: PathBuf::from(DEFAULT_RULES_SUBDIR),
        }
    }

    /// Run the MCP server on stdio until EOF
    pub async fn run(&self) -> crate::Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve requests from `reader`, writing responses to `writer`, until EOF
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> crate::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!(
            "rulekit MCP server started (protocol version {}, rules at {})",
            MCP_PROTOCOL_VERSION,
            self.store.root().display()
        );

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            tracing::debug!("Received: {}", line);

            let response = match serde_json::from_str::<JsonRpcRequest>(line) {
                Ok(request) => self.handle_request(request),
                Err(e) => Some(JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::parse_error(format!("Parse error: {}", e)),
                )),
            };

            if let Some(response) = response {
                let response_json = serde_json::to_string(&response)?;
                writer.write_all(response_json.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
                tracing::debug!("Sent: {}", response_json);
            }
        }

        tracing::info!("EOF received, shutting down");
        Ok(())
    }

    /// Handle a single JSON-RPC message.
    ///
    /// Every message is dispatched; notifications (no `id` member) run for
    /// their side effects and produce no response.
    pub fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tools_call(&request.params),
            "ping" => Ok(json!({})),
            // Lifecycle notifications need no action
            method if method.starts_with("notifications/") => Ok(Value::Null),
            _ => Err(JsonRpcError::method_not_found(&request.method)),
        };

        let Some(id) = request.id else {
            if let Err(e) = result {
                tracing::debug!("Notification {} failed: {}", request.method, e);
            }
            return None;
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn handle_initialize(&self) -> Result<Value, JsonRpcError> {
        serde_json::to_value(InitializeResult::default())
            .map_err(|e| JsonRpcError::server_error(e.to_string()))
    }

    /// Handle tools/list request
    fn handle_tools_list(&self) -> Result<Value, JsonRpcError> {
        Ok(json!({ "tools": get_tool_definitions() }))
    }

    /// Handle tools/call request
    fn handle_tools_call(&self, params: &Option<Value>) -> Result<Value, JsonRpcError> {
        let params = params
            .as_ref()
            .ok_or_else(|| JsonRpcError::invalid_params("Missing params"))?;

        let tool_name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| JsonRpcError::invalid_params("Missing tool name"))?;

        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

        let installer = Installer::new(&self.store).with_rules_subdir(&self.rules_subdir);
        let result: ToolResult = handle_tool_call(&self.store, &installer, tool_name, &arguments)?;

        serde_json::to_value(result).map_err(|e| JsonRpcError::server_error(e.to_string()))
    }
}
