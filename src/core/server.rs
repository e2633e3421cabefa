//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tools domain.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! Each tool defines a parameters struct, an `execute()` method (the search
//! pipeline), and its rmcp route. The ToolRouter is built dynamically in
//! `domains/tools/router.rs`; the shared BOLD client is constructed here,
//! once, from configuration.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;

use super::config::Config;
use super::error::Error;
use crate::domains::tools::{ToolRegistry, build_tool_router, definitions::BoldClient};

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and routes
/// tool calls into the BOLD search pipeline.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Shared upstream client, built once at startup.
    bold_client: Arc<BoldClient>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails when the configured BOLD base URL cannot produce a client.
    pub fn new(config: Config) -> Result<Self, Error> {
        let config = Arc::new(config);
        let bold_client = Arc::new(BoldClient::new(&config.bold)?);

        Ok(Self {
            tool_router: build_tool_router::<Self>(bold_client.clone()),
            bold_client,
            config,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    // ========================================================================
    // Dispatch Support Methods (HTTP transport, embedding, tests)
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name.
    ///
    /// Dispatches through the ToolRegistry; the answer is always a tool
    /// result object (`isError` for failures), never a transport fault.
    pub async fn call_tool(&self, name: &str, arguments: serde_json::Value) -> serde_json::Value {
        let registry = ToolRegistry::new(self.bold_client.clone());
        let result = registry.call_tool(name, arguments).await;

        let mut response = serde_json::json!({
            "content": result.content,
            "isError": result.is_error.unwrap_or(false)
        });
        if let Some(structured) = result.structured_content {
            response
                .as_object_mut()
                .expect("response is an object")
                .insert("structuredContent".to_string(), structured);
        }
        response
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "This server queries the BOLD (Barcode of Life Data System) biodiversity \
                 database. Use specimen-search for specimen records and combined-search for \
                 specimen records with nucleotide sequence data."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::BoldApiConfig;

    #[test]
    fn test_server_builds_with_default_config() {
        let server = McpServer::new(Config::default()).unwrap();
        assert_eq!(server.name(), "bold-mcp-server");

        let tools = server.list_tools();
        assert_eq!(tools.len(), 2);
    }

    #[test]
    fn test_server_rejects_bad_base_url() {
        let config = Config {
            bold: BoldApiConfig {
                base_url: "::not a url::".to_string(),
                timeout_secs: 10,
            },
            ..Default::default()
        };
        assert!(McpServer::new(config).is_err());
    }

    #[tokio::test]
    async fn test_call_tool_unknown_name_is_error_result() {
        let server = McpServer::new(Config::default()).unwrap();
        let response = server.call_tool("unknown-tool", serde_json::json!({})).await;
        assert_eq!(response["isError"], true);
    }

    #[test]
    fn test_get_info_declares_tools_capability() {
        let server = McpServer::new(Config::default()).unwrap();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
    }
}
