//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of the available search tools
//! - The dispatch seam: `call_tool` routes a named tool call through the
//!   search pipeline and always answers with a tool result, never a fault

use std::sync::Arc;

use rmcp::model::{CallToolResult, Tool};
use tracing::warn;

use super::definitions::bold::common::{error_result, parse_params};
use super::definitions::{BoldClient, CombinedSearchTool, SpecimenSearchTool};
use super::error::ToolError;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages the available tools.
///
/// Holds the startup-scoped BOLD client shared by every dispatch; the
/// registry itself carries no per-request state.
pub struct ToolRegistry {
    client: Arc<BoldClient>,
}

impl ToolRegistry {
    /// Create a new tool registry around a shared BOLD client.
    pub fn new(client: Arc<BoldClient>) -> Self {
        Self { client }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![SpecimenSearchTool::NAME, CombinedSearchTool::NAME]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for the exposed tool set.
    /// Both HTTP and STDIO/TCP transports use this to get tool metadata.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![SpecimenSearchTool::to_tool(), CombinedSearchTool::to_tool()]
    }

    /// Dispatch a tool call to the appropriate handler.
    ///
    /// Unknown tool names and every pipeline failure come back as error
    /// results; a failed call leaves the registry ready for the next one.
    pub async fn call_tool(&self, name: &str, arguments: serde_json::Value) -> CallToolResult {
        match name {
            SpecimenSearchTool::NAME => match parse_params(arguments) {
                Ok(params) => SpecimenSearchTool::execute(&params, &self.client).await,
                Err(invalid) => invalid,
            },
            CombinedSearchTool::NAME => match parse_params(arguments) {
                Ok(params) => CombinedSearchTool::execute(&params, &self.client).await,
                Err(invalid) => invalid,
            },
            _ => {
                warn!("Unknown tool requested: {}", name);
                error_result(&ToolError::not_found(name).to_string())
            }
        }
    }
}
