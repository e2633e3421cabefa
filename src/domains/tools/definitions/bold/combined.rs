//! BOLD combined specimen + sequence search tool.
//!
//! Queries the BOLD `API_Public/combined` endpoint, which returns specimen
//! metadata together with nucleotide sequence data. Sequence payloads are
//! kept only when the caller asks for them.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use tracing::info;

use super::client::{BoldClient, Endpoint};
use super::common::{error_result, parse_params, record_count_summary, structured_result};
use super::query::CombinedSearchParams;
use super::records::{SpecimenSearchResult, parse_records, strip_sequence_data};

/// BOLD combined search tool implementation.
#[derive(Debug, Clone)]
pub struct CombinedSearchTool;

impl CombinedSearchTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "combined-search";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search the BOLD (Barcode of Life Data System) database for specimen records \
         together with their nucleotide (DNA) sequence data. Accepts the same filters as \
         specimen-search plus genetic marker codes. Sequence payloads are included in the \
         returned records only when include_sequence is true (default: false).";

    pub fn new() -> Self {
        Self
    }

    /// Run the search pipeline against the combined endpoint.
    ///
    /// With `include_sequence` unset, sequence payloads are stripped from
    /// the normalized records even when upstream returns them.
    pub async fn execute(params: &CombinedSearchParams, client: &BoldClient) -> CallToolResult {
        let query = match params.to_query() {
            Ok(query) => query,
            Err(e) => return error_result(&e.to_string()),
        };

        let body = match client.fetch(Endpoint::Combined, &query).await {
            Ok(body) => body,
            Err(e) => return error_result(&e.to_string()),
        };

        let mut records = match parse_records(&body) {
            Ok(records) => records,
            Err(e) => return error_result(&e.to_string()),
        };

        if !params.include_sequence {
            records = strip_sequence_data(records);
        }

        let total_count = records.len();
        let summary = record_count_summary(total_count, "combined");
        info!("{}", summary);
        structured_result(
            summary,
            SpecimenSearchResult {
                records,
                total_count,
            },
        )
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CombinedSearchParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(client: Arc<BoldClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let client = client.clone();
            async move {
                let result = match parse_params::<CombinedSearchParams>(
                    serde_json::Value::Object(args),
                ) {
                    Ok(params) => Self::execute(&params, &client).await,
                    Err(invalid) => invalid,
                };
                Ok(result)
            }
            .boxed()
        })
    }
}

impl Default for CombinedSearchTool {
    fn default() -> Self {
        Self::new()
    }
}
