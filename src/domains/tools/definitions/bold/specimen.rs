//! BOLD specimen search tool.
//!
//! Queries the BOLD `API_Public/specimen` endpoint and returns normalized
//! specimen records.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use tracing::info;

use super::client::{BoldClient, Endpoint};
use super::common::{error_result, parse_params, record_count_summary, structured_result};
use super::query::SpecimenSearchParams;
use super::records::{SpecimenSearchResult, parse_records};

/// BOLD specimen search tool implementation.
#[derive(Debug, Clone)]
pub struct SpecimenSearchTool;

impl SpecimenSearchTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "specimen-search";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search the BOLD (Barcode of Life Data System) database for specimen records. \
         Filters cover taxonomy, geography, specimen IDs, BIN URIs, project/dataset codes, \
         storing institutions, and researcher names; at least one filter is required. \
         Returns structured records with identifiers, taxonomy, and collection metadata.";

    pub fn new() -> Self {
        Self
    }

    /// Run the search pipeline: map arguments, query BOLD, normalize the body.
    ///
    /// Every stage failure is returned as an error result whose message
    /// names the failing stage; nothing escapes as a protocol fault.
    pub async fn execute(params: &SpecimenSearchParams, client: &BoldClient) -> CallToolResult {
        let query = match params.to_query() {
            Ok(query) => query,
            Err(e) => return error_result(&e.to_string()),
        };

        let body = match client.fetch(Endpoint::Specimen, &query).await {
            Ok(body) => body,
            Err(e) => return error_result(&e.to_string()),
        };

        let records = match parse_records(&body) {
            Ok(records) => records,
            Err(e) => return error_result(&e.to_string()),
        };

        let total_count = records.len();
        let summary = record_count_summary(total_count, "specimen");
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
            input_schema: cached_schema_for_type::<SpecimenSearchParams>(),
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
                let result = match parse_params::<SpecimenSearchParams>(
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

impl Default for SpecimenSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::BoldApiConfig;
    use rmcp::model::RawContent;

    fn client_for(server: &mockito::Server) -> BoldClient {
        BoldClient::new(&BoldApiConfig {
            base_url: server.url(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn result_text(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(text) => text.text.clone(),
            other => panic!("expected text content, got: {other:?}"),
        }
    }

    #[test]
    fn test_tool_metadata() {
        let tool = SpecimenSearchTool::to_tool();
        assert_eq!(tool.name.as_ref(), "specimen-search");
        assert!(tool.description.is_some());
    }

    #[tokio::test]
    async fn test_search_returns_three_records() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/specimen")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("taxon".into(), "Apis mellifera".into()),
                mockito::Matcher::UrlEncoded("format".into(), "tsv".into()),
            ]))
            .with_status(200)
            .with_body(
                "processid\tsampleid\tspecies_name\tcountry\n\
                 ACRJP618-11\tBIOUG01-1\tApis mellifera\tCanada\n\
                 ACRJP619-11\tBIOUG01-2\tApis mellifera\tCanada\n\
                 ACRJP620-11\tBIOUG01-3\tApis mellifera\tJapan\n",
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let params = SpecimenSearchParams {
            taxon: Some("Apis mellifera".to_string()),
            ..Default::default()
        };
        let result = SpecimenSearchTool::execute(&params, &client).await;

        mock.assert_async().await;
        assert_eq!(result.is_error, Some(false));
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["total_count"], 3);
        assert_eq!(structured["records"][0]["processid"], "ACRJP618-11");
        assert_eq!(structured["records"][2]["country"], "Japan");
    }

    #[tokio::test]
    async fn test_validation_failure_makes_no_upstream_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server);
        let result =
            SpecimenSearchTool::execute(&SpecimenSearchParams::default(), &client).await;

        mock.assert_async().await;
        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).starts_with("validation error:"));
    }

    #[tokio::test]
    async fn test_upstream_503_yields_error_result() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/specimen")
            .match_query(mockito::Matcher::Any)
            .with_status(503)
            .with_body("Service Unavailable")
            .create_async()
            .await;

        let client = client_for(&server);
        let params = SpecimenSearchParams {
            taxon: Some("Aves".to_string()),
            ..Default::default()
        };
        let result = SpecimenSearchTool::execute(&params, &client).await;

        assert_eq!(result.is_error, Some(true));
        let text = result_text(&result);
        assert!(text.starts_with("upstream error:"));
        assert!(text.contains("503"));
    }

    #[tokio::test]
    async fn test_malformed_body_yields_parse_error_result() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/specimen")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance page</html>")
            .create_async()
            .await;

        let client = client_for(&server);
        let params = SpecimenSearchParams {
            taxon: Some("Aves".to_string()),
            ..Default::default()
        };
        let result = SpecimenSearchTool::execute(&params, &client).await;

        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).starts_with("parse error:"));
    }

    #[tokio::test]
    async fn test_empty_result_set_is_success() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/specimen")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("processid\tsampleid\n")
            .create_async()
            .await;

        let client = client_for(&server);
        let params = SpecimenSearchParams {
            taxon: Some("Vampyroteuthis infernalis".to_string()),
            ..Default::default()
        };
        let result = SpecimenSearchTool::execute(&params, &client).await;

        assert_eq!(result.is_error, Some(false));
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["total_count"], 0);
    }
}
