//! Shared helpers for the BOLD search tools.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domains::tools::error::ToolError;

/// Deserialize tool arguments, turning failures into validation error results.
///
/// A null/absent arguments object is treated as empty so that the missing
/// filters are reported by the mapper rather than as a type error.
pub fn parse_params<P: DeserializeOwned>(arguments: serde_json::Value) -> Result<P, CallToolResult> {
    let value = if arguments.is_null() {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        arguments
    };
    serde_json::from_value(value)
        .map_err(|e| error_result(&ToolError::invalid_arguments(e.to_string()).to_string()))
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result carrying a text summary plus structured content.
pub fn structured_result<T: Serialize>(summary: String, data: T) -> CallToolResult {
    let mut result = CallToolResult::success(vec![Content::text(summary)]);
    result.structured_content = serde_json::to_value(data).ok();
    result
}

/// Summary line for a completed search.
pub fn record_count_summary(count: usize, endpoint: &str) -> String {
    match count {
        0 => format!("No specimen records matched the {endpoint} search"),
        1 => format!("Found 1 specimen record ({endpoint} search)"),
        n => format!("Found {n} specimen records ({endpoint} search)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    #[test]
    fn test_error_result_flags_error() {
        let result = error_result("validation error: no filters");
        assert_eq!(result.is_error, Some(true));
        if let RawContent::Text(text) = &result.content[0].raw {
            assert!(text.text.contains("validation error"));
        }
    }

    #[test]
    fn test_structured_result_carries_payload() {
        #[derive(Serialize)]
        struct Payload {
            total_count: usize,
        }
        let result = structured_result("Found 3".to_string(), Payload { total_count: 3 });
        assert_eq!(result.is_error, Some(false));
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["total_count"], 3);
    }

    #[test]
    fn test_record_count_summary() {
        assert_eq!(
            record_count_summary(0, "specimen"),
            "No specimen records matched the specimen search"
        );
        assert_eq!(
            record_count_summary(1, "combined"),
            "Found 1 specimen record (combined search)"
        );
        assert_eq!(
            record_count_summary(12, "specimen"),
            "Found 12 specimen records (specimen search)"
        );
    }
}
