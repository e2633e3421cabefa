//! Error taxonomy for the BOLD search pipeline.
//!
//! Each variant corresponds to one stage of a search: argument validation,
//! the network call, the upstream response, and response parsing. Display
//! strings carry the stage label so an error converted into a tool result
//! names where the call failed.

use thiserror::Error;

/// Result type for the BOLD search pipeline.
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors produced while executing a BOLD search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The tool arguments failed validation (missing/ill-formed filters).
    #[error("validation error: {0}")]
    Validation(String),

    /// The request never completed: connect failure, timeout, broken stream.
    #[error("transport error: {0}")]
    Transport(String),

    /// BOLD answered with a non-success HTTP status.
    #[error("upstream error: BOLD returned HTTP {status}{}", body_excerpt(.body))]
    Upstream {
        /// HTTP status code from the upstream response.
        status: u16,
        /// Leading excerpt of the response body, if any.
        body: String,
    },

    /// The response body could not be normalized into specimen records.
    #[error("parse error: {0}")]
    Parse(String),
}

impl SearchError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an upstream error, keeping only a short body excerpt.
    pub fn upstream(status: u16, body: &str) -> Self {
        Self::Upstream {
            status,
            body: body.chars().take(200).collect(),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

fn body_excerpt(body: &str) -> String {
    if body.trim().is_empty() {
        String::new()
    } else {
        format!(": {}", body.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_stage() {
        assert!(
            SearchError::validation("no filters")
                .to_string()
                .starts_with("validation error:")
        );
        assert!(
            SearchError::transport("timed out")
                .to_string()
                .starts_with("transport error:")
        );
        assert!(
            SearchError::parse("empty body")
                .to_string()
                .starts_with("parse error:")
        );
    }

    #[test]
    fn test_upstream_display_carries_status() {
        let err = SearchError::upstream(503, "Service Unavailable");
        let msg = err.to_string();
        assert!(msg.contains("HTTP 503"));
        assert!(msg.contains("Service Unavailable"));
    }

    #[test]
    fn test_upstream_excerpt_truncated() {
        let long_body = "x".repeat(1000);
        let SearchError::Upstream { body, .. } = SearchError::upstream(500, &long_body) else {
            panic!("expected upstream variant");
        };
        assert_eq!(body.len(), 200);
    }

    #[test]
    fn test_upstream_empty_body_omits_excerpt() {
        let err = SearchError::upstream(502, "   ");
        assert_eq!(err.to_string(), "upstream error: BOLD returned HTTP 502");
    }
}
