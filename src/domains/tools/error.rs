//! Tool-level error types.
//!
//! Failures inside a search pipeline use the BOLD domain's `SearchError`;
//! this enum covers the dispatch boundary around it. Display strings are
//! stage-labeled the same way, since both end up verbatim in error results.

use thiserror::Error;

/// Errors raised at the tool dispatch boundary.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool is not part of the registry.
    #[error("unknown tool: {0}")]
    NotFound(String),

    /// The arguments object could not be deserialized into the tool's schema.
    #[error("validation error: invalid arguments: {0}")]
    InvalidArguments(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_tool() {
        let err = ToolError::not_found("specimen-lookup");
        assert_eq!(err.to_string(), "unknown tool: specimen-lookup");
    }

    #[test]
    fn test_invalid_arguments_is_stage_labeled() {
        let err = ToolError::invalid_arguments("unknown field `habitat`");
        assert!(err.to_string().starts_with("validation error:"));
    }
}
