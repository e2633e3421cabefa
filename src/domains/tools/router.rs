//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! This module builds the ToolRouter for STDIO/TCP transport by delegating
//! to the tool definitions themselves. Each tool knows how to create its own
//! route; both routes share the startup-scoped BOLD client.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{BoldClient, CombinedSearchTool, SpecimenSearchTool};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(client: Arc<BoldClient>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(SpecimenSearchTool::create_route(client.clone()))
        .with_route(CombinedSearchTool::create_route(client))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use crate::core::config::BoldApiConfig;

    struct TestServer {}

    fn test_client() -> Arc<BoldClient> {
        Arc::new(
            BoldClient::new(&BoldApiConfig {
                base_url: "http://127.0.0.1:1".to_string(),
                timeout_secs: 1,
            })
            .unwrap(),
        )
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_client());
        let tools = router.list_all();
        assert_eq!(tools.len(), 2);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"specimen-search"));
        assert!(names.contains(&"combined-search"));
    }

    #[test]
    fn test_registry_matches_router() {
        // Ensure registry and router expose the same tool set
        let client = test_client();
        let registry = ToolRegistry::new(client.clone());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(client);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
