//! Tool Registry - listing and dispatch for every tool in the catalog.
//!
//! The registry is the single recovery point for tool calls: whatever goes
//! wrong inside a handler comes back as an error-flagged result, never as a
//! protocol error.

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use tracing::{info, warn};

use super::definitions::{
    ToolContext, auth, development, knowledge, project, publishing, sdk, wallet,
};
use super::{Domain, ToolError, ToolId};
use crate::domains::knowledge::KnowledgeStore;

/// Tool registry - manages all available tools.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    context: ToolContext,
    descriptors: Arc<Vec<Tool>>,
}

impl ToolRegistry {
    /// Create a registry over the given knowledge store.
    ///
    /// Descriptors are built once here and reused for every listing.
    pub fn new(knowledge: Arc<KnowledgeStore>) -> Self {
        let descriptors = ToolId::ALL.iter().map(|tool| tool.descriptor()).collect();
        info!("Registered {} tools", ToolId::ALL.len());

        Self {
            context: ToolContext::new(knowledge),
            descriptors: Arc::new(descriptors),
        }
    }

    /// Get all tool names, in listing order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        ToolId::ALL.iter().map(|tool| tool.name()).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn list_tools(&self) -> Vec<Tool> {
        self.descriptors.as_ref().clone()
    }

    /// Run a tool by name.
    ///
    /// Unknown names, malformed arguments and rendering failures all produce
    /// a result with `is_error` set and an `Error: ...` text block.
    pub fn dispatch(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        match self.route(name, arguments.unwrap_or_default()) {
            Ok(result) => result,
            Err(e) => {
                warn!(tool = name, error = %e, "Tool call failed");
                CallToolResult::error(vec![Content::text(format!("Error: {}", e))])
            }
        }
    }

    fn route(&self, name: &str, args: JsonObject) -> Result<CallToolResult, ToolError> {
        let tool = ToolId::from_name(name).ok_or_else(|| ToolError::unknown_tool(name))?;
        let ctx = &self.context;

        match tool.domain() {
            Domain::ProjectSetup => project::handle(tool, args, ctx),
            Domain::Auth => auth::handle(tool, args, ctx),
            Domain::Wallet => wallet::handle(tool, args, ctx),
            Domain::Sdk => sdk::handle(tool, args, ctx),
            Domain::Development => development::handle(tool, args, ctx),
            Domain::Publishing => publishing::handle(tool, args, ctx),
            Domain::Knowledge => knowledge::handle(tool, args, ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;
    use serde_json::json;

    fn registry() -> ToolRegistry {
        ToolRegistry::new(Arc::new(KnowledgeStore::builtin().unwrap()))
    }

    fn text(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(t) => &t.text,
            _ => panic!("Expected text content"),
        }
    }

    fn object(value: serde_json::Value) -> Option<JsonObject> {
        value.as_object().cloned()
    }

    #[test]
    fn test_registry_lists_catalog() {
        let registry = registry();
        let tools = registry.list_tools();
        assert_eq!(tools.len(), 30);
        assert_eq!(tools[0].name, "farcaster_create_mini_app");
        assert_eq!(tools[29].name, "farcaster_list_topics");

        let names = registry.tool_names();
        assert!(names.contains(&"farcaster_implement_siwf"));
        assert!(names.contains(&"farcaster_validate_deployment"));
    }

    #[test]
    fn test_descriptors_carry_object_schemas() {
        for tool in registry().list_tools() {
            assert!(tool.description.is_some(), "{} has no description", tool.name);
            assert_eq!(
                tool.input_schema.get("type"),
                Some(&json!("object")),
                "{} schema is not an object",
                tool.name
            );
        }
    }

    #[test]
    fn test_dispatch_unknown_tool() {
        let result = registry().dispatch("__nonexistent__", None);
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text(&result), "Error: Unknown tool: __nonexistent__");
    }

    #[test]
    fn test_dispatch_requires_exact_name() {
        let result = registry().dispatch("farcaster_validate_deployment_extra", None);
        assert_eq!(result.is_error, Some(true));
    }

    #[test]
    fn test_dispatch_missing_required_field() {
        let result = registry().dispatch("farcaster_create_mini_app", object(json!({ "name": "x" })));
        assert_eq!(result.is_error, Some(true));
        assert!(text(&result).starts_with("Error: Invalid arguments for farcaster_create_mini_app:"));
    }

    #[test]
    fn test_dispatch_success() {
        let result = registry().dispatch(
            "farcaster_list_topics",
            object(json!({ "format": "simple" })),
        );
        assert_ne!(result.is_error, Some(true));
        assert!(text(&result).contains("\"core-concepts\""));
    }
}
