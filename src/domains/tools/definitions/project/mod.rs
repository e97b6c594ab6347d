//! Project setup tools: scaffolding, manifests and the local toolchain.

mod create_mini_app;
mod dev_environment;
mod manifest;

use rmcp::model::{CallToolResult, JsonObject};

use super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Domain, ToolError, ToolId};

pub use create_mini_app::{CreateMiniAppParams, CreateMiniAppTool};
pub use dev_environment::{PackageManager, SetupDevEnvironmentParams, SetupDevEnvironmentTool};
pub use manifest::{
    GenerateManifestParams, GenerateManifestTool, ValidateManifestParams, ValidateManifestTool,
    WELL_KNOWN_PATH,
};

/// Route a project setup tool call.
pub fn handle(
    tool: ToolId,
    args: JsonObject,
    ctx: &ToolContext,
) -> Result<CallToolResult, ToolError> {
    match tool {
        ToolId::CreateMiniApp => CreateMiniAppTool::call(args, ctx),
        ToolId::GenerateManifest => GenerateManifestTool::call(args, ctx),
        ToolId::ValidateManifest => ValidateManifestTool::call(args, ctx),
        ToolId::SetupDevEnvironment => SetupDevEnvironmentTool::call(args, ctx),
        other => Err(ToolError::unknown_in_domain(Domain::ProjectSetup, other.name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::test_support::context;

    #[test]
    fn test_foreign_tool_is_rejected() {
        let err = handle(ToolId::ListTopics, JsonObject::new(), &context()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown project setup tool: farcaster_list_topics"
        );
    }
}
