//! Development tools: dev server, tests, debugging, performance and error
//! boundaries.

mod debug;
mod dev_server;
mod error_boundary;
mod performance;
mod test_suite;

use rmcp::model::{CallToolResult, JsonObject};

use super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Domain, ToolError, ToolId};

pub use debug::{DebugLevel, DebugMiniAppParams, DebugMiniAppTool};
pub use dev_server::{StartDevServerParams, StartDevServerTool};
pub use error_boundary::{FallbackUi, GenerateErrorBoundaryParams, GenerateErrorBoundaryTool};
pub use performance::{
    Optimization, OptimizePerformanceParams, OptimizePerformanceTool, TargetMetrics,
};
pub use test_suite::{GenerateTestSuiteParams, GenerateTestSuiteTool, TestFramework, TestType};

/// Route a development tool call.
pub fn handle(
    tool: ToolId,
    args: JsonObject,
    ctx: &ToolContext,
) -> Result<CallToolResult, ToolError> {
    match tool {
        ToolId::StartDevServer => StartDevServerTool::call(args, ctx),
        ToolId::GenerateTestSuite => GenerateTestSuiteTool::call(args, ctx),
        ToolId::DebugMiniApp => DebugMiniAppTool::call(args, ctx),
        ToolId::OptimizePerformance => OptimizePerformanceTool::call(args, ctx),
        ToolId::GenerateErrorBoundary => GenerateErrorBoundaryTool::call(args, ctx),
        other => Err(ToolError::unknown_in_domain(Domain::Development, other.name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::test_support::{args, context};
    use serde_json::json;

    #[test]
    fn test_rejects_tool_from_other_domain() {
        let err = handle(ToolId::ListTopics, args(json!({})), &context()).unwrap_err();
        assert_eq!(err.to_string(), "Unknown development tool: farcaster_list_topics");
    }
}
