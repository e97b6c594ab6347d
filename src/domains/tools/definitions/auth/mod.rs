//! Authentication tools: Sign In With Farcaster, session flows and user lookups.

mod auth_flow;
mod siwf;
mod user;

use rmcp::model::{CallToolResult, JsonObject};

use super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Domain, ToolError, ToolId};

pub use auth_flow::{GenerateAuthFlowParams, GenerateAuthFlowTool, SessionStorage};
pub use siwf::{AuthBackend, ImplementSiwfParams, ImplementSiwfTool};
pub use user::{GetUserProfileParams, GetUserProfileTool, ValidateUserParams, ValidateUserTool};

/// Route an authentication tool call.
pub fn handle(
    tool: ToolId,
    args: JsonObject,
    ctx: &ToolContext,
) -> Result<CallToolResult, ToolError> {
    match tool {
        ToolId::ImplementSiwf => ImplementSiwfTool::call(args, ctx),
        ToolId::GenerateAuthFlow => GenerateAuthFlowTool::call(args, ctx),
        ToolId::ValidateUser => ValidateUserTool::call(args, ctx),
        ToolId::GetUserProfile => GetUserProfileTool::call(args, ctx),
        other => Err(ToolError::unknown_in_domain(Domain::Auth, other.name())),
    }
}
