//! SDK integration tools: initialization, lifecycle events, notifications,
//! navigation and sharing.

mod events;
mod initialize;
mod navigation;
mod notifications;
mod sharing;

use rmcp::model::{CallToolResult, JsonObject};

use super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Domain, ToolError, ToolId};

pub use events::{HandleSdkEventsParams, HandleSdkEventsTool, SdkEvent};
pub use initialize::{InitializeSdkParams, InitializeSdkTool, SdkFeature};
pub use navigation::{GenerateNavigationParams, GenerateNavigationTool, NavigationType};
pub use notifications::{
    ImplementNotificationsParams, ImplementNotificationsTool, NotificationType,
};
pub use sharing::{ImplementSharingParams, ImplementSharingTool, ShareType};

/// Route an SDK integration tool call.
pub fn handle(
    tool: ToolId,
    args: JsonObject,
    ctx: &ToolContext,
) -> Result<CallToolResult, ToolError> {
    match tool {
        ToolId::InitializeSdk => InitializeSdkTool::call(args, ctx),
        ToolId::HandleSdkEvents => HandleSdkEventsTool::call(args, ctx),
        ToolId::ImplementNotifications => ImplementNotificationsTool::call(args, ctx),
        ToolId::GenerateNavigation => GenerateNavigationTool::call(args, ctx),
        ToolId::ImplementSharing => ImplementSharingTool::call(args, ctx),
        other => Err(ToolError::unknown_in_domain(Domain::Sdk, other.name())),
    }
}
