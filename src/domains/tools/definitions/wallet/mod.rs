//! Wallet tools: Wagmi setup, transactions, chain configuration and events.

mod chains;
mod events;
mod integration;
mod transaction;

use rmcp::model::{CallToolResult, JsonObject};

use super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Domain, ToolError, ToolId};

pub use chains::{ConfigureChainsParams, ConfigureChainsTool, CustomRpc};
pub use events::{HandleWalletEventsParams, HandleWalletEventsTool, WalletEvent};
pub use integration::{
    SetupWalletIntegrationParams, SetupWalletIntegrationTool, WalletChain, WalletConnector,
};
pub use transaction::{GenerateTransactionParams, GenerateTransactionTool, TransactionType};

/// Route a wallet tool call.
pub fn handle(
    tool: ToolId,
    args: JsonObject,
    ctx: &ToolContext,
) -> Result<CallToolResult, ToolError> {
    match tool {
        ToolId::SetupWalletIntegration => SetupWalletIntegrationTool::call(args, ctx),
        ToolId::GenerateTransaction => GenerateTransactionTool::call(args, ctx),
        ToolId::ConfigureChains => ConfigureChainsTool::call(args, ctx),
        ToolId::HandleWalletEvents => HandleWalletEventsTool::call(args, ctx),
        other => Err(ToolError::unknown_in_domain(Domain::Wallet, other.name())),
    }
}
