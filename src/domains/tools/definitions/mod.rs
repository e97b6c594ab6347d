//! Tool definitions, grouped by domain.
//!
//! Each tool is a unit struct implementing [`ToolDefinition`]: a wire name, a
//! description, a typed parameter struct (from which the input schema is
//! derived) and a pure `execute` function. Each domain module exposes a
//! `handle` function that routes a [`ToolId`] to the tool that owns it.
//!
//! ## Adding a New Tool
//!
//! 1. Add a params struct and a `ToolDefinition` impl in the domain's module
//! 2. Export it here
//! 3. Add a variant to the catalog in `catalog.rs`
//! 4. Route the variant in the domain's `handle`

use std::sync::Arc;

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domains::knowledge::KnowledgeStore;

use super::ToolError;

pub mod auth;
pub mod common;
pub mod development;
pub mod knowledge;
pub mod project;
pub mod publishing;
pub mod sdk;
pub mod wallet;

pub use auth::{GenerateAuthFlowTool, GetUserProfileTool, ImplementSiwfTool, ValidateUserTool};
pub use development::{
    DebugMiniAppTool, GenerateErrorBoundaryTool, GenerateTestSuiteTool, OptimizePerformanceTool,
    StartDevServerTool,
};
pub use knowledge::{GetKnowledgeTool, ListTopicsTool, SearchKnowledgeTool};
pub use project::{
    CreateMiniAppTool, GenerateManifestTool, SetupDevEnvironmentTool, ValidateManifestTool,
};
pub use publishing::{
    GenerateDeploymentScriptTool, GenerateShareLinkTool, PublishMiniAppTool, SetupAnalyticsTool,
    ValidateDeploymentTool,
};
pub use sdk::{
    GenerateNavigationTool, HandleSdkEventsTool, ImplementNotificationsTool, ImplementSharingTool,
    InitializeSdkTool,
};
pub use wallet::{
    ConfigureChainsTool, GenerateTransactionTool, HandleWalletEventsTool,
    SetupWalletIntegrationTool,
};

/// Shared, read-only state handed to every tool.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub knowledge: Arc<KnowledgeStore>,
}

impl ToolContext {
    pub fn new(knowledge: Arc<KnowledgeStore>) -> Self {
        Self { knowledge }
    }
}

/// Trait for tool definitions.
pub trait ToolDefinition {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Typed arguments. Defaults are declared per field with serde.
    type Params: DeserializeOwned + JsonSchema + 'static;

    /// Run the tool on already-validated arguments.
    fn execute(params: Self::Params, ctx: &ToolContext) -> Result<CallToolResult, ToolError>;

    /// Convert to an rmcp Tool model.
    fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<Self::Params>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Parse raw call arguments into the typed params.
    fn parse(args: JsonObject) -> Result<Self::Params, ToolError> {
        serde_json::from_value(serde_json::Value::Object(args))
            .map_err(|e| ToolError::malformed(Self::NAME, e.to_string()))
    }

    /// Parse then execute.
    fn call(args: JsonObject, ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        debug!(tool = Self::NAME, "Executing tool");
        let params = Self::parse(args)?;
        Self::execute(params, ctx)
    }
}
