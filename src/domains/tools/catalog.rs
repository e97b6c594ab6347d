//! The closed catalog of tools.
//!
//! [`ToolId`] enumerates every tool the server exposes, in listing order.
//! Names are resolved by exact match only.

use std::fmt;

use rmcp::model::Tool;

use super::definitions::{
    ConfigureChainsTool, CreateMiniAppTool, DebugMiniAppTool, GenerateAuthFlowTool,
    GenerateDeploymentScriptTool, GenerateErrorBoundaryTool, GenerateManifestTool,
    GenerateNavigationTool, GenerateShareLinkTool, GenerateTestSuiteTool,
    GenerateTransactionTool, GetKnowledgeTool, GetUserProfileTool, HandleSdkEventsTool,
    HandleWalletEventsTool, ImplementNotificationsTool, ImplementSharingTool, ImplementSiwfTool,
    InitializeSdkTool, ListTopicsTool, OptimizePerformanceTool, PublishMiniAppTool,
    SearchKnowledgeTool, SetupAnalyticsTool, SetupDevEnvironmentTool, SetupWalletIntegrationTool,
    StartDevServerTool, ToolDefinition, ValidateDeploymentTool, ValidateManifestTool,
    ValidateUserTool,
};

/// The functional area that owns a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    ProjectSetup,
    Auth,
    Wallet,
    Sdk,
    Development,
    Publishing,
    Knowledge,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ProjectSetup => "project setup",
            Self::Auth => "authentication",
            Self::Wallet => "wallet",
            Self::Sdk => "SDK integration",
            Self::Development => "development",
            Self::Publishing => "publishing",
            Self::Knowledge => "knowledge",
        };
        f.write_str(label)
    }
}

macro_rules! tool_catalog {
    ($($variant:ident => $tool:ty, $domain:ident;)+) => {
        /// Identifier of a tool in the catalog.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ToolId {
            $($variant,)+
        }

        impl ToolId {
            /// Every tool, in listing order.
            pub const ALL: &'static [ToolId] = &[$(ToolId::$variant,)+];

            /// The wire name of the tool.
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => <$tool as ToolDefinition>::NAME,)+
                }
            }

            /// The domain whose handler executes the tool.
            pub fn domain(self) -> Domain {
                match self {
                    $(Self::$variant => Domain::$domain,)+
                }
            }

            /// The MCP descriptor advertised for the tool.
            pub fn descriptor(self) -> Tool {
                match self {
                    $(Self::$variant => <$tool as ToolDefinition>::to_tool(),)+
                }
            }
        }
    };
}

tool_catalog! {
    CreateMiniApp => CreateMiniAppTool, ProjectSetup;
    GenerateManifest => GenerateManifestTool, ProjectSetup;
    ValidateManifest => ValidateManifestTool, ProjectSetup;
    SetupDevEnvironment => SetupDevEnvironmentTool, ProjectSetup;

    ImplementSiwf => ImplementSiwfTool, Auth;
    GenerateAuthFlow => GenerateAuthFlowTool, Auth;
    ValidateUser => ValidateUserTool, Auth;
    GetUserProfile => GetUserProfileTool, Auth;

    SetupWalletIntegration => SetupWalletIntegrationTool, Wallet;
    GenerateTransaction => GenerateTransactionTool, Wallet;
    ConfigureChains => ConfigureChainsTool, Wallet;
    HandleWalletEvents => HandleWalletEventsTool, Wallet;

    InitializeSdk => InitializeSdkTool, Sdk;
    HandleSdkEvents => HandleSdkEventsTool, Sdk;
    ImplementNotifications => ImplementNotificationsTool, Sdk;
    GenerateNavigation => GenerateNavigationTool, Sdk;
    ImplementSharing => ImplementSharingTool, Sdk;

    StartDevServer => StartDevServerTool, Development;
    GenerateTestSuite => GenerateTestSuiteTool, Development;
    DebugMiniApp => DebugMiniAppTool, Development;
    OptimizePerformance => OptimizePerformanceTool, Development;
    GenerateErrorBoundary => GenerateErrorBoundaryTool, Development;

    PublishMiniApp => PublishMiniAppTool, Publishing;
    GenerateShareLink => GenerateShareLinkTool, Publishing;
    SetupAnalytics => SetupAnalyticsTool, Publishing;
    GenerateDeploymentScript => GenerateDeploymentScriptTool, Publishing;
    ValidateDeployment => ValidateDeploymentTool, Publishing;

    GetKnowledge => GetKnowledgeTool, Knowledge;
    SearchKnowledge => SearchKnowledgeTool, Knowledge;
    ListTopics => ListTopicsTool, Knowledge;
}

impl ToolId {
    /// Resolve a wire name. Only exact matches resolve.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|tool| tool.name() == name)
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_size() {
        assert_eq!(ToolId::ALL.len(), 30);
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = ToolId::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(names.len(), ToolId::ALL.len());
    }

    #[test]
    fn test_names_are_prefixed() {
        for tool in ToolId::ALL {
            assert!(tool.name().starts_with("farcaster_"), "{}", tool);
        }
    }

    #[test]
    fn test_from_name_is_exact() {
        assert_eq!(
            ToolId::from_name("farcaster_setup_wallet_integration"),
            Some(ToolId::SetupWalletIntegration)
        );
        assert_eq!(ToolId::from_name("farcaster_setup_wallet"), None);
        assert_eq!(ToolId::from_name("farcaster_create_mini_app_v2"), None);
        assert_eq!(ToolId::from_name("FARCASTER_LIST_TOPICS"), None);
    }

    #[test]
    fn test_descriptor_matches_name() {
        for tool in ToolId::ALL {
            let descriptor = tool.descriptor();
            assert_eq!(descriptor.name, tool.name());
            assert!(descriptor.description.is_some());
        }
    }

    #[test]
    fn test_domain_order_follows_listing() {
        let domains: Vec<_> = ToolId::ALL.iter().map(|t| t.domain()).collect();
        assert_eq!(domains.first(), Some(&Domain::ProjectSetup));
        assert_eq!(domains.last(), Some(&Domain::Knowledge));
        assert_eq!(ToolId::ValidateDeployment.domain(), Domain::Publishing);
    }
}
