//! Publishing tools: manifest hosting, share links, analytics and
//! deployment.

mod analytics;
mod deployment;
mod publish;
mod share_link;
mod validate;

use rmcp::model::{CallToolResult, JsonObject};

use super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Domain, ToolError, ToolId};

pub use analytics::{AnalyticsProvider, SetupAnalyticsParams, SetupAnalyticsTool, TrackingEvent};
pub use deployment::{
    EnvironmentVariable, GenerateDeploymentScriptParams, GenerateDeploymentScriptTool, Platform,
};
pub use publish::{DeploymentTarget, HostingMethod, PublishMiniAppParams, PublishMiniAppTool};
pub use share_link::{GenerateShareLinkParams, GenerateShareLinkTool, ShareContext};
pub use validate::{DeploymentCheck, ValidateDeploymentParams, ValidateDeploymentTool};

/// Route a publishing tool call.
pub fn handle(
    tool: ToolId,
    args: JsonObject,
    ctx: &ToolContext,
) -> Result<CallToolResult, ToolError> {
    match tool {
        ToolId::PublishMiniApp => PublishMiniAppTool::call(args, ctx),
        ToolId::GenerateShareLink => GenerateShareLinkTool::call(args, ctx),
        ToolId::SetupAnalytics => SetupAnalyticsTool::call(args, ctx),
        ToolId::GenerateDeploymentScript => GenerateDeploymentScriptTool::call(args, ctx),
        ToolId::ValidateDeployment => ValidateDeploymentTool::call(args, ctx),
        other => Err(ToolError::unknown_in_domain(Domain::Publishing, other.name())),
    }
}

/// A URL split into scheme, host and path. Only `http` and `https` parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UrlParts<'a> {
    pub scheme: &'a str,
    pub host: &'a str,
    pub path: &'a str,
}

impl<'a> UrlParts<'a> {
    pub fn parse(url: &'a str) -> Option<Self> {
        let (scheme, rest) = url.trim().split_once("://")?;
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return None;
        }
        let (host, path) = match rest.find(['/', '?', '#']) {
            Some(pos) => rest.split_at(pos),
            None => (rest, ""),
        };
        if host.is_empty() {
            return None;
        }
        Some(Self { scheme, host, path })
    }

    pub fn is_https(&self) -> bool {
        self.scheme.eq_ignore_ascii_case("https")
    }

    /// Scheme and host, without a trailing slash.
    pub fn origin(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}

/// Strip any scheme and trailing slashes from a user supplied domain.
pub(crate) fn bare_domain(domain: &str) -> &str {
    let domain = domain.trim();
    let domain = UrlParts::parse(domain).map_or(domain, |parts| parts.host);
    domain.trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::test_support::{args, context};
    use serde_json::json;

    #[test]
    fn test_url_parts() {
        let parts = UrlParts::parse("https://app.example.com/path?q=1").unwrap();
        assert_eq!(parts.host, "app.example.com");
        assert_eq!(parts.path, "/path?q=1");
        assert!(parts.is_https());
        assert_eq!(parts.origin(), "https://app.example.com");

        assert!(UrlParts::parse("ftp://example.com").is_none());
        assert!(UrlParts::parse("example.com").is_none());
        assert!(UrlParts::parse("https:///nohost").is_none());
    }

    #[test]
    fn test_bare_domain() {
        assert_eq!(bare_domain("https://example.com/"), "example.com");
        assert_eq!(bare_domain("example.com/"), "example.com");
        assert_eq!(bare_domain(" app.example.com "), "app.example.com");
    }

    #[test]
    fn test_rejects_tool_from_other_domain() {
        let err = handle(ToolId::CreateMiniApp, args(json!({})), &context()).unwrap_err();
        assert_eq!(err.to_string(), "Unknown publishing tool: farcaster_create_mini_app");
    }
}
