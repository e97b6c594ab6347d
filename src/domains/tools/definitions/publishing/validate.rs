//! Static deployment validation.
//!
//! Nothing is fetched. Checks that need the network are reported as manual
//! steps with the command to run.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::super::common::success_result;
use super::super::project::WELL_KNOWN_PATH;
use super::super::{ToolContext, ToolDefinition};
use super::UrlParts;
use crate::domains::tools::{Template, ToolError};

/// Deployment check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DeploymentCheck {
    ManifestValid,
    HttpsRequired,
    DomainVerified,
    IconsAccessible,
    Performance,
}

impl DeploymentCheck {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ManifestValid => "manifest-valid",
            Self::HttpsRequired => "https-required",
            Self::DomainVerified => "domain-verified",
            Self::IconsAccessible => "icons-accessible",
            Self::Performance => "performance",
        }
    }
}

/// Parameters for the deployment validation tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateDeploymentParams {
    /// URL of the deployed Mini App.
    pub app_url: String,

    /// URL of the manifest file.
    #[serde(default)]
    pub manifest_url: Option<String>,

    /// Validation checks to perform.
    #[serde(default = "default_checks")]
    pub checks: Vec<DeploymentCheck>,
}

fn default_checks() -> Vec<DeploymentCheck> {
    vec![
        DeploymentCheck::ManifestValid,
        DeploymentCheck::HttpsRequired,
        DeploymentCheck::IconsAccessible,
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Pass,
    Fail,
    Manual,
}

impl Status {
    fn icon(self) -> &'static str {
        match self {
            Self::Pass => "✅",
            Self::Fail => "❌",
            Self::Manual => "🔍",
        }
    }
}

#[derive(Debug)]
struct CheckResult {
    check: DeploymentCheck,
    status: Status,
    detail: String,
    command: Option<String>,
}

impl CheckResult {
    fn new(check: DeploymentCheck, status: Status, detail: impl Into<String>) -> Self {
        Self {
            check,
            status,
            detail: detail.into(),
            command: None,
        }
    }

    fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    fn render(&self) -> String {
        let mut out = format!(
            "### {} {}\n{}",
            self.status.icon(),
            self.check.as_str(),
            self.detail
        );
        if let Some(command) = &self.command {
            out.push_str(&format!("\n```bash\n{}\n```", command));
        }
        out
    }
}

/// Default manifest location for an app URL.
fn default_manifest_url(app_url: &str) -> String {
    match UrlParts::parse(app_url) {
        Some(parts) => format!("{}{}", parts.origin(), WELL_KNOWN_PATH),
        None => format!("{}{}", app_url.trim_end_matches('/'), WELL_KNOWN_PATH),
    }
}

fn run_check(check: DeploymentCheck, app_url: &str, manifest_url: &str) -> CheckResult {
    let app = UrlParts::parse(app_url);
    let manifest = UrlParts::parse(manifest_url);

    match check {
        DeploymentCheck::HttpsRequired => match (app, manifest) {
            (Some(a), Some(m)) if a.is_https() && m.is_https() => {
                CheckResult::new(check, Status::Pass, "App and manifest are served over HTTPS")
            }
            (None, _) => CheckResult::new(check, Status::Fail, "App URL is not an absolute http(s) URL"),
            _ => CheckResult::new(check, Status::Fail, "Mini Apps and their manifests must use HTTPS"),
        },
        DeploymentCheck::ManifestValid => {
            let Some(m) = manifest else {
                return CheckResult::new(check, Status::Fail, "Manifest URL is not an absolute http(s) URL");
            };
            if m.path != WELL_KNOWN_PATH {
                return CheckResult::new(
                    check,
                    Status::Fail,
                    format!("Manifest must be served at {}, found {}", WELL_KNOWN_PATH, m.path),
                );
            }
            if let Some(a) = app.filter(|a| !a.host.eq_ignore_ascii_case(m.host)) {
                return CheckResult::new(
                    check,
                    Status::Fail,
                    format!("Manifest host {} does not match app host {}", m.host, a.host),
                );
            }
            CheckResult::new(
                check,
                Status::Manual,
                "Location is correct. Confirm it returns JSON with accountAssociation and frame:",
            )
            .with_command(format!(
                "curl -sf {} | jq -e '.accountAssociation and .frame'",
                manifest_url
            ))
        }
        DeploymentCheck::DomainVerified => {
            let host = app.map(|a| a.host).unwrap_or(app_url);
            CheckResult::new(
                check,
                Status::Manual,
                format!(
                    "Decode the signed payload and confirm its domain is `{}`:",
                    host
                ),
            )
            .with_command(format!(
                "curl -sf {} | jq -r '.accountAssociation.payload' | base64 -d",
                manifest_url
            ))
        }
        DeploymentCheck::IconsAccessible => CheckResult::new(
            check,
            Status::Manual,
            "Every image URL in the manifest should return 200 with an image content type:",
        )
        .with_command(format!(
            "for url in $(curl -sf {} | jq -r '.frame | .iconUrl, .imageUrl, .splashImageUrl | select(. != null)'); do\n  curl -sI \"$url\" | head -n 1\ndone",
            manifest_url
        )),
        DeploymentCheck::Performance => CheckResult::new(
            check,
            Status::Manual,
            "Run a mobile Lighthouse audit; aim for a performance score above 90:",
        )
        .with_command(format!(
            "npx lighthouse {} --preset=perf --form-factor=mobile --quiet --chrome-flags=\"--headless\"",
            app_url
        )),
    }
}

const REPORT: &str = r#"# Deployment Validation

**App URL:** {{appUrl}}
**Manifest URL:** {{manifestUrl}}

## Summary:
{{passed}} passed, {{failed}} failed, {{manual}} need manual verification

## Results:
{{results}}
"#;

/// Deployment validation tool.
pub struct ValidateDeploymentTool;

impl ToolDefinition for ValidateDeploymentTool {
    const NAME: &'static str = "farcaster_validate_deployment";
    const DESCRIPTION: &'static str = "Validate Mini App deployment and manifest accessibility";

    type Params = ValidateDeploymentParams;

    #[instrument(skip_all, fields(checks = params.checks.len()))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        info!("Validating deployment");

        let app_url = params.app_url.trim();
        let manifest_url = params
            .manifest_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| default_manifest_url(app_url));

        let results = params
            .checks
            .iter()
            .map(|check| run_check(*check, app_url, &manifest_url))
            .collect::<Vec<_>>();
        let count = |status: Status| results.iter().filter(|r| r.status == status).count();

        let text = Template::new(REPORT)
            .var("appUrl", app_url)
            .var("manifestUrl", manifest_url.as_str())
            .var("passed", count(Status::Pass).to_string())
            .var("failed", count(Status::Fail).to_string())
            .var("manual", count(Status::Manual).to_string())
            .var(
                "results",
                results
                    .iter()
                    .map(CheckResult::render)
                    .collect::<Vec<_>>()
                    .join("\n\n"),
            )
            .render()?;

        Ok(success_result(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::test_support::run;
    use serde_json::json;

    #[test]
    fn test_default_manifest_url() {
        assert_eq!(
            default_manifest_url("https://app.xyz/play"),
            "https://app.xyz/.well-known/farcaster.json"
        );
        assert_eq!(
            default_manifest_url("app.xyz/"),
            "app.xyz/.well-known/farcaster.json"
        );
    }

    #[test]
    fn test_defaults_on_https_app() {
        let text = run::<ValidateDeploymentTool>(json!({ "appUrl": "https://app.xyz" }));
        assert!(text.contains("**Manifest URL:** https://app.xyz/.well-known/farcaster.json"));
        assert!(text.contains("### ✅ https-required"));
        assert!(text.contains("### 🔍 manifest-valid"));
        assert!(text.contains("1 passed, 0 failed, 2 need manual verification"));
        assert!(!text.contains("performance"));
    }

    #[test]
    fn test_failures_are_reported() {
        let text = run::<ValidateDeploymentTool>(json!({
            "appUrl": "http://app.xyz",
            "manifestUrl": "https://other.xyz/farcaster.json",
            "checks": ["https-required", "manifest-valid"]
        }));
        assert!(text.contains("### ❌ https-required"));
        assert!(text.contains("Manifest must be served at /.well-known/farcaster.json, found /farcaster.json"));
        assert!(text.contains("0 passed, 2 failed, 0 need manual verification"));
    }

    #[test]
    fn test_host_mismatch() {
        let result = run_check(
            DeploymentCheck::ManifestValid,
            "https://app.xyz",
            "https://other.xyz/.well-known/farcaster.json",
        );
        assert_eq!(result.status, Status::Fail);
        assert!(result.detail.contains("does not match"));
    }
}
