//! Deployment script generator.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::super::common::{mark, success_result};
use super::super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Template, ToolError};

/// Hosting platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Vercel,
    Netlify,
    Aws,
    Gcp,
    Azure,
    Custom,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vercel => "vercel",
            Self::Netlify => "netlify",
            Self::Aws => "aws",
            Self::Gcp => "gcp",
            Self::Azure => "azure",
            Self::Custom => "custom",
        }
    }

    /// Config file name, config body and deploy command.
    fn target(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::Vercel => ("vercel.json", VERCEL_CONFIG, "npx vercel deploy --prebuilt --prod"),
            Self::Netlify => ("netlify.toml", NETLIFY_CONFIG, "npx netlify deploy --dir=dist --prod"),
            Self::Aws => ("deploy/aws.sh", AWS_CONFIG, "bash deploy/aws.sh"),
            Self::Gcp => ("deploy/gcp.sh", GCP_CONFIG, "bash deploy/gcp.sh"),
            Self::Azure => (
                "staticwebapp.config.json",
                AZURE_CONFIG,
                "npx @azure/static-web-apps-cli deploy ./dist --env production",
            ),
            Self::Custom => ("deploy/custom.sh", CUSTOM_CONFIG, "bash deploy/custom.sh"),
        }
    }

    fn secrets(self) -> &'static [&'static str] {
        match self {
            Self::Vercel => &["VERCEL_TOKEN", "VERCEL_ORG_ID", "VERCEL_PROJECT_ID"],
            Self::Netlify => &["NETLIFY_AUTH_TOKEN", "NETLIFY_SITE_ID"],
            Self::Aws => &["AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY", "S3_BUCKET", "CLOUDFRONT_DISTRIBUTION_ID"],
            Self::Gcp => &["GCP_SA_KEY", "GCS_BUCKET"],
            Self::Azure => &["SWA_CLI_DEPLOYMENT_TOKEN"],
            Self::Custom => &["DEPLOY_HOST", "DEPLOY_PATH", "SSH_PRIVATE_KEY"],
        }
    }
}

/// Environment variable the app needs at build time.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct EnvironmentVariable {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,
}

/// Parameters for the deployment script tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDeploymentScriptParams {
    /// Deployment platform.
    pub platform: Platform,

    /// Build command for the app.
    #[serde(default = "default_build_command")]
    pub build_command: String,

    /// Required environment variables.
    #[serde(default)]
    pub environment_variables: Vec<EnvironmentVariable>,

    /// Include CI/CD pipeline configuration.
    #[serde(rename = "includeCI", default)]
    pub include_ci: bool,
}

fn default_build_command() -> String {
    "npm run build".to_string()
}

const VERCEL_CONFIG: &str = r#"{
  "buildCommand": "{{buildCommand}}",
  "outputDirectory": "dist",
  "headers": [
    {
      "source": "/.well-known/farcaster.json",
      "headers": [
        { "key": "Content-Type", "value": "application/json" },
        { "key": "Access-Control-Allow-Origin", "value": "*" }
      ]
    }
  ],
  "rewrites": [{ "source": "/((?!\\.well-known).*)", "destination": "/index.html" }]
}"#;

const NETLIFY_CONFIG: &str = r#"[build]
  command = "{{buildCommand}}"
  publish = "dist"

[[headers]]
  for = "/.well-known/farcaster.json"
  [headers.values]
    Content-Type = "application/json"
    Access-Control-Allow-Origin = "*"

[[redirects]]
  from = "/*"
  to = "/index.html"
  status = 200"#;

const AWS_CONFIG: &str = r#"#!/usr/bin/env bash
set -euo pipefail

# Static assets, long cache
aws s3 sync dist "s3://${S3_BUCKET}" --delete \
  --exclude ".well-known/*" --exclude "index.html" \
  --cache-control "public, max-age=31536000, immutable"

# HTML and manifest, always revalidated
aws s3 cp dist/index.html "s3://${S3_BUCKET}/index.html" \
  --cache-control "no-cache"
aws s3 cp dist/.well-known/farcaster.json "s3://${S3_BUCKET}/.well-known/farcaster.json" \
  --content-type "application/json" --cache-control "no-cache"

aws cloudfront create-invalidation \
  --distribution-id "${CLOUDFRONT_DISTRIBUTION_ID}" \
  --paths "/index.html" "/.well-known/farcaster.json""#;

const GCP_CONFIG: &str = r#"#!/usr/bin/env bash
set -euo pipefail

gcloud storage rsync dist "gs://${GCS_BUCKET}" --recursive --delete-unmatched-destination-objects

gcloud storage objects update "gs://${GCS_BUCKET}/.well-known/farcaster.json" \
  --content-type="application/json" --cache-control="no-cache"
gcloud storage objects update "gs://${GCS_BUCKET}/index.html" --cache-control="no-cache"

gcloud storage buckets update "gs://${GCS_BUCKET}" \
  --web-main-page-suffix=index.html --web-error-page=index.html"#;

const AZURE_CONFIG: &str = r#"{
  "navigationFallback": {
    "rewrite": "/index.html",
    "exclude": ["/.well-known/*", "/assets/*"]
  },
  "routes": [
    {
      "route": "/.well-known/farcaster.json",
      "headers": {
        "Content-Type": "application/json",
        "Access-Control-Allow-Origin": "*"
      }
    }
  ]
}"#;

const CUSTOM_CONFIG: &str = r#"#!/usr/bin/env bash
set -euo pipefail

rsync -avz --delete dist/ "${DEPLOY_HOST}:${DEPLOY_PATH}/"
ssh "${DEPLOY_HOST}" "test -f ${DEPLOY_PATH}/.well-known/farcaster.json""#;

const DEPLOY_SCRIPT: &str = r#"#!/usr/bin/env bash
# deploy.sh
set -euo pipefail
{{#if requiredCheck}}

# Required environment variables
for var in {{requiredVars}}; do
  if [ -z "${!var:-}" ]; then
    echo "Missing required environment variable: $var" >&2
    exit 1
  fi
done
{{/if}}

echo "Building..."
{{buildCommand}}

if [ ! -f dist/.well-known/farcaster.json ]; then
  echo "dist/.well-known/farcaster.json not found; copy your manifest into public/.well-known/" >&2
  exit 1
fi

echo "Deploying to {{platform}}..."
{{deployCommand}}

echo "Done. Check https://your-domain/.well-known/farcaster.json"
"#;

const CI_WORKFLOW: &str = r#"# .github/workflows/deploy.yml
name: Deploy Mini App

on:
  push:
    branches: [main]

jobs:
  deploy:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - uses: actions/setup-node@v4
        with:
          node-version: 20
          cache: npm
      - run: npm ci
      - run: npm test --if-present
      - run: ./deploy.sh
        env:
{{secrets}}"#;

const REPORT: &str = r#"# Deployment Script ({{platform}})

## Platform Configuration (`{{configFile}}`):
```{{configLang}}
{{config}}
```

## Deploy Script:
```bash
{{script}}
```
{{#if envFile}}

## Environment Variables (.env.example):
```env
{{envFile}}
```
{{/if}}
{{#if ci}}

## CI/CD Pipeline:
```yaml
{{workflow}}
```
{{/if}}

## Configuration:
✅ Build command: `{{buildCommand}}`
{{ciMark}} CI/CD pipeline

## Notes:
- Serve `/.well-known/farcaster.json` with `Content-Type: application/json`
- Do not cache the manifest aggressively; clients refetch it on updates
- Keep secrets in the platform's secret store, never in the repository
"#;

/// Deployment script tool.
pub struct GenerateDeploymentScriptTool;

impl GenerateDeploymentScriptTool {
    fn env_file(vars: &[EnvironmentVariable]) -> String {
        vars.iter()
            .map(|var| {
                let mut comment = var.description.clone().unwrap_or_default();
                if var.required {
                    if !comment.is_empty() {
                        comment.push(' ');
                    }
                    comment.push_str("(required)");
                }
                if comment.is_empty() {
                    format!("{}=", var.name)
                } else {
                    format!("# {}\n{}=", comment, var.name)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ToolDefinition for GenerateDeploymentScriptTool {
    const NAME: &'static str = "farcaster_generate_deployment_script";
    const DESCRIPTION: &'static str = "Generate deployment scripts for various hosting platforms";

    type Params = GenerateDeploymentScriptParams;

    #[instrument(skip_all, fields(platform = params.platform.as_str(), ci = params.include_ci))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        info!("Generating deployment script");

        let platform = params.platform;
        let (config_file, config_source, deploy_command) = platform.target();
        let config_lang = match config_file.rsplit('.').next() {
            Some("json") => "json",
            Some("toml") => "toml",
            _ => "bash",
        };

        let build_command = params.build_command.trim();
        let config = Template::new(config_source)
            .var("buildCommand", build_command)
            .render()?;

        let required = params
            .environment_variables
            .iter()
            .filter(|v| v.required)
            .map(|v| v.name.as_str())
            .collect::<Vec<_>>();

        let script = Template::new(DEPLOY_SCRIPT)
            .var("requiredVars", required.join(" "))
            .var("buildCommand", build_command)
            .var("platform", platform.as_str())
            .var("deployCommand", deploy_command)
            .flag("requiredCheck", !required.is_empty())
            .render()?;

        let secrets = platform
            .secrets()
            .iter()
            .copied()
            .chain(params.environment_variables.iter().map(|v| v.name.as_str()))
            .map(|name| format!("          {}: ${{{{ secrets.{} }}}}", name, name))
            .collect::<Vec<_>>()
            .join("\n");
        let workflow = Template::new(CI_WORKFLOW).var("secrets", secrets).render()?;

        let text = Template::new(REPORT)
            .var("platform", platform.as_str())
            .var("configFile", config_file)
            .var("configLang", config_lang)
            .var("config", config)
            .var("script", script)
            .var("envFile", Self::env_file(&params.environment_variables))
            .var("workflow", workflow)
            .var("buildCommand", build_command)
            .var("ciMark", mark(params.include_ci))
            .flag("ci", params.include_ci)
            .render()?;

        Ok(success_result(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::test_support::{args, run};
    use serde_json::json;

    #[test]
    fn test_vercel_defaults() {
        let text = run::<GenerateDeploymentScriptTool>(json!({ "platform": "vercel" }));
        assert!(text.contains("## Platform Configuration (`vercel.json`):\n```json"));
        assert!(text.contains("\"buildCommand\": \"npm run build\""));
        assert!(text.contains("npx vercel deploy --prebuilt --prod"));
        assert!(!text.contains("Missing required environment variable"));
        assert!(!text.contains("## CI/CD Pipeline"));
        assert!(!text.contains(".env.example"));
    }

    #[test]
    fn test_env_vars_and_ci() {
        let text = run::<GenerateDeploymentScriptTool>(json!({
            "platform": "netlify",
            "buildCommand": "pnpm build",
            "environmentVariables": [
                { "name": "VITE_APP_URL", "description": "Public URL", "required": true },
                { "name": "VITE_DEBUG" }
            ],
            "includeCI": true
        }));
        assert!(text.contains("command = \"pnpm build\""));
        assert!(text.contains("for var in VITE_APP_URL; do"));
        assert!(text.contains("# Public URL (required)\nVITE_APP_URL=\nVITE_DEBUG="));
        assert!(text.contains("          NETLIFY_AUTH_TOKEN: ${{ secrets.NETLIFY_AUTH_TOKEN }}"));
        assert!(text.contains("          VITE_DEBUG: ${{ secrets.VITE_DEBUG }}"));
        assert!(text.contains("✅ CI/CD pipeline"));
    }

    #[test]
    fn test_shell_platforms() {
        let text = run::<GenerateDeploymentScriptTool>(json!({ "platform": "aws" }));
        assert!(text.contains("## Platform Configuration (`deploy/aws.sh`):\n```bash"));
        assert!(text.contains("aws cloudfront create-invalidation"));
    }

    #[test]
    fn test_platform_is_required() {
        assert!(GenerateDeploymentScriptTool::parse(args(json!({}))).is_err());
    }
}
