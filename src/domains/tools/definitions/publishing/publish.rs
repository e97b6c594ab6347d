//! Publishing guide with manifest hosting and domain verification.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::super::common::{default_true, mark, success_result};
use super::super::project::WELL_KNOWN_PATH;
use super::super::{ToolContext, ToolDefinition};
use super::bare_domain;
use crate::domains::tools::{Template, ToolError};

/// Where the manifest file is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum HostingMethod {
    SelfHosted,
    FarcasterHosted,
    Vercel,
    Netlify,
}

impl HostingMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SelfHosted => "self-hosted",
            Self::FarcasterHosted => "farcaster-hosted",
            Self::Vercel => "vercel",
            Self::Netlify => "netlify",
        }
    }

    fn instructions(self) -> &'static str {
        match self {
            Self::SelfHosted => SELF_HOSTED,
            Self::FarcasterHosted => FARCASTER_HOSTED,
            Self::Vercel => VERCEL,
            Self::Netlify => NETLIFY,
        }
    }
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentTarget {
    #[default]
    Production,
    Staging,
    Preview,
}

impl DeploymentTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Staging => "staging",
            Self::Preview => "preview",
        }
    }
}

/// Parameters for the publish tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishMiniAppParams {
    /// How to host the manifest file.
    pub hosting_method: HostingMethod,

    /// Domain where the app will be hosted.
    pub domain: String,

    /// Deployment environment.
    #[serde(default)]
    pub deployment_target: DeploymentTarget,

    /// Verify domain ownership for account association.
    #[serde(default = "default_true")]
    pub verify_domain: bool,
}

const SELF_HOSTED: &str = r#"Serve the manifest as static JSON from your web server.

```nginx
location = {{path}} {
    default_type application/json;
    add_header Access-Control-Allow-Origin *;
    alias /var/www/{{domain}}/farcaster.json;
}
```

Or from an Express app:
```typescript
import express from 'express';
import manifest from './farcaster.json';

const app = express();

app.get('{{path}}', (req, res) => {
  res.set('Access-Control-Allow-Origin', '*');
  res.json(manifest);
});
```"#;

const FARCASTER_HOSTED: &str = r#"Create the manifest in the Farcaster developer tools, then redirect the
well-known path to the hosted copy. Updates made in the developer tools go
live without a redeploy.

```nginx
location = {{path}} {
    return 307 https://api.farcaster.xyz/miniapps/hosted-manifest/YOUR_MANIFEST_ID;
}
```

Keep the redirect temporary (307) so clients always fetch the latest manifest."#;

const VERCEL: &str = r#"Place the manifest at `public{{path}}` and add headers in `vercel.json`:

```json
{
  "headers": [
    {
      "source": "{{path}}",
      "headers": [
        { "key": "Content-Type", "value": "application/json" },
        { "key": "Access-Control-Allow-Origin", "value": "*" }
      ]
    }
  ]
}
```

```bash
vercel --prod
vercel domains add {{domain}}
```"#;

const NETLIFY: &str = r#"Place the manifest at `public{{path}}` and add `public/_headers`:

```
{{path}}
  Content-Type: application/json
  Access-Control-Allow-Origin: *
```

```bash
netlify deploy --prod
```

Then add {{domain}} under Site settings > Domain management."#;

const REPORT: &str = r#"# Publish Mini App ({{target}})

**Domain:** {{domain}}
**Hosting:** {{method}}
**Manifest URL:** https://{{domain}}{{path}}

## 1. Host the Manifest
{{instructions}}
{{#if verify}}

## 2. Verify Domain Ownership
The `accountAssociation` block proves that your Farcaster account owns {{domain}}.

1. Open the manifest tool in Farcaster developer settings
2. Enter `{{domain}}` exactly, without protocol or path
3. Sign with your custody account
4. Copy the generated block into your manifest:

```json
{
  "accountAssociation": {
    "header": "...",
    "payload": "...",
    "signature": "..."
  }
}
```

The signed payload contains the domain, so it is only valid on {{domain}}.
{{/if}}
{{#if nonProduction}}

## Environment Notes ({{target}})
- Each {{target}} domain needs its own manifest and its own account association
- Set `"noindex": true` in the manifest so {{target}} builds stay out of app discovery
- Never point a {{target}} manifest at production webhooks
{{/if}}

## Pre-Launch Checklist:
- [ ] App is served over HTTPS
- [ ] `https://{{domain}}{{path}}` returns valid JSON
- [ ] Icon is 1024x1024px PNG without transparency
- [ ] Splash image and background color are set
- [ ] `sdk.actions.ready()` is called after load
{{verifyMark}} Domain verification

## Verify:
```bash
curl -s https://{{domain}}{{path}} | jq .
```
"#;

/// Publish tool.
pub struct PublishMiniAppTool;

impl ToolDefinition for PublishMiniAppTool {
    const NAME: &'static str = "farcaster_publish_mini_app";
    const DESCRIPTION: &'static str =
        "Publish Mini App with proper manifest hosting and verification";

    type Params = PublishMiniAppParams;

    #[instrument(skip_all, fields(method = params.hosting_method.as_str(), target = params.deployment_target.as_str()))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        let domain = bare_domain(&params.domain);
        info!(domain, "Generating publishing guide");

        let instructions = Template::new(params.hosting_method.instructions())
            .var("path", WELL_KNOWN_PATH)
            .var("domain", domain)
            .render()?;

        let text = Template::new(REPORT)
            .var("target", params.deployment_target.as_str())
            .var("domain", domain)
            .var("method", params.hosting_method.as_str())
            .var("path", WELL_KNOWN_PATH)
            .var("instructions", instructions)
            .var("verifyMark", mark(params.verify_domain))
            .flag("verify", params.verify_domain)
            .flag(
                "nonProduction",
                params.deployment_target != DeploymentTarget::Production,
            )
            .render()?;

        Ok(success_result(text))
    }
}
