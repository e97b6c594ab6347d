//! Share link generator.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::super::common::{default_true, success_result};
use super::super::{ToolContext, ToolDefinition};
use super::UrlParts;
use crate::domains::tools::{Template, ToolError};

const COMPOSE_URL: &str = "https://farcaster.xyz/~/compose";
const DEFAULT_SHARE_TEXT: &str = "Check out this Mini App!";

/// Where the link will be shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ShareContext {
    Direct,
    Cast,
    Frame,
    Embed,
}

impl ShareContext {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Cast => "cast",
            Self::Frame => "frame",
            Self::Embed => "embed",
        }
    }
}

/// Parameters for the share link tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateShareLinkParams {
    /// URL of the Mini App.
    pub app_url: String,

    /// Context where the link will be shared.
    pub share_context: ShareContext,

    /// Custom share text.
    #[serde(default)]
    pub custom_text: Option<String>,

    /// Include preview metadata.
    #[serde(default = "default_true")]
    pub include_preview: bool,
}

/// `fc:miniapp` embed carried in a page's meta tag.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Embed<'a> {
    version: &'a str,
    image_url: String,
    button: EmbedButton<'a>,
}

#[derive(Serialize)]
struct EmbedButton<'a> {
    title: &'a str,
    action: EmbedAction<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedAction<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    url: &'a str,
    name: &'a str,
}

/// Build a cast composer link that embeds `app_url`.
pub(crate) fn compose_link(text: &str, app_url: &str) -> Result<String, ToolError> {
    let query = serde_urlencoded::to_string([("text", text), ("embeds[]", app_url)])
        .map_err(|e| ToolError::internal(e.to_string()))?;
    Ok(format!("{}?{}", COMPOSE_URL, query))
}

/// Escape a value for a single-quoted HTML attribute.
fn attribute_value(raw: &str) -> String {
    raw.replace('&', "&amp;").replace('\'', "&#39;")
}

const REPORT: &str = r#"# Share Link ({{context}})

**App URL:** {{appUrl}}
**Share Text:** {{text}}

## Link:
```
{{link}}
```

{{usage}}
{{#if preview}}

## Preview Metadata:
Add this tag to the `<head>` of the shared page so feeds render a rich card:
```html
<meta name="fc:miniapp" content='{{embed}}' />
```

Preview image: 3:2 aspect ratio, at least 600x400px, under 1MB.
{{/if}}
{{#if warning}}

⚠️ {{warning}}
{{/if}}
"#;

/// Share link tool.
pub struct GenerateShareLinkTool;

impl GenerateShareLinkTool {
    fn link_and_usage(
        context: ShareContext,
        app_url: &str,
        text: &str,
    ) -> Result<(String, String), ToolError> {
        let result = match context {
            ShareContext::Direct => (
                app_url.to_string(),
                "## Usage:\nShare the URL as-is. Farcaster clients open it as a Mini App when the page carries an embed tag.".to_string(),
            ),
            ShareContext::Cast => {
                let link = compose_link(text, app_url)?;
                let usage = format!(
                    "## Usage:\nOpen the link to start a cast with the app embedded.\n\nFrom inside the app, prefer the SDK:\n```typescript\nawait sdk.actions.composeCast({{ text: {}, embeds: ['{}'] }});\n```",
                    serde_json::to_string(text)?,
                    app_url
                );
                (link, usage)
            }
            ShareContext::Frame => (
                app_url.to_string(),
                "## Usage:\nPaste the URL into a cast. The `fc:miniapp` meta tag below turns it into an interactive card with a launch button.".to_string(),
            ),
            ShareContext::Embed => {
                let usage = format!(
                    "## Usage:\n```html\n<iframe src=\"{}\" width=\"424\" height=\"695\" style=\"border:0\" allow=\"clipboard-write\"></iframe>\n```",
                    app_url
                );
                (app_url.to_string(), usage)
            }
        };
        Ok(result)
    }
}

impl ToolDefinition for GenerateShareLinkTool {
    const NAME: &'static str = "farcaster_generate_share_link";
    const DESCRIPTION: &'static str = "Generate shareable links for Mini App distribution";

    type Params = GenerateShareLinkParams;

    #[instrument(skip_all, fields(context = params.share_context.as_str()))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        info!("Generating share link");

        let app_url = params.app_url.trim();
        let text = params
            .custom_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_SHARE_TEXT);

        let parts = UrlParts::parse(app_url);
        let warning = match parts {
            None => "App URL should be an absolute http(s) URL".to_string(),
            Some(p) if !p.is_https() => "Mini Apps must be served over HTTPS".to_string(),
            Some(_) => String::new(),
        };

        let (link, usage) = Self::link_and_usage(params.share_context, app_url, text)?;

        let origin = parts.map(|p| p.origin()).unwrap_or_else(|| app_url.to_string());
        let embed = Embed {
            version: "1",
            image_url: format!("{}/og-image.png", origin),
            button: EmbedButton {
                title: "Open App",
                action: EmbedAction {
                    kind: "launch_miniapp",
                    url: app_url,
                    name: "Mini App",
                },
            },
        };

        let text = Template::new(REPORT)
            .var("context", params.share_context.as_str())
            .var("appUrl", app_url)
            .var("text", text)
            .var("link", link)
            .var("usage", usage)
            .var("embed", attribute_value(&serde_json::to_string(&embed)?))
            .var("warning", warning)
            .flag("preview", params.include_preview)
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
    fn test_compose_link_is_url_encoded() {
        let link = compose_link("Hello & welcome!", "https://app.xyz/?a=1").unwrap();
        assert_eq!(
            link,
            "https://farcaster.xyz/~/compose?text=Hello+%26+welcome%21&embeds%5B%5D=https%3A%2F%2Fapp.xyz%2F%3Fa%3D1"
        );
    }

    #[test]
    fn test_cast_link_with_custom_text() {
        let text = run::<GenerateShareLinkTool>(json!({
            "appUrl": "https://app.xyz",
            "shareContext": "cast",
            "customText": "Play with me"
        }));
        assert!(text.contains("**Share Text:** Play with me"));
        assert!(text.contains("compose?text=Play+with+me&embeds%5B%5D=https%3A%2F%2Fapp.xyz"));
        assert!(text.contains("composeCast({ text: \"Play with me\", embeds: ['https://app.xyz'] })"));
        assert!(text.contains("\"imageUrl\":\"https://app.xyz/og-image.png\""));
        assert!(!text.contains("⚠️"));
    }

    #[test]
    fn test_direct_link_without_preview_warns_on_http() {
        let text = run::<GenerateShareLinkTool>(json!({
            "appUrl": "http://app.xyz",
            "shareContext": "direct",
            "includePreview": false
        }));
        assert!(text.contains("**Share Text:** Check out this Mini App!"));
        assert!(!text.contains("fc:miniapp"));
        assert!(text.contains("⚠️ Mini Apps must be served over HTTPS"));
    }

    #[test]
    fn test_embed_attribute_escapes_quotes() {
        let text = run::<GenerateShareLinkTool>(json!({
            "appUrl": "https://app.xyz/?q=it's&x=1",
            "shareContext": "frame"
        }));
        let tag = text
            .lines()
            .find(|line| line.starts_with("<meta name=\"fc:miniapp\""))
            .unwrap();
        assert!(tag.contains("it&#39;s&amp;x=1"));
        assert_eq!(tag.matches('\'').count(), 2);
    }

    #[test]
    fn test_required_fields() {
        assert!(GenerateShareLinkTool::parse(args(json!({ "appUrl": "https://a.b" }))).is_err());
    }
}
