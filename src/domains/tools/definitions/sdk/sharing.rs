//! Social sharing generator.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::super::common::{bullet_list, default_true, mark, success_result};
use super::super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Template, ToolError};

/// Way a Mini App can be shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ShareType {
    Cast,
    Frame,
    DirectLink,
    Embed,
}

impl ShareType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cast => "cast",
            Self::Frame => "frame",
            Self::DirectLink => "direct-link",
            Self::Embed => "embed",
        }
    }
}

/// Parameters for the sharing tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImplementSharingParams {
    /// Types of sharing to support.
    #[serde(default = "default_share_types")]
    pub share_types: Vec<ShareType>,

    /// Include OpenGraph metadata generation.
    #[serde(default = "default_true")]
    pub include_metadata: bool,

    /// Allow customization of share text.
    #[serde(default = "default_true")]
    pub customize_share_text: bool,
}

fn default_share_types() -> Vec<ShareType> {
    vec![ShareType::Cast, ShareType::DirectLink]
}

const SHARE_CODE: &str = r#"import sdk from '@farcaster/miniapp-sdk';

const APP_URL = 'https://your-app.com';
{{#if customText}}

// Fill {placeholders} in a share template
export function buildShareText(
  template: string,
  values: Record<string, string | number>
): string {
  return template.replace(/\{(\w+)\}/g, (match, key) =>
    key in values ? String(values[key]) : match
  );
}
{{/if}}
{{#if cast}}

// Open the cast composer with the app embedded
export async function shareAsCast(text: string, path = '/') {
  const url = new URL(path, APP_URL).toString();
  await sdk.actions.composeCast({ text, embeds: [url] });
}
{{/if}}
{{#if frame}}

// Meta tag that renders the app as a rich embed in feeds
export function frameEmbedMeta(imageUrl: string, buttonTitle = 'Open App') {
  const embed = {
    version: '1',
    imageUrl,
    button: {
      title: buttonTitle,
      action: { type: 'launch_miniapp', url: APP_URL },
    },
  };
  return `<meta name="fc:miniapp" content='${JSON.stringify(embed)}' />`;
}
{{/if}}
{{#if directLink}}

// Copy a direct link, falling back to the native share sheet
export async function shareDirectLink(path = '/'): Promise<'copied' | 'shared'> {
  const url = new URL(path, APP_URL).toString();
  if (navigator.clipboard) {
    await navigator.clipboard.writeText(url);
    return 'copied';
  }
  await navigator.share({ url });
  return 'shared';
}
{{/if}}
{{#if embed}}

// HTML snippet for embedding the app on other sites
export function embedSnippet(path = '/', height = 600): string {
  const url = new URL(path, APP_URL).toString();
  return `<iframe src="${url}" width="424" height="${height}" style="border:0" allow="clipboard-write"></iframe>`;
}
{{/if}}"#;

const METADATA_CODE: &str = r#"interface ShareMetadata {
  title: string;
  description: string;
  imageUrl: string;
  url: string;
}

// OpenGraph tags so shared links unfurl with a preview
export function openGraphTags(meta: ShareMetadata): string {
  return [
    `<meta property="og:title" content="${meta.title}" />`,
    `<meta property="og:description" content="${meta.description}" />`,
    `<meta property="og:image" content="${meta.imageUrl}" />`,
    `<meta property="og:url" content="${meta.url}" />`,
    `<meta name="twitter:card" content="summary_large_image" />`,
  ].join('\n');
}"#;

const REPORT: &str = r#"# Social Sharing

## Share Types:
{{types}}

## Sharing Utilities:
```typescript
{{code}}
```
{{#if metadata}}

## Share Metadata:
```typescript
{{metadataCode}}
```

Embed images should use a 3:2 aspect ratio and stay under 1MB.
{{/if}}

## Configuration:
{{metadataMark}} OpenGraph metadata
{{textMark}} Custom share text

## Usage:
```tsx
{{usage}}
```
"#;

/// Sharing tool.
pub struct ImplementSharingTool;

impl ImplementSharingTool {
    fn usage(params: &ImplementSharingParams) -> String {
        let text = if params.customize_share_text {
            "buildShareText('I scored {score} points!', { score })"
        } else {
            "'Check out this Mini App!'"
        };

        let mut lines = Vec::new();
        for share in &params.share_types {
            let line = match share {
                ShareType::Cast => format!(
                    "<button onClick={{() => shareAsCast({})}}>Share to feed</button>",
                    text
                ),
                ShareType::Frame => {
                    "// In your HTML head: frameEmbedMeta('https://your-app.com/embed.png')"
                        .to_string()
                }
                ShareType::DirectLink => {
                    "<button onClick={() => shareDirectLink()}>Copy link</button>".to_string()
                }
                ShareType::Embed => "<pre>{embedSnippet()}</pre>".to_string(),
            };
            lines.push(line);
        }
        lines.join("\n")
    }
}

impl ToolDefinition for ImplementSharingTool {
    const NAME: &'static str = "farcaster_implement_sharing";
    const DESCRIPTION: &'static str = "Implement social sharing functionality for Farcaster feeds";

    type Params = ImplementSharingParams;

    #[instrument(skip_all, fields(share_types = params.share_types.len()))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        info!("Generating sharing utilities");

        let has = |share| params.share_types.contains(&share);
        let code = Template::new(SHARE_CODE)
            .flag("cast", has(ShareType::Cast))
            .flag("frame", has(ShareType::Frame))
            .flag("directLink", has(ShareType::DirectLink))
            .flag("embed", has(ShareType::Embed))
            .flag("customText", params.customize_share_text)
            .render()?;

        let types = bullet_list(params.share_types.iter().map(|s| s.as_str()));

        let text = Template::new(REPORT)
            .var("types", types)
            .var("code", code)
            .var("metadataCode", METADATA_CODE)
            .var("metadataMark", mark(params.include_metadata))
            .var("textMark", mark(params.customize_share_text))
            .var("usage", Self::usage(&params))
            .flag("metadata", params.include_metadata)
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
    fn test_default_share_types() {
        let text = run::<ImplementSharingTool>(json!({}));
        assert!(text.contains("- cast\n- direct-link"));
        assert!(text.contains("export async function shareAsCast"));
        assert!(text.contains("export async function shareDirectLink"));
        assert!(!text.contains("frameEmbedMeta"));
        assert!(text.contains("export function openGraphTags"));
        assert!(text.contains("shareAsCast(buildShareText("));
    }

    #[test]
    fn test_frame_and_embed_without_extras() {
        let text = run::<ImplementSharingTool>(json!({
            "shareTypes": ["frame", "embed"],
            "includeMetadata": false,
            "customizeShareText": false
        }));
        assert!(text.contains("name=\"fc:miniapp\""));
        assert!(text.contains("<iframe src="));
        assert!(!text.contains("buildShareText"));
        assert!(!text.contains("openGraphTags"));
        assert!(text.contains("❌ OpenGraph metadata"));
    }
}
