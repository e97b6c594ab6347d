//! Manifest tools: generate and statically validate `/.well-known/farcaster.json`.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::super::common::{bullet_list, mark, pretty_json, success_result};
use super::super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Template, ToolError};

/// Path every manifest must be served from.
pub const WELL_KNOWN_PATH: &str = "/.well-known/farcaster.json";

// ============================================================================
// Generate
// ============================================================================

/// Parameters for the manifest generator.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateManifestParams {
    /// Display name of the Mini App.
    pub name: String,

    /// Home URL of the Mini App.
    pub home_url: String,

    /// URL to the app icon (recommended 200x200px).
    pub icon_url: String,

    /// URL to preview image (optional).
    #[serde(default)]
    pub image_url: Option<String>,

    /// Brief description of the app.
    #[serde(default)]
    pub description: Option<String>,

    /// Categories for app discovery.
    #[serde(default)]
    pub categories: Vec<String>,

    /// Custom button title for the app.
    #[serde(default = "default_button_title")]
    pub button_title: String,
}

fn default_button_title() -> String {
    "Open App".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Manifest<'a> {
    account_association: AccountAssociation,
    frame: Frame<'a>,
}

#[derive(Debug, Serialize)]
struct AccountAssociation {
    header: &'static str,
    payload: &'static str,
    signature: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Frame<'a> {
    name: &'a str,
    icon_url: &'a str,
    home_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<&'a str>,
    button_title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<FrameMetadata<'a>>,
}

#[derive(Debug, Serialize)]
struct FrameMetadata<'a> {
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<&'a [String]>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn build_manifest(params: &GenerateManifestParams) -> Manifest<'_> {
    let metadata = non_empty(&params.description).map(|description| FrameMetadata {
        description,
        categories: (!params.categories.is_empty()).then_some(params.categories.as_slice()),
    });

    Manifest {
        account_association: AccountAssociation {
            header: "Account association will be generated during deployment",
            payload: "Domain ownership proof payload",
            signature: "Cryptographic signature proving domain ownership",
        },
        frame: Frame {
            name: &params.name,
            icon_url: &params.icon_url,
            home_url: &params.home_url,
            image_url: non_empty(&params.image_url),
            button_title: &params.button_title,
            metadata,
        },
    }
}

const GENERATE_REPORT: &str = r#"# Farcaster Mini App Manifest Generated

## Manifest Content ({{path}}):

```json
{{manifest}}
```

## Deployment Instructions:

1. **Self-Hosted**: Place this file at `https://yourdomain.com/.well-known/farcaster.json`

2. **Farcaster-Hosted**:
   - Go to https://farcaster.xyz/~/settings/developer-tools
   - Create a new hosted manifest
   - Upload your manifest content

3. **Verification**:
   - Ensure HTTPS is enabled
   - Test manifest accessibility
   - Generate account association signature

## Required Steps:

1. ✅ Create manifest file
2. ⏳ Generate account association (requires domain setup)
3. ⏳ Deploy to hosting platform
4. ⏳ Verify manifest accessibility
5. ⏳ Test in Farcaster client

## Account Association:
The account association proves you own the domain. Generate this using Farcaster's developer tools or implement the cryptographic signing process.
"#;

/// Manifest generator tool.
pub struct GenerateManifestTool;

impl ToolDefinition for GenerateManifestTool {
    const NAME: &'static str = "farcaster_generate_manifest";
    const DESCRIPTION: &'static str =
        "Generate a valid Farcaster Mini App manifest file (/.well-known/farcaster.json)";

    type Params = GenerateManifestParams;

    #[instrument(skip_all, fields(name = %params.name))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        info!("Generating manifest");

        let manifest = pretty_json(&build_manifest(&params))?;
        let report = Template::new(GENERATE_REPORT)
            .var("path", WELL_KNOWN_PATH)
            .var("manifest", manifest)
            .render()?;

        Ok(success_result(report))
    }
}

// ============================================================================
// Validate
// ============================================================================

/// Parameters for the manifest validator.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateManifestParams {
    /// URL to the manifest file to validate.
    #[serde(default)]
    pub manifest_url: Option<String>,

    /// Raw JSON content of manifest (alternative to URL).
    #[serde(default)]
    pub manifest_content: Option<String>,
}

#[derive(Debug, Default)]
struct ManifestChecks {
    manifest_accessible: bool,
    https_required: bool,
    account_association: bool,
    frame_structure: bool,
    icon_accessible: bool,
    home_url_valid: bool,
}

#[derive(Debug, Default)]
struct ValidationReport {
    errors: Vec<String>,
    warnings: Vec<String>,
    checks: ManifestChecks,
}

impl ValidationReport {
    fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

/// A JSON value counts as present unless it is null, false, zero or empty.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        Some(_) => true,
    }
}

fn is_https(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|url| url.starts_with("https://"))
}

fn check_url(url: &str, report: &mut ValidationReport) {
    let https = url.starts_with("https://");
    report.checks.manifest_accessible = https;
    report.checks.https_required = https;

    if !url.contains(WELL_KNOWN_PATH) {
        report.error(format!("Manifest must be served at {}", WELL_KNOWN_PATH));
    }
}

fn check_content(content: &str, report: &mut ValidationReport) {
    let manifest: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(e) => {
            debug!("Manifest content is not JSON: {}", e);
            report.error("Invalid JSON format");
            return;
        }
    };

    if is_present(manifest.get("accountAssociation")) {
        report.checks.account_association = true;
    } else {
        report.error("Missing accountAssociation");
    }

    let frame = manifest.get("frame");
    if !is_present(frame) {
        report.error("Missing frame object");
        return;
    }
    report.checks.frame_structure = true;
    let field = |name: &str| frame.and_then(|f| f.get(name));

    if !is_present(field("name")) {
        report.error("Missing frame.name");
    }

    if is_present(field("iconUrl")) {
        report.checks.icon_accessible = is_https(field("iconUrl"));
        if !report.checks.icon_accessible {
            report.warn("frame.iconUrl should use HTTPS");
        }
    } else {
        report.error("Missing frame.iconUrl");
    }

    if is_present(field("homeUrl")) {
        report.checks.home_url_valid = is_https(field("homeUrl"));
        if !report.checks.home_url_valid {
            report.warn("frame.homeUrl should use HTTPS");
        }
    } else {
        report.error("Missing frame.homeUrl");
    }
}

fn validate(params: &ValidateManifestParams) -> ValidationReport {
    let mut report = ValidationReport::default();

    if let Some(url) = params.manifest_url.as_deref().filter(|u| !u.is_empty()) {
        check_url(url, &mut report);
    }
    if let Some(content) = params.manifest_content.as_deref().filter(|c| !c.is_empty()) {
        check_content(content, &mut report);
    }
    if params.manifest_url.as_deref().unwrap_or_default().is_empty()
        && params.manifest_content.as_deref().unwrap_or_default().is_empty()
    {
        report.warn("No manifestUrl or manifestContent provided; nothing was checked");
    }

    report
}

const VALIDATE_REPORT: &str = r#"# Manifest Validation Results

## Overall Status: {{#if valid}}✅ VALID{{else}}❌ INVALID{{/if}}

## Validation Checks:
- Manifest Accessible: {{manifestAccessible}}
- HTTPS Required: {{httpsRequired}}
- Account Association: {{accountAssociation}}
- Frame Structure: {{frameStructure}}
- Icon Accessible: {{iconAccessible}}
- Home URL Valid: {{homeUrlValid}}
{{#if errors}}

## ❌ Errors:
{{errors}}
{{/if}}
{{#if warnings}}

## ⚠️ Warnings:
{{warnings}}
{{/if}}

## Next Steps:
{{#if valid}}
✅ Your manifest is valid! You can proceed with deployment.
{{else}}
❌ Please fix the errors above before deploying your Mini App.
{{/if}}
"#;

/// Manifest validator tool.
pub struct ValidateManifestTool;

impl ToolDefinition for ValidateManifestTool {
    const NAME: &'static str = "farcaster_validate_manifest";
    const DESCRIPTION: &'static str = "Validate a Farcaster Mini App manifest file for compliance";

    type Params = ValidateManifestParams;

    #[instrument(skip_all)]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        let report = validate(&params);
        info!(
            "Manifest validation finished: {} errors, {} warnings",
            report.errors.len(),
            report.warnings.len()
        );

        let checks = &report.checks;
        let text = Template::new(VALIDATE_REPORT)
            .flag("valid", report.is_valid())
            .var("manifestAccessible", mark(checks.manifest_accessible))
            .var("httpsRequired", mark(checks.https_required))
            .var("accountAssociation", mark(checks.account_association))
            .var("frameStructure", mark(checks.frame_structure))
            .var("iconAccessible", mark(checks.icon_accessible))
            .var("homeUrlValid", mark(checks.home_url_valid))
            .var("errors", bullet_list(&report.errors))
            .var("warnings", bullet_list(&report.warnings))
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
    fn test_generated_manifest_shape() {
        let text = run::<GenerateManifestTool>(json!({
            "name": "Demo",
            "homeUrl": "https://demo.app",
            "iconUrl": "https://demo.app/icon.png",
            "description": "A demo",
            "categories": ["games"]
        }));
        assert!(text.contains("\"buttonTitle\": \"Open App\""));
        assert!(text.contains("\"description\": \"A demo\""));
        assert!(text.contains("\"games\""));
        assert!(!text.contains("imageUrl"));
        assert!(text.contains("## Manifest Content (/.well-known/farcaster.json):"));
    }

    #[test]
    fn test_metadata_omitted_without_description() {
        let params: GenerateManifestParams = serde_json::from_value(json!({
            "name": "Demo",
            "homeUrl": "https://demo.app",
            "iconUrl": "https://demo.app/icon.png",
            "categories": ["games"]
        }))
        .unwrap();
        let value = serde_json::to_value(build_manifest(&params)).unwrap();
        assert!(value["frame"].get("metadata").is_none());
        assert_eq!(value["frame"]["name"], "Demo");
    }

    #[test]
    fn test_valid_manifest() {
        let manifest = json!({
            "accountAssociation": { "header": "h", "payload": "p", "signature": "s" },
            "frame": {
                "name": "Demo",
                "iconUrl": "https://demo.app/icon.png",
                "homeUrl": "https://demo.app"
            }
        });
        let text = run::<ValidateManifestTool>(json!({
            "manifestUrl": "https://demo.app/.well-known/farcaster.json",
            "manifestContent": manifest.to_string()
        }));
        assert!(text.contains("## Overall Status: ✅ VALID"));
        assert!(text.contains("- Home URL Valid: ✅"));
        assert!(!text.contains("## ❌ Errors:"));
    }

    #[test]
    fn test_wrong_path_and_missing_fields() {
        let report = validate(&ValidateManifestParams {
            manifest_url: Some("http://demo.app/manifest.json".into()),
            manifest_content: Some(json!({ "frame": { "name": "x" } }).to_string()),
        });
        assert!(!report.is_valid());
        assert!(!report.checks.https_required);
        assert!(report.errors.contains(&"Manifest must be served at /.well-known/farcaster.json".to_string()));
        assert!(report.errors.contains(&"Missing accountAssociation".to_string()));
        assert!(report.errors.contains(&"Missing frame.iconUrl".to_string()));
        assert!(report.errors.contains(&"Missing frame.homeUrl".to_string()));
    }

    #[test]
    fn test_invalid_json() {
        let report = validate(&ValidateManifestParams {
            manifest_url: None,
            manifest_content: Some("{not json".into()),
        });
        assert_eq!(report.errors, vec!["Invalid JSON format".to_string()]);
    }

    #[test]
    fn test_empty_input_warns() {
        let text = run::<ValidateManifestTool>(json!({}));
        assert!(text.contains("## ⚠️ Warnings:"));
        assert!(text.contains("nothing was checked"));
        assert!(text.contains("✅ VALID"));
    }
}
