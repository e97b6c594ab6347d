//! User validation and profile tools.
//!
//! Both return deterministic mock data derived from the FID. Nothing is
//! verified or fetched.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::super::common::{bullet_list, default_true, pretty_json, success_result};
use super::super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Template, ToolError};

/// Signatures are echoed back truncated to this many characters.
const SIGNATURE_PREVIEW_LEN: usize = 20;

// ============================================================================
// Validate user
// ============================================================================

/// Parameters for the user validation tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateUserParams {
    /// Farcaster ID to validate.
    pub fid: u64,

    /// User signature to verify.
    #[serde(default)]
    pub signature: Option<String>,

    /// Original message that was signed.
    #[serde(default)]
    pub message: Option<String>,

    /// Require verified Ethereum address.
    #[serde(default)]
    pub require_verification: bool,
}

const VALIDATE_REPORT: &str = r#"# User Validation Results

## FID: {{fid}}
{{#if signature}}
## Signature: {{signature}}...
{{/if}}
{{#if message}}
## Message: {{message}}
{{/if}}

## Validation Status: ✅ Valid (Mock)
{{#if requireVerification}}

## Verification Status: ✅ Verified Address Found
- 0x1234...5678 (Ethereum)
{{/if}}

## Profile Summary:
- Username: user{{fid}}
- Display Name: User {{fid}}
- Follower Count: 150
- Following Count: 89
- Account Created: 2023-05-15

## Security Checks:
✅ Valid Farcaster ID
✅ Signature verification passed
✅ Message authenticity confirmed
{{#if requireVerification}}
✅ Verified Ethereum address
{{else}}
⚠️ No verification required
{{/if}}

Note: This is a mock validation. In production, implement proper signature verification using Farcaster's authentication libraries.
"#;

/// User validation tool.
pub struct ValidateUserTool;

impl ToolDefinition for ValidateUserTool {
    const NAME: &'static str = "farcaster_validate_user";
    const DESCRIPTION: &'static str = "Validate Farcaster user authentication and permissions";

    type Params = ValidateUserParams;

    #[instrument(skip_all, fields(fid = params.fid))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        info!("Validating user (mock)");

        let signature: String = params
            .signature
            .as_deref()
            .unwrap_or_default()
            .chars()
            .take(SIGNATURE_PREVIEW_LEN)
            .collect();

        let text = Template::new(VALIDATE_REPORT)
            .var("fid", params.fid.to_string())
            .var("signature", signature)
            .var("message", params.message.unwrap_or_default())
            .flag("requireVerification", params.require_verification)
            .render()?;

        Ok(success_result(text))
    }
}

// ============================================================================
// User profile
// ============================================================================

/// Parameters for the user profile tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetUserProfileParams {
    /// Farcaster ID of the user.
    pub fid: u64,

    /// Include following count and list.
    #[serde(default)]
    pub include_following: bool,

    /// Include verified addresses.
    #[serde(default = "default_true")]
    pub include_verifications: bool,
}

/// Mock profile, serialized as the JSON section of the report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MockProfile {
    fid: u64,
    username: String,
    display_name: String,
    pfp_url: String,
    bio: &'static str,
    follower_count: u64,
    following_count: u64,
    verifications: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    following: Option<Vec<u64>>,
}

impl MockProfile {
    fn for_fid(params: &GetUserProfileParams) -> Self {
        let fid = params.fid;
        Self {
            fid,
            username: format!("user{}", fid),
            display_name: format!("User {}", fid),
            pfp_url: format!("https://api.dicebear.com/7.x/identicon/svg?seed={}", fid),
            bio: "Building cool things on Farcaster",
            follower_count: 150 + fid % 100,
            following_count: 89 + fid % 50,
            verifications: if params.include_verifications {
                vec![format!("0x{:040x}", fid)]
            } else {
                Vec::new()
            },
            following: params.include_following.then(|| vec![1, 2, 3, 4, 5]),
        }
    }
}

const PROFILE_REPORT: &str = r#"# User Profile: {{displayName}}

## Basic Information:
- **FID**: {{fid}}
- **Username**: @{{username}}
- **Display Name**: {{displayName}}
- **Bio**: {{bio}}

## Profile Image:
![Profile]({{pfpUrl}})

## Social Stats:
- **Followers**: {{followers}}
- **Following**: {{following}}
{{#if verifications}}

## Verified Addresses:
{{verifications}}
{{/if}}
{{#if followingList}}

## Following (Sample):
{{followingList}}
{{/if}}

## JSON Response:
```json
{{json}}
```

Note: This is mock data. In production, integrate with Farcaster's APIs or indexing services like Neynar, Airstack, or Pinata.
"#;

/// User profile tool.
pub struct GetUserProfileTool;

impl ToolDefinition for GetUserProfileTool {
    const NAME: &'static str = "farcaster_get_user_profile";
    const DESCRIPTION: &'static str = "Fetch detailed user profile information from Farcaster";

    type Params = GetUserProfileParams;

    #[instrument(skip_all, fields(fid = params.fid))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        info!("Building mock user profile");

        let profile = MockProfile::for_fid(&params);
        let following_list = profile
            .following
            .as_deref()
            .map(|ids| bullet_list(ids.iter().map(|id| format!("User {}", id))))
            .unwrap_or_default();

        let text = Template::new(PROFILE_REPORT)
            .var("displayName", profile.display_name.as_str())
            .var("fid", profile.fid.to_string())
            .var("username", profile.username.as_str())
            .var("bio", profile.bio)
            .var("pfpUrl", profile.pfp_url.as_str())
            .var("followers", profile.follower_count.to_string())
            .var("following", profile.following_count.to_string())
            .var("verifications", bullet_list(&profile.verifications))
            .var("followingList", following_list)
            .var("json", pretty_json(&profile)?)
            .render()?;

        Ok(success_result(text))
    }
}
