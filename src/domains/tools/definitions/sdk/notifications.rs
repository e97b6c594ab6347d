//! Notification system generator.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::super::common::{bullet_list, default_true, mark, string_union, success_result};
use super::super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Template, ToolError};

/// Minimum spacing between two notifications to the same token.
pub const NOTIFICATION_INTERVAL_SECS: u32 = 30;

/// Maximum notifications per token per day.
pub const NOTIFICATION_DAILY_LIMIT: u32 = 100;

/// Kind of notification the app sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationType {
    System,
    UserAction,
    Reminder,
    Update,
}

impl NotificationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::UserAction => "user-action",
            Self::Reminder => "reminder",
            Self::Update => "update",
        }
    }

    fn sample(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::System => ("Maintenance complete", "Everything is back online.", "/status"),
            Self::UserAction => ("Someone replied", "You have a new reply waiting.", "/activity"),
            Self::Reminder => ("Daily check-in", "Your streak ends in 2 hours.", "/"),
            Self::Update => ("New feature", "Tap to see what changed.", "/changelog"),
        }
    }
}

/// Parameters for the notifications tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImplementNotificationsParams {
    /// Types of notifications to support.
    #[serde(default = "default_types")]
    pub notification_types: Vec<NotificationType>,

    /// Include rate limiting logic (1 per 30s, 100 per day).
    #[serde(default = "default_true")]
    pub rate_limiting: bool,

    /// Include notification token management.
    #[serde(default = "default_true")]
    pub token_management: bool,
}

fn default_types() -> Vec<NotificationType> {
    vec![NotificationType::UserAction, NotificationType::Reminder]
}

const CLIENT_CODE: &str = r#"import sdk from '@farcaster/miniapp-sdk';

// Ask the user to add the app, which enables notifications
export async function enableNotifications(): Promise<boolean> {
  try {
    const result = await sdk.actions.addMiniApp();
    return Boolean(result?.notificationDetails);
  } catch (error) {
    console.warn('User declined notifications:', error);
    return false;
  }
}"#;

const SERVER_CODE: &str = r#"// server/notifications.ts
export type NotificationType = {{typeUnion}};

interface NotificationDetails {
  url: string;
  token: string;
}
{{#if tokenManagement}}

// Token storage keyed by FID. Replace the Map with your database.
const tokens = new Map<number, NotificationDetails>();

// Webhook called by Farcaster clients when users add or remove the app
export async function handleWebhook(event: any) {
  const { fid } = event;

  switch (event.event) {
    case 'miniapp_added':
    case 'notifications_enabled':
      if (event.notificationDetails) {
        tokens.set(fid, event.notificationDetails);
      }
      break;
    case 'miniapp_removed':
    case 'notifications_disabled':
      tokens.delete(fid);
      break;
  }
}
{{/if}}
{{#if rateLimiting}}

const INTERVAL_MS = {{intervalSecs}} * 1000;
const DAILY_LIMIT = {{dailyLimit}};
const history = new Map<string, number[]>();

function allowNotification(token: string, now = Date.now()): boolean {
  const dayAgo = now - 24 * 60 * 60 * 1000;
  const sent = (history.get(token) ?? []).filter((t) => t > dayAgo);

  if (sent.length >= DAILY_LIMIT) return false;
  if (sent.length > 0 && now - sent[sent.length - 1] < INTERVAL_MS) return false;

  sent.push(now);
  history.set(token, sent);
  return true;
}
{{/if}}

export async function sendNotification(
  details: NotificationDetails,
  type: NotificationType,
  title: string,
  body: string,
  targetUrl: string
) {
{{#if rateLimiting}}
  if (!allowNotification(details.token)) {
    return { state: 'rate_limited' as const };
  }

{{/if}}
  const response = await fetch(details.url, {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({
      notificationId: `${type}-${Date.now()}`,
      title,
      body,
      targetUrl,
      tokens: [details.token],
    }),
  });

  if (!response.ok) {
    return { state: 'error' as const, status: response.status };
  }

  const result = await response.json();
{{#if tokenManagement}}
  if (result.result?.invalidTokens?.includes(details.token)) {
    for (const [fid, stored] of tokens) {
      if (stored.token === details.token) tokens.delete(fid);
    }
  }
{{/if}}
  return { state: 'success' as const, result };
}"#;

const REPORT: &str = r#"# Mini App Notifications

## Notification Types:
{{types}}

## Client: Enable Notifications
```typescript
{{client}}
```

## Server: Send Notifications
```typescript
{{server}}
```

## Example Payloads:
```typescript
{{samples}}
```

## Configuration:
{{rateMark}} Rate limiting (1 per {{intervalSecs}}s, {{dailyLimit}} per day per token)
{{tokenMark}} Token management via webhook

## Manifest Webhook:
```json
{
  "miniapp": {
    "webhookUrl": "https://your-app.com/api/webhook"
  }
}
```

## Best Practices:
- Only send notifications users asked for
- Keep titles under 32 characters and bodies under 128
- Use a stable notificationId to deduplicate retries
- Point targetUrl at a page on your app domain
"#;

/// Notifications tool.
pub struct ImplementNotificationsTool;

impl ToolDefinition for ImplementNotificationsTool {
    const NAME: &'static str = "farcaster_implement_notifications";
    const DESCRIPTION: &'static str = "Implement notification system for Mini Apps";

    type Params = ImplementNotificationsParams;

    #[instrument(skip_all, fields(types = params.notification_types.len()))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        info!("Generating notification system");

        let type_union = string_union(params.notification_types.iter().map(|t| t.as_str()));

        let server = Template::new(SERVER_CODE)
            .var("typeUnion", type_union)
            .var("intervalSecs", NOTIFICATION_INTERVAL_SECS.to_string())
            .var("dailyLimit", NOTIFICATION_DAILY_LIMIT.to_string())
            .flag("rateLimiting", params.rate_limiting)
            .flag("tokenManagement", params.token_management)
            .render()?;

        let types = bullet_list(params.notification_types.iter().map(|t| t.as_str()));

        let samples = params
            .notification_types
            .iter()
            .map(|t| {
                let (title, body, target) = t.sample();
                format!(
                    "await sendNotification(details, '{}', '{}', '{}', 'https://your-app.com{}');",
                    t.as_str(),
                    title,
                    body,
                    target
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let text = Template::new(REPORT)
            .var("types", types)
            .var("client", CLIENT_CODE)
            .var("server", server)
            .var("samples", samples)
            .var("rateMark", mark(params.rate_limiting))
            .var("tokenMark", mark(params.token_management))
            .var("intervalSecs", NOTIFICATION_INTERVAL_SECS.to_string())
            .var("dailyLimit", NOTIFICATION_DAILY_LIMIT.to_string())
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
    fn test_defaults_include_rate_limits() {
        let text = run::<ImplementNotificationsTool>(json!({}));
        assert!(text.contains("export type NotificationType = 'user-action' | 'reminder';"));
        assert!(text.contains("const INTERVAL_MS = 30 * 1000;"));
        assert!(text.contains("const DAILY_LIMIT = 100;"));
        assert!(text.contains("✅ Rate limiting (1 per 30s, 100 per day per token)"));
        assert!(text.contains("export async function handleWebhook"));
    }

    #[test]
    fn test_without_rate_limiting_or_tokens() {
        let text = run::<ImplementNotificationsTool>(json!({
            "notificationTypes": ["system"],
            "rateLimiting": false,
            "tokenManagement": false
        }));
        assert!(!text.contains("allowNotification"));
        assert!(!text.contains("handleWebhook"));
        assert!(text.contains("❌ Token management"));
        assert!(text.contains("'system', 'Maintenance complete'"));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let err = ImplementNotificationsTool::parse(
            crate::domains::tools::definitions::test_support::args(json!({
                "notificationTypes": ["marketing"]
            })),
        )
        .unwrap_err();
        assert!(err.to_string().contains("farcaster_implement_notifications"));
    }
}
