//! Analytics setup generator.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::super::common::{bullet_list, default_true, mark, string_union, success_result};
use super::super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Template, ToolError};

/// Analytics backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AnalyticsProvider {
    FarcasterNative,
    GoogleAnalytics,
    Mixpanel,
    Posthog,
    Custom,
}

impl AnalyticsProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FarcasterNative => "farcaster-native",
            Self::GoogleAnalytics => "google-analytics",
            Self::Mixpanel => "mixpanel",
            Self::Posthog => "posthog",
            Self::Custom => "custom",
        }
    }

    fn client(self) -> &'static str {
        match self {
            Self::FarcasterNative => FARCASTER_NATIVE,
            Self::GoogleAnalytics => GOOGLE_ANALYTICS,
            Self::Mixpanel => MIXPANEL,
            Self::Posthog => POSTHOG,
            Self::Custom => CUSTOM,
        }
    }

    fn install(self) -> Option<&'static str> {
        match self {
            Self::Mixpanel => Some("npm install mixpanel-browser"),
            Self::Posthog => Some("npm install posthog-js"),
            Self::FarcasterNative | Self::GoogleAnalytics | Self::Custom => None,
        }
    }
}

/// Product event to track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TrackingEvent {
    AppOpen,
    UserAuth,
    WalletConnect,
    Transaction,
    Share,
    Error,
}

impl TrackingEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AppOpen => "app-open",
            Self::UserAuth => "user-auth",
            Self::WalletConnect => "wallet-connect",
            Self::Transaction => "transaction",
            Self::Share => "share",
            Self::Error => "error",
        }
    }

    fn snippet(self) -> &'static str {
        match self {
            Self::AppOpen => {
                "// After sdk.actions.ready()\nconst context = await sdk.context;\ntrack('app-open', { location: context?.location?.type ?? 'unknown' });"
            }
            Self::UserAuth => "// After a successful sign in\ntrack('user-auth', { method: 'siwf' });",
            Self::WalletConnect => {
                "// In a wagmi useAccount effect\ntrack('wallet-connect', { connector: connector?.name, chainId });"
            }
            Self::Transaction => {
                "// When a transaction is confirmed\ntrack('transaction', { chainId, status: receipt.status });"
            }
            Self::Share => "// After composeCast resolves\ntrack('share', { context: 'cast' });",
            Self::Error => {
                "// Global error handler\nwindow.addEventListener('error', (e) => track('error', { message: e.message }));"
            }
        }
    }
}

/// Parameters for the analytics tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetupAnalyticsParams {
    /// Analytics provider to use.
    pub analytics_provider: AnalyticsProvider,

    /// Events to track.
    #[serde(default = "default_events")]
    pub tracking_events: Vec<TrackingEvent>,

    /// Ensure privacy compliance.
    #[serde(default = "default_true")]
    pub privacy_compliant: bool,
}

fn default_events() -> Vec<TrackingEvent> {
    vec![
        TrackingEvent::AppOpen,
        TrackingEvent::UserAuth,
        TrackingEvent::WalletConnect,
    ]
}

const FARCASTER_NATIVE: &str = r#"// Client analytics collected by your own endpoint, keyed by Farcaster context
const ENDPOINT = '/api/analytics';

function send(event: string, properties: Record<string, unknown>) {
  navigator.sendBeacon(ENDPOINT, JSON.stringify({ event, properties, timestamp: Date.now() }));
}"#;

const GOOGLE_ANALYTICS: &str = r#"// Load gtag.js in index.html with your measurement ID first
declare const gtag: (...args: unknown[]) => void;

function send(event: string, properties: Record<string, unknown>) {
  gtag('event', event.replace(/-/g, '_'), properties);
}"#;

const MIXPANEL: &str = r#"import mixpanel from 'mixpanel-browser';

mixpanel.init(import.meta.env.VITE_MIXPANEL_TOKEN);

function send(event: string, properties: Record<string, unknown>) {
  mixpanel.track(event, properties);
}"#;

const POSTHOG: &str = r#"import posthog from 'posthog-js';

posthog.init(import.meta.env.VITE_POSTHOG_KEY, {
  api_host: 'https://us.i.posthog.com',
  autocapture: false,
});

function send(event: string, properties: Record<string, unknown>) {
  posthog.capture(event, properties);
}"#;

const CUSTOM: &str = r#"// Replace with your own transport
function send(event: string, properties: Record<string, unknown>) {
  fetch(import.meta.env.VITE_ANALYTICS_URL, {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({ event, properties, timestamp: Date.now() }),
    keepalive: true,
  });
}"#;

const TRACKER: &str = r#"// src/analytics.ts
{{client}}

export type TrackedEvent = {{eventUnion}};
{{#if privacy}}

const CONSENT_KEY = 'analytics-consent';

export function setAnalyticsConsent(granted: boolean) {
  localStorage.setItem(CONSENT_KEY, granted ? 'granted' : 'denied');
}

function hasConsent(): boolean {
  return (
    navigator.doNotTrack !== '1' &&
    localStorage.getItem(CONSENT_KEY) === 'granted'
  );
}

// Drop fields that identify a person or wallet
function scrub(properties: Record<string, unknown>) {
  const { fid, address, username, ...rest } = properties;
  return rest;
}
{{/if}}

export function track(event: TrackedEvent, properties: Record<string, unknown> = {}) {
{{#if privacy}}
  if (!hasConsent()) return;
  send(event, scrub(properties));
{{else}}
  send(event, properties);
{{/if}}
}"#;

const REPORT: &str = r#"# Analytics Setup ({{provider}})

## Tracked Events:
{{events}}
{{#if install}}

## Install:
```bash
{{install}}
```
{{/if}}

## Analytics Client:
```typescript
{{tracker}}
```

## Instrumentation:
```typescript
{{snippets}}
```

## Configuration:
{{privacyMark}} Privacy compliance
{{#if privacy}}

## Privacy Notes:
- Events are only sent after the user grants consent
- FIDs, usernames and wallet addresses are stripped before sending
- Respect Do Not Track and document collection in your privacy policy
{{/if}}
"#;

/// Analytics tool.
pub struct SetupAnalyticsTool;

impl ToolDefinition for SetupAnalyticsTool {
    const NAME: &'static str = "farcaster_setup_analytics";
    const DESCRIPTION: &'static str = "Setup analytics and monitoring for Mini App usage";

    type Params = SetupAnalyticsParams;

    #[instrument(skip_all, fields(provider = params.analytics_provider.as_str()))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        info!("Generating analytics setup");

        let provider = params.analytics_provider;
        let event_union = string_union(params.tracking_events.iter().map(|t| t.as_str()));

        let tracker = Template::new(TRACKER)
            .var("client", provider.client())
            .var("eventUnion", event_union)
            .flag("privacy", params.privacy_compliant)
            .render()?;

        let snippets = params
            .tracking_events
            .iter()
            .map(|e| e.snippet())
            .collect::<Vec<_>>()
            .join("\n\n");

        let text = Template::new(REPORT)
            .var("provider", provider.as_str())
            .var("events", bullet_list(params.tracking_events.iter().map(|e| e.as_str())))
            .var("install", provider.install().unwrap_or_default())
            .var("tracker", tracker)
            .var("snippets", snippets)
            .var("privacyMark", mark(params.privacy_compliant))
            .flag("privacy", params.privacy_compliant)
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
    fn test_posthog_defaults() {
        let text = run::<SetupAnalyticsTool>(json!({ "analyticsProvider": "posthog" }));
        assert!(text.starts_with("# Analytics Setup (posthog)"));
        assert!(text.contains("npm install posthog-js"));
        assert!(text.contains("export type TrackedEvent = 'app-open' | 'user-auth' | 'wallet-connect';"));
        assert!(text.contains("if (!hasConsent()) return;"));
        assert!(text.contains("track('wallet-connect'"));
        assert!(!text.contains("track('transaction'"));
    }

    #[test]
    fn test_ga_without_privacy() {
        let text = run::<SetupAnalyticsTool>(json!({
            "analyticsProvider": "google-analytics",
            "trackingEvents": ["error"],
            "privacyCompliant": false
        }));
        assert!(!text.contains("## Install:"));
        assert!(text.contains("gtag('event'"));
        assert!(text.contains("  send(event, properties);"));
        assert!(!text.contains("hasConsent"));
        assert!(text.contains("❌ Privacy compliance"));
    }
}
