//! SDK lifecycle event handler generator.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::super::common::{default_true, success_result};
use super::super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Template, ToolError};

/// Event emitted by the Mini App SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SdkEvent {
    Ready,
    Close,
    Back,
    Share,
    Notification,
}

impl SdkEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Close => "close",
            Self::Back => "back",
            Self::Share => "share",
            Self::Notification => "notification",
        }
    }
}

/// Parameters for the SDK events tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HandleSdkEventsParams {
    /// SDK events to handle.
    #[serde(default = "default_events")]
    pub events: Vec<SdkEvent>,

    /// Include error handling for failed SDK calls.
    #[serde(default = "default_true")]
    pub include_error_handling: bool,
}

fn default_events() -> Vec<SdkEvent> {
    vec![SdkEvent::Ready, SdkEvent::Close, SdkEvent::Back]
}

const HANDLERS: &str = r#"import sdk from '@farcaster/miniapp-sdk';

type Unsubscribe = () => void;

export function registerSdkEvents(): Unsubscribe {
  const subscriptions: Unsubscribe[] = [];

  const on = (event: string, handler: (payload?: any) => void | Promise<void>) => {
{{#if errorHandling}}
    const safeHandler = async (payload?: any) => {
      try {
        await handler(payload);
      } catch (error) {
        reportSdkError(event, error);
      }
    };
    sdk.on(event as any, safeHandler);
    subscriptions.push(() => sdk.off(event as any, safeHandler));
{{else}}
    sdk.on(event as any, handler);
    subscriptions.push(() => sdk.off(event as any, handler));
{{/if}}
  };
{{#if ready}}

  // Fired once the host has rendered the app
  on('ready', () => {
    document.body.classList.add('sdk-ready');
    window.dispatchEvent(new CustomEvent('miniapp:ready'));
  });
{{/if}}
{{#if close}}

  // Persist state before the host closes the app
  on('close', () => {
    sessionStorage.setItem('miniapp:lastRoute', window.location.pathname);
    window.dispatchEvent(new CustomEvent('miniapp:close'));
  });
{{/if}}
{{#if back}}

  // Client back gesture or button
  on('back', () => {
    if (window.history.length > 1) {
      window.history.back();
    } else {
      sdk.actions.close();
    }
  });
{{/if}}
{{#if share}}

  // Content shared into the app
  on('share', (payload) => {
    window.dispatchEvent(new CustomEvent('miniapp:share', { detail: payload }));
  });
{{/if}}
{{#if notification}}

  // Notification opened or notification settings changed
  on('notification', (payload) => {
    if (payload?.targetUrl) {
      window.history.pushState({}, '', new URL(payload.targetUrl).pathname);
    }
    window.dispatchEvent(new CustomEvent('miniapp:notification', { detail: payload }));
  });
{{/if}}

  return () => subscriptions.forEach((unsubscribe) => unsubscribe());
}
{{#if errorHandling}}

function reportSdkError(event: string, error: unknown) {
  const message = error instanceof Error ? error.message : String(error);
  console.error(`[sdk:${event}]`, message);
  window.dispatchEvent(
    new CustomEvent('miniapp:error', { detail: { event, message } })
  );
}
{{/if}}"#;

const REPORT: &str = r#"# SDK Event Handling

## Events Handled:
{{events}}

## Event Registration:
```typescript
{{handlers}}
```

## Usage in React:
```tsx
import { useEffect } from 'react';
import { registerSdkEvents } from './sdkEvents';

function App() {
  useEffect(() => registerSdkEvents(), []);

  return <main>{/* app content */}</main>;
}
```

## Listening to App Events:
```typescript
window.addEventListener('miniapp:ready', () => {
  // Start fetching data that depends on the host
});
```

## Best Practices:
- Register handlers once, as early as possible
- Always unsubscribe on unmount
- Keep handlers fast: the host may be waiting on them
{{#if errorHandling}}
- Route handler failures through a single error reporter
{{/if}}
"#;

/// SDK events tool.
pub struct HandleSdkEventsTool;

impl ToolDefinition for HandleSdkEventsTool {
    const NAME: &'static str = "farcaster_handle_sdk_events";
    const DESCRIPTION: &'static str = "Generate SDK event handling code for Mini App lifecycle";

    type Params = HandleSdkEventsParams;

    #[instrument(skip_all, fields(events = params.events.len()))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        info!("Generating SDK event handlers");

        let has = |event| params.events.contains(&event);
        let handlers = Template::new(HANDLERS)
            .flag("ready", has(SdkEvent::Ready))
            .flag("close", has(SdkEvent::Close))
            .flag("back", has(SdkEvent::Back))
            .flag("share", has(SdkEvent::Share))
            .flag("notification", has(SdkEvent::Notification))
            .flag("errorHandling", params.include_error_handling)
            .render()?;

        let events = params
            .events
            .iter()
            .map(|e| format!("- `{}`", e.as_str()))
            .collect::<Vec<_>>()
            .join("\n");

        let text = Template::new(REPORT)
            .var("events", events)
            .var("handlers", handlers)
            .flag("errorHandling", params.include_error_handling)
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
    fn test_default_events() {
        let text = run::<HandleSdkEventsTool>(json!({}));
        assert!(text.contains("- `ready`\n- `close`\n- `back`"));
        assert!(text.contains("on('back'"));
        assert!(!text.contains("on('share'"));
        assert!(text.contains("function reportSdkError"));
    }

    #[test]
    fn test_without_error_handling() {
        let text = run::<HandleSdkEventsTool>(json!({
            "events": ["notification"],
            "includeErrorHandling": false
        }));
        assert!(text.contains("on('notification'"));
        assert!(text.contains("sdk.on(event as any, handler);"));
        assert!(!text.contains("reportSdkError"));
    }
}
