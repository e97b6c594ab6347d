//! SDK initialization code generator.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::super::common::{Framework, default_true, success_result};
use super::super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Template, ToolError};

/// SDK capability to wire up at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SdkFeature {
    Auth,
    Wallet,
    Notifications,
    Navigation,
    Sharing,
}

impl SdkFeature {
    fn label(self) -> &'static str {
        match self {
            Self::Auth => "Auth",
            Self::Wallet => "Wallet",
            Self::Notifications => "Notifications",
            Self::Navigation => "Navigation",
            Self::Sharing => "Sharing",
        }
    }
}

/// Parameters for the SDK initialization tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InitializeSdkParams {
    /// Frontend framework.
    pub framework: Framework,

    /// SDK features to enable.
    #[serde(default = "default_features")]
    pub features: Vec<SdkFeature>,

    /// Automatically call sdk.actions.ready() when app loads.
    #[serde(default = "default_true")]
    pub auto_ready: bool,
}

fn default_features() -> Vec<SdkFeature> {
    vec![SdkFeature::Auth, SdkFeature::Wallet]
}

const REACT_INIT: &str = r#"import { SDK } from '@farcaster/miniapp-sdk';
import { useEffect, useState } from 'react';

// Initialize SDK
const sdk = new SDK();

// React hook for SDK
function useSDK() {
  const [isReady, setIsReady] = useState(false);
  const [error, setError] = useState<string | null>(null);

  useEffect(() => {
    const initSDK = async () => {
      try {
{{#if auth}}
        // Setup authentication
        sdk.on('auth', (authData) => {
          console.log('Auth state changed:', authData);
        });

{{/if}}
{{#if wallet}}
        // Setup wallet integration
        sdk.on('wallet', (walletData) => {
          console.log('Wallet state changed:', walletData);
        });

{{/if}}
{{#if notifications}}
        // Setup notifications
        sdk.on('notification', (notificationData) => {
          console.log('Notification received:', notificationData);
        });

{{/if}}
{{#if navigation}}
        // Handle the client back gesture
        sdk.on('back', () => {
          window.history.back();
        });

{{/if}}
{{#if autoReady}}
        // Signal app is ready
        await sdk.actions.ready();

{{/if}}
        setIsReady(true);
      } catch (err) {
        setError(err instanceof Error ? err.message : 'SDK initialization failed');
      }
    };

    initSDK();

    // Cleanup
    return () => {
      sdk.removeAllListeners();
    };
  }, []);

  return { sdk, isReady, error };
}"#;

const VUE_INIT: &str = r#"import { SDK } from '@farcaster/miniapp-sdk';
import { ref, onMounted, onUnmounted } from 'vue';

// Initialize SDK
const sdk = new SDK();

// Vue composable for SDK
export function useSDK() {
  const isReady = ref(false);
  const error = ref<string | null>(null);

  onMounted(async () => {
    try {
{{#if auth}}
      sdk.on('auth', (authData) => console.log('Auth state changed:', authData));
{{/if}}
{{#if wallet}}
      sdk.on('wallet', (walletData) => console.log('Wallet state changed:', walletData));
{{/if}}
{{#if notifications}}
      sdk.on('notification', (data) => console.log('Notification received:', data));
{{/if}}
{{#if navigation}}
      sdk.on('back', () => window.history.back());
{{/if}}
{{#if autoReady}}
      await sdk.actions.ready();
{{/if}}
      isReady.value = true;
    } catch (err) {
      error.value = err instanceof Error ? err.message : 'SDK initialization failed';
    }
  });

  onUnmounted(() => sdk.removeAllListeners());

  return { sdk, isReady, error };
}"#;

const VANILLA_INIT: &str = r#"import { SDK } from '@farcaster/miniapp-sdk';

// Initialize SDK
const sdk = new SDK();

// Vanilla JS SDK initialization
class FarcasterSDKManager {
  private sdk: SDK;
  private isReady: boolean = false;

  constructor() {
    this.sdk = sdk;
    this.initialize();
  }

  private async initialize() {
    try {
{{#if auth}}
      // Setup authentication
      this.sdk.on('auth', (authData) => {
        this.handleAuthChange(authData);
      });

{{/if}}
{{#if wallet}}
      // Setup wallet integration
      this.sdk.on('wallet', (walletData) => {
        this.handleWalletChange(walletData);
      });

{{/if}}
{{#if autoReady}}
      // Signal app is ready
      await this.sdk.actions.ready();

{{/if}}
      this.isReady = true;
      this.onReady();
    } catch (error) {
      this.onError(error);
    }
  }

  private handleAuthChange(authData: any) {
    console.log('Auth state changed:', authData);
    // Handle authentication changes
  }

  private handleWalletChange(walletData: any) {
    console.log('Wallet state changed:', walletData);
    // Handle wallet changes
  }

  private onReady() {
    console.log('SDK is ready');
    // App initialization complete
  }

  private onError(error: any) {
    console.error('SDK initialization failed:', error);
    // Handle initialization errors
  }

  public getSDK() {
    return this.sdk;
  }

  public isSDKReady() {
    return this.isReady;
  }
}

// Initialize SDK manager
const sdkManager = new FarcasterSDKManager();"#;

const REACT_USAGE: &str = r#"## Usage in React Component:
```tsx
function App() {
  const { sdk, isReady, error } = useSDK();

  if (error) {
    return <div>Error: {error}</div>;
  }

  if (!isReady) {
    return <div>Loading Mini App...</div>;
  }

  return (
    <div className="mini-app">
      <h1>My Farcaster Mini App</h1>
      {/* Your app content */}
    </div>
  );
}
```"#;

const VUE_USAGE: &str = r#"## Usage in Vue Component:
```vue
<script setup>
import { useSDK } from './useSDK';

const { isReady, error } = useSDK();
</script>

<template>
  <div v-if="error">Error: {{ error }}</div>
  <div v-else-if="!isReady">Loading Mini App...</div>
  <div v-else class="mini-app">
    <h1>My Farcaster Mini App</h1>
  </div>
</template>
```"#;

const VANILLA_USAGE: &str = r#"## Usage:
```javascript
// Wait for SDK to be ready
setTimeout(() => {
  if (sdkManager.isSDKReady()) {
    const sdk = sdkManager.getSDK();
    // Use SDK methods
  }
}, 100);
```"#;

const REPORT: &str = r#"# Farcaster SDK Initialization ({{framework}})

## Features Enabled:
{{features}}

## SDK Initialization Code:
```{{lang}}
{{init}}
```

{{usage}}

## SDK Methods Available:
```typescript
// Core actions
await sdk.actions.ready();           // Signal app is ready
await sdk.actions.close();           // Close the Mini App
await sdk.actions.openUrl(url);      // Open external URL
{{#if auth}}

// Authentication
await sdk.actions.signIn();          // Sign in with Farcaster
const user = sdk.context.user;       // Get current user
{{/if}}
{{#if wallet}}

// Wallet integration
const provider = sdk.wallet.provider; // Get EIP-1193 provider
{{/if}}
{{#if notifications}}

// Notifications
await sdk.actions.addMiniApp();      // Prompt user to enable notifications
{{/if}}
{{#if navigation}}

// Navigation
sdk.on('back', handleBack);          // Client back gesture
{{/if}}
{{#if sharing}}

// Sharing
await sdk.actions.composeCast({ text, embeds: [url] });
{{/if}}
```

## Error Handling:
```typescript
sdk.on('error', (error) => {
  console.error('SDK Error:', error);

  // Handle specific error types
  switch (error.code) {
    case 'INIT_FAILED':
      // SDK initialization failed
      break;
    case 'AUTH_FAILED':
      // Authentication failed
      break;
    case 'NETWORK_ERROR':
      // Network connection issue
      break;
    default:
      // Generic error handling
  }
});
```

## Best Practices:
- Always call `ready()` after app initialization
- Handle SDK errors gracefully
- Check SDK state before making calls
- Remove event listeners on cleanup
- Test in Farcaster client environment
"#;

/// SDK initialization tool.
pub struct InitializeSdkTool;

impl ToolDefinition for InitializeSdkTool {
    const NAME: &'static str = "farcaster_initialize_sdk";
    const DESCRIPTION: &'static str = "Generate Farcaster Mini App SDK initialization code";

    type Params = InitializeSdkParams;

    #[instrument(skip_all, fields(framework = params.framework.as_str()))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        info!("Generating SDK initialization code");

        let has = |feature| params.features.contains(&feature);
        let (init, usage, lang) = match params.framework {
            Framework::React | Framework::Next => (REACT_INIT, REACT_USAGE, "tsx"),
            Framework::Vue => (VUE_INIT, VUE_USAGE, "typescript"),
            Framework::Vanilla => (VANILLA_INIT, VANILLA_USAGE, "typescript"),
        };

        let bind = |source: &'static str| {
            Template::new(source)
                .flag("auth", has(SdkFeature::Auth))
                .flag("wallet", has(SdkFeature::Wallet))
                .flag("notifications", has(SdkFeature::Notifications))
                .flag("navigation", has(SdkFeature::Navigation))
                .flag("sharing", has(SdkFeature::Sharing))
                .flag("autoReady", params.auto_ready)
        };

        let features = params
            .features
            .iter()
            .map(|f| format!("✅ {}", f.label()))
            .collect::<Vec<_>>()
            .join("\n");

        let text = bind(REPORT)
            .var("framework", params.framework.as_str())
            .var("features", features)
            .var("lang", lang)
            .var("init", bind(init).render()?)
            .var("usage", usage)
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
    fn test_react_defaults() {
        let text = run::<InitializeSdkTool>(json!({ "framework": "react" }));
        assert!(text.starts_with("# Farcaster SDK Initialization (react)"));
        assert!(text.contains("✅ Auth\n✅ Wallet"));
        assert!(text.contains("function useSDK()"));
        assert!(text.contains("await sdk.actions.ready();\n\n        setIsReady(true);"));
        assert!(!text.contains("// Notifications\n"));
    }

    #[test]
    fn test_vanilla_without_auto_ready() {
        let text = run::<InitializeSdkTool>(json!({
            "framework": "vanilla",
            "features": ["notifications", "sharing"],
            "autoReady": false
        }));
        assert!(text.contains("class FarcasterSDKManager"));
        assert!(!text.contains("await this.sdk.actions.ready();"));
        assert!(text.contains("sdk.actions.composeCast"));
        assert!(!text.contains("this.sdk.on('auth'"));
    }

    #[test]
    fn test_vue_composable() {
        let text = run::<InitializeSdkTool>(json!({ "framework": "vue" }));
        assert!(text.contains("export function useSDK()"));
        assert!(text.contains("{{ error }}"));
    }
}
