//! Project scaffolding tool.
//!
//! Produces a complete starter project: package.json, index.html, the React
//! entry point and root component, a stylesheet and the Vite config.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tracing::{info, instrument};

use super::super::common::{Framework, default_true, pretty_json, success_result};
use super::super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Template, ToolError};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the project scaffolding tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMiniAppParams {
    /// Name of the Mini App project.
    pub name: String,

    /// Home URL where the app will be hosted.
    pub home_url: String,

    /// Frontend framework to use.
    #[serde(default)]
    pub framework: Framework,

    /// Include wallet integration setup.
    #[serde(default = "default_true")]
    pub include_wallet: bool,

    /// Include authentication setup.
    #[serde(default = "default_true")]
    pub include_auth: bool,
}

// ============================================================================
// package.json
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PackageJson {
    name: String,
    version: &'static str,
    description: String,
    main: &'static str,
    scripts: Scripts,
    dependencies: Dependencies,
    dev_dependencies: Dependencies,
}

/// Package versions keyed by name, serialized in insertion order.
#[derive(Debug, Default)]
struct Dependencies(Vec<(&'static str, &'static str)>);

impl Dependencies {
    fn add(&mut self, name: &'static str, version: &'static str) {
        self.0.push((name, version));
    }
}

impl Serialize for Dependencies {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, version) in &self.0 {
            map.serialize_entry(name, version)?;
        }
        map.end()
    }
}

#[derive(Debug, Serialize)]
struct Scripts {
    dev: &'static str,
    build: &'static str,
    start: &'static str,
    lint: &'static str,
    test: &'static str,
}

/// Lower-case the name and replace each whitespace run with `-`.
///
/// Leading and trailing runs are replaced too, not trimmed.
fn package_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('-');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

fn package_json(params: &CreateMiniAppParams) -> PackageJson {
    let next = params.framework == Framework::Next;

    let mut dependencies = Dependencies::default();
    dependencies.add("@farcaster/miniapp-sdk", "^0.1.0");
    if params.include_wallet {
        dependencies.add("wagmi", "^2.0.0");
        dependencies.add("@tanstack/react-query", "^5.0.0");
    }
    match params.framework {
        Framework::React => {
            dependencies.add("react", "^18.0.0");
            dependencies.add("react-dom", "^18.0.0");
        }
        Framework::Next => {
            dependencies.add("next", "^14.0.0");
            dependencies.add("react", "^18.0.0");
            dependencies.add("react-dom", "^18.0.0");
        }
        Framework::Vue => {
            dependencies.add("vue", "^3.0.0");
        }
        Framework::Vanilla => {}
    }

    let dev_dependencies = Dependencies(vec![
        ("@types/react", "^18.0.0"),
        ("@types/react-dom", "^18.0.0"),
        ("typescript", "^5.0.0"),
        ("vite", "^5.0.0"),
        ("@vitejs/plugin-react", "^4.0.0"),
        ("eslint", "^8.0.0"),
        ("prettier", "^3.0.0"),
    ]);

    PackageJson {
        name: package_name(&params.name),
        version: "0.1.0",
        description: format!("Farcaster Mini App: {}", params.name),
        main: "index.js",
        scripts: Scripts {
            dev: if next { "next dev" } else { "vite dev" },
            build: if next { "next build" } else { "vite build" },
            start: if next { "next start" } else { "serve dist" },
            lint: "eslint src --ext .ts,.tsx,.js,.jsx",
            test: "jest",
        },
        dependencies,
        dev_dependencies,
    }
}

// ============================================================================
// Templates
// ============================================================================

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{{name}}</title>

    <!-- Mini App metadata -->
    <meta property="fc:frame" content="vNext" />
    <meta property="fc:frame:image" content="{{homeUrl}}/preview.png" />
    <meta property="fc:frame:button:1" content="Open {{name}}" />
    <meta property="fc:frame:button:1:action" content="link" />
    <meta property="fc:frame:button:1:target" content="{{homeUrl}}" />
  </head>
  <body>
    <div id="root"></div>
    <script type="module" src="/src/main.tsx"></script>
  </body>
</html>"#;

const MAIN_TSX: &str = r#"import React from 'react';
import ReactDOM from 'react-dom/client';
import { SDK } from '@farcaster/miniapp-sdk';
{{#if wallet}}
import { WagmiProvider } from 'wagmi';
import { QueryClient, QueryClientProvider } from '@tanstack/react-query';
import { config } from './config/wagmi';
{{/if}}
import App from './App';
import './index.css';

const sdk = new SDK();
{{#if wallet}}
const queryClient = new QueryClient();
{{/if}}

// Initialize Mini App
sdk.actions.ready();

ReactDOM.createRoot(document.getElementById('root')!).render(
  <React.StrictMode>
{{#if wallet}}
    <WagmiProvider config={config}>
      <QueryClientProvider client={queryClient}>
        <App sdk={sdk} />
      </QueryClientProvider>
    </WagmiProvider>
{{else}}
    <App sdk={sdk} />
{{/if}}
  </React.StrictMode>
);"#;

const APP_TSX: &str = r#"import React, { useEffect, useState } from 'react';
{{#if wallet}}
import { useAccount, useConnect, useDisconnect } from 'wagmi';
{{/if}}
import { SDK } from '@farcaster/miniapp-sdk';

interface AppProps {
  sdk: SDK;
}

function App({ sdk }: AppProps) {
{{#if auth}}
  const [user, setUser] = useState<any>(null);
{{/if}}
{{#if wallet}}
  const { isConnected, address } = useAccount();
  const { connect, connectors } = useConnect();
  const { disconnect } = useDisconnect();
{{/if}}

  useEffect(() => {
    // Handle SDK events
    sdk.on('ready', () => {
      console.log('Mini App is ready');
    });
{{#if auth}}

    // Auto sign-in
    const handleAuth = async () => {
      try {
        const userData = await sdk.actions.signIn();
        setUser(userData);
      } catch (error) {
        console.error('Auth failed:', error);
      }
    };

    handleAuth();
{{/if}}
  }, [sdk]);

  return (
    <div className="app">
      <header className="app-header">
        <h1>{{name}}</h1>
{{#if auth}}
        {user && <p>Welcome, {user.displayName}!</p>}
{{/if}}
      </header>

      <main className="app-main">
{{#if wallet}}
        <div className="wallet-section">
          {isConnected ? (
            <div>
              <p>Connected: {address}</p>
              <button onClick={() => disconnect()}>Disconnect</button>
            </div>
          ) : (
            <button onClick={() => connect({ connector: connectors[0] })}>
              Connect Wallet
            </button>
          )}
        </div>
{{/if}}

        <div className="content">
          <p>Your Mini App content goes here!</p>
        </div>
      </main>
    </div>
  );
}

export default App;"#;

const INDEX_CSS: &str = r#"body {
  margin: 0;
  padding: 0;
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', sans-serif;
  background-color: #f5f5f5;
}

.app {
  min-height: 100vh;
  max-width: 420px;
  margin: 0 auto;
  background: white;
}

.app-header {
  padding: 20px;
  border-bottom: 1px solid #eee;
  text-align: center;
}

.app-header h1 {
  margin: 0;
  color: #333;
}

.app-main {
  padding: 20px;
}

.wallet-section {
  margin-bottom: 20px;
  padding: 15px;
  background: #f9f9f9;
  border-radius: 8px;
}

.wallet-section button {
  background: #7c65c1;
  color: white;
  border: none;
  padding: 12px 24px;
  border-radius: 6px;
  cursor: pointer;
  font-size: 16px;
}

.wallet-section button:hover {
  background: #6b5aa8;
}

.content {
  text-align: center;
  color: #666;
}"#;

const VITE_CONFIG: &str = r#"import { defineConfig } from 'vite';
import react from '@vitejs/plugin-react';

export default defineConfig({
  plugins: [react()],
  server: {
    port: 3000,
    https: true, // Required for some Mini App features
  },
  build: {
    outDir: 'dist',
    sourcemap: true,
  },
});"#;

const REPORT: &str = r#"# {{name}} Mini App Project Created Successfully!

## Files Generated:

### package.json
```json
{{packageJson}}
```

### public/index.html
```html
{{indexHtml}}
```

### src/main.tsx
```tsx
{{mainTsx}}
```

### src/App.tsx
```tsx
{{appTsx}}
```

### src/index.css
```css
{{indexCss}}
```

### vite.config.ts
```ts
{{viteConfig}}
```

## Next Steps:

1. Install dependencies: `npm install`
2. Start development server: `npm run dev`
3. Configure your manifest file
4. Test in Farcaster client
5. Deploy to production

## Features Included:
{{#if auth}}
✅ Farcaster Authentication
{{else}}
❌ Authentication (not included)
{{/if}}
{{#if wallet}}
✅ Wallet Integration
{{else}}
❌ Wallet Integration (not included)
{{/if}}
✅ Mobile-optimized layout
✅ TypeScript support
✅ Development tooling
"#;

// ============================================================================
// Tool Definition
// ============================================================================

/// Project scaffolding tool.
pub struct CreateMiniAppTool;

impl ToolDefinition for CreateMiniAppTool {
    const NAME: &'static str = "farcaster_create_mini_app";
    const DESCRIPTION: &'static str =
        "Create a new Farcaster Mini App project with proper structure and configuration";

    type Params = CreateMiniAppParams;

    #[instrument(skip_all, fields(name = %params.name, framework = params.framework.as_str()))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        info!("Scaffolding Mini App project");

        let with_name = |source| {
            Template::new(source)
                .var("name", params.name.as_str())
                .var("homeUrl", params.home_url.as_str())
                .flag("wallet", params.include_wallet)
                .flag("auth", params.include_auth)
        };

        let report = with_name(REPORT)
            .var("packageJson", pretty_json(&package_json(&params))?)
            .var("indexHtml", with_name(INDEX_HTML).render()?)
            .var("mainTsx", with_name(MAIN_TSX).render()?)
            .var("appTsx", with_name(APP_TSX).render()?)
            .var("indexCss", INDEX_CSS)
            .var("viteConfig", VITE_CONFIG)
            .render()?;

        Ok(success_result(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::test_support::{args, context, run};
    use serde_json::json;

    #[test]
    fn test_package_name_collapses_whitespace() {
        assert_eq!(package_name("My  Cool\tApp"), "my-cool-app");
        assert_eq!(package_name("single"), "single");
        assert_eq!(package_name(" My App "), "-my-app-");
    }

    #[test]
    fn test_dependencies_keep_insertion_order() {
        let params: CreateMiniAppParams = serde_json::from_value(json!({
            "name": "Demo",
            "homeUrl": "https://demo.app"
        }))
        .unwrap();
        let json = serde_json::to_string(&package_json(&params).dependencies).unwrap();
        assert_eq!(
            json,
            r#"{"@farcaster/miniapp-sdk":"^0.1.0","wagmi":"^2.0.0","@tanstack/react-query":"^5.0.0","react":"^18.0.0","react-dom":"^18.0.0"}"#
        );
    }

    #[test]
    fn test_next_scripts_and_dependencies() {
        let params: CreateMiniAppParams = serde_json::from_value(json!({
            "name": "Demo",
            "homeUrl": "https://demo.app",
            "framework": "next",
            "includeWallet": false
        }))
        .unwrap();
        let pkg = package_json(&params);
        assert_eq!(pkg.scripts.dev, "next dev");
        assert_eq!(pkg.scripts.start, "next start");
        let names: Vec<_> = pkg.dependencies.0.iter().map(|(name, _)| *name).collect();
        assert!(names.contains(&"next"));
        assert!(!names.contains(&"wagmi"));
    }

    #[test]
    fn test_defaults_include_everything() {
        let text = run::<CreateMiniAppTool>(json!({
            "name": "My Cool App",
            "homeUrl": "https://cool.app"
        }));
        assert!(text.starts_with("# My Cool App Mini App Project Created Successfully!"));
        assert!(text.contains("\"name\": \"my-cool-app\""));
        assert!(text.contains("\"dev\": \"vite dev\""));
        assert!(text.contains("<WagmiProvider config={config}>"));
        assert!(text.contains("✅ Farcaster Authentication"));
        assert!(text.contains("✅ Wallet Integration"));
        assert!(text.contains("content=\"https://cool.app/preview.png\""));
    }

    #[test]
    fn test_without_wallet_or_auth() {
        let text = run::<CreateMiniAppTool>(json!({
            "name": "Plain",
            "homeUrl": "https://plain.app",
            "includeWallet": false,
            "includeAuth": false
        }));
        assert!(!text.contains("WagmiProvider"));
        assert!(!text.contains("sdk.actions.signIn"));
        assert!(text.contains("❌ Authentication (not included)"));
        assert!(text.contains("❌ Wallet Integration (not included)"));
    }

    #[test]
    fn test_missing_home_url_is_malformed() {
        let err = CreateMiniAppTool::call(args(json!({ "name": "x" })), &context()).unwrap_err();
        assert!(matches!(err, ToolError::MalformedArguments { .. }));
        assert!(err.to_string().contains("homeUrl"));
    }
}
