//! Development server configuration generator.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::super::common::{default_true, mark, success_result};
use super::super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Template, ToolError};

/// Parameters for the dev server tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartDevServerParams {
    /// Port to run development server on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Use HTTPS for development (required for some features).
    #[serde(default = "default_true")]
    pub https: bool,

    /// Create public tunnel for testing (ngrok-like).
    #[serde(default)]
    pub tunnel: bool,

    /// Enable hot reloading.
    #[serde(default = "default_true")]
    pub hot_reload: bool,
}

fn default_port() -> u16 {
    3000
}

const VITE_CONFIG: &str = r#"import { defineConfig } from 'vite';
import react from '@vitejs/plugin-react';
{{#if https}}
import { readFileSync } from 'fs';
import { resolve } from 'path';
{{/if}}

export default defineConfig({
  plugins: [react()],
  server: {
    port: {{port}},
    host: true,
{{#if https}}
    https: {
      key: readFileSync(resolve(__dirname, 'localhost-key.pem')),
      cert: readFileSync(resolve(__dirname, 'localhost.pem')),
    },
{{/if}}
{{#if hotReload}}
    hmr: {
      overlay: true,
    },
{{else}}
    hmr: false,
{{/if}}
  },
  define: {
    'process.env.NODE_ENV': JSON.stringify(process.env.NODE_ENV || 'development'),
  },
  build: {
    sourcemap: true,
    rollupOptions: {
      output: {
        manualChunks: {
          vendor: ['react', 'react-dom'],
          sdk: ['@farcaster/miniapp-sdk'],
          wagmi: ['wagmi', '@tanstack/react-query'],
        },
      },
    },
  },
});"#;

const SCRIPTS: &str = r#"{
  "scripts": {
    "dev": "vite --port {{port}}{{#if https}} --https{{/if}}",
    "build": "vite build",
    "preview": "vite preview",
{{#if tunnel}}
    "tunnel": "ngrok http {{port}}",
{{else}}
    "tunnel": "echo \"Tunnel not configured\"",
{{/if}}
    "dev:tunnel": "concurrently \"npm run dev\" \"npm run tunnel\"",
    "type-check": "tsc --noEmit",
    "lint": "eslint src --ext .ts,.tsx,.js,.jsx",
    "lint:fix": "eslint src --ext .ts,.tsx,.js,.jsx --fix",
    "test": "jest",
    "test:watch": "jest --watch"
  }
}"#;

const REPORT: &str = r#"# Development Server Configuration

## Vite Configuration:
```typescript
{{viteConfig}}
```

## Package.json Scripts:
```json
{{scripts}}
```

# Development Server Setup

## 1. HTTPS Certificates (Required for Mini Apps)
{{#if https}}

### Generate local certificates:
```bash
# Install mkcert for local HTTPS
brew install mkcert  # macOS
# or
choco install mkcert # Windows

# Create local CA
mkcert -install

# Generate certificates
mkcert localhost 127.0.0.1 ::1
```
{{else}}
⚠️ HTTPS disabled - some Mini App features may not work
{{/if}}

## 2. Start Development Server
```bash
npm run dev
# Server will start at {{scheme}}://localhost:{{port}}
```
{{#if tunnel}}

## 3. Public Tunnel (for testing)
```bash
# Install ngrok
npm install -g ngrok

# Start dev server with tunnel
npm run dev:tunnel
```
{{/if}}

## 4. Farcaster Testing
1. Enable Developer Mode in Farcaster settings
2. Use Developer Tools to test your Mini App
3. Add your local URL for testing

## 5. Environment Variables (.env.local)
```env
VITE_APP_URL={{scheme}}://localhost:{{port}}
VITE_NODE_ENV=development
VITE_DEBUG=true
```

## Features:
✅ Port: {{port}}
{{httpsMark}} HTTPS {{httpsState}}
{{reloadMark}} Hot reload {{reloadState}}
{{tunnelMark}} {{tunnelState}}

## Development Workflow:
1. `npm run dev` - Start development server
2. `npm run type-check` - Check TypeScript
3. `npm run lint` - Run linting
4. `npm run test` - Run tests
5. `npm run build` - Build for production

## Debugging Tips:
- Use browser dev tools console
- Check Network tab for API calls
- Monitor SDK events in console
- Use React DevTools for component debugging
"#;

fn enabled(on: bool) -> &'static str {
    if on { "enabled" } else { "disabled" }
}

/// Dev server tool.
pub struct StartDevServerTool;

impl ToolDefinition for StartDevServerTool {
    const NAME: &'static str = "farcaster_start_dev_server";
    const DESCRIPTION: &'static str =
        "Start local development server with Farcaster Mini App optimizations";

    type Params = StartDevServerParams;

    #[instrument(skip_all, fields(port = params.port, https = params.https))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        info!("Generating development server configuration");

        let port = params.port.to_string();
        let bind = |source: &'static str| {
            Template::new(source)
                .var("port", port.clone())
                .flag("https", params.https)
                .flag("tunnel", params.tunnel)
                .flag("hotReload", params.hot_reload)
        };

        let text = bind(REPORT)
            .var("viteConfig", bind(VITE_CONFIG).render()?)
            .var("scripts", bind(SCRIPTS).render()?)
            .var("scheme", if params.https { "https" } else { "http" })
            .var("httpsMark", mark(params.https))
            .var("httpsState", enabled(params.https))
            .var("reloadMark", mark(params.hot_reload))
            .var("reloadState", enabled(params.hot_reload))
            .var("tunnelMark", mark(params.tunnel))
            .var(
                "tunnelState",
                if params.tunnel { "Tunnel support" } else { "No tunnel" },
            )
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
    fn test_defaults() {
        let text = run::<StartDevServerTool>(json!({}));
        assert!(text.contains("port: 3000,"));
        assert!(text.contains("\"dev\": \"vite --port 3000 --https\""));
        assert!(text.contains("https://localhost:3000"));
        assert!(text.contains("hmr: {\n      overlay: true,"));
        assert!(text.contains("\"tunnel\": \"echo \\\"Tunnel not configured\\\"\""));
        assert!(text.contains("❌ No tunnel"));
        assert!(!text.contains("## 3. Public Tunnel"));
    }

    #[test]
    fn test_http_with_tunnel_and_no_reload() {
        let text = run::<StartDevServerTool>(json!({
            "port": 5173,
            "https": false,
            "tunnel": true,
            "hotReload": false
        }));
        assert!(text.contains("\"dev\": \"vite --port 5173\""));
        assert!(text.contains("\"tunnel\": \"ngrok http 5173\""));
        assert!(text.contains("hmr: false,"));
        assert!(!text.contains("readFileSync"));
        assert!(text.contains("⚠️ HTTPS disabled"));
        assert!(text.contains("VITE_APP_URL=http://localhost:5173"));
        assert!(text.contains("✅ Tunnel support"));
    }
}
