//! Development environment setup tool.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::super::common::{default_true, success_result};
use super::super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Template, ToolError};

/// JavaScript package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }
}

/// Parameters for the development environment tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetupDevEnvironmentParams {
    /// Package manager to use.
    #[serde(default)]
    pub package_manager: PackageManager,

    /// Setup TypeScript configuration.
    #[serde(default = "default_true")]
    pub typescript: bool,

    /// Setup ESLint configuration.
    #[serde(default = "default_true")]
    pub eslint: bool,
}

const TEMPLATE: &str = r#"# Development Environment Setup

## Package Manager: {{pm}}

## Installation Commands:
```bash
{{pm}} install
{{#if typescript}}
# TypeScript configuration created
{{/if}}
{{#if eslint}}
# ESLint configuration created
{{/if}}
{{pm}} run dev # Start development server
{{pm}} run build # Build for production
{{pm}} run lint # Run linting
```
{{#if typescript}}

## tsconfig.json:
```json
{
  "compilerOptions": {
    "target": "ES2020",
    "useDefineForClassFields": true,
    "lib": ["ES2020", "DOM", "DOM.Iterable"],
    "module": "ESNext",
    "skipLibCheck": true,
    "moduleResolution": "bundler",
    "allowImportingTsExtensions": true,
    "resolveJsonModule": true,
    "isolatedModules": true,
    "noEmit": true,
    "jsx": "react-jsx",
    "strict": true,
    "noUnusedLocals": true,
    "noUnusedParameters": true,
    "noFallthroughCasesInSwitch": true
  },
  "include": ["src"],
  "references": [{ "path": "./tsconfig.node.json" }]
}
```
{{/if}}
{{#if eslint}}

## .eslintrc.json:
```json
{
  "extends": [
    "eslint:recommended",
    "@typescript-eslint/recommended",
    "plugin:react/recommended",
    "plugin:react-hooks/recommended"
  ],
  "parser": "@typescript-eslint/parser",
  "plugins": ["@typescript-eslint", "react", "react-hooks"],
  "rules": {
    "react/react-in-jsx-scope": "off",
    "@typescript-eslint/no-unused-vars": "error",
    "react-hooks/rules-of-hooks": "error",
    "react-hooks/exhaustive-deps": "warn"
  },
  "settings": {
    "react": {
      "version": "detect"
    }
  }
}
```
{{/if}}

## Environment Variables (.env):
```env
VITE_APP_NAME=Your Mini App
VITE_HOME_URL=https://yourapp.com
VITE_CHAIN_ID=8453
NODE_ENV=development
```

## Development Workflow:

1. **Start Development Server**:
   `{{pm}} run dev`

2. **Enable HTTPS** (required for testing):
   - Development server runs with HTTPS
   - Use ngrok for public testing: `ngrok http 3000`

3. **Testing in Farcaster**:
   - Enable Developer Mode in Farcaster
   - Use Developer Tools for testing
   - Test manifest validation

4. **Code Quality**:
   - Run `{{pm}} run lint` before commits
   - Use Prettier for formatting
   - Write tests for components

## Recommended VS Code Extensions:
- TypeScript and JavaScript Language Features
- ES7+ React/Redux/React-Native snippets
- Prettier - Code formatter
- ESLint
- Auto Rename Tag

## Git Setup:
```bash
git init
echo "node_modules/" > .gitignore
echo "dist/" >> .gitignore
echo ".env.local" >> .gitignore
git add .
git commit -m "Initial Farcaster Mini App setup"
```
"#;

/// Development environment setup tool.
pub struct SetupDevEnvironmentTool;

impl ToolDefinition for SetupDevEnvironmentTool {
    const NAME: &'static str = "farcaster_setup_dev_environment";
    const DESCRIPTION: &'static str =
        "Setup development environment for Farcaster Mini Apps with required dependencies";

    type Params = SetupDevEnvironmentParams;

    #[instrument(skip_all, fields(package_manager = params.package_manager.as_str()))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        info!("Generating development environment setup");

        let text = Template::new(TEMPLATE)
            .var("pm", params.package_manager.as_str())
            .flag("typescript", params.typescript)
            .flag("eslint", params.eslint)
            .render()?;

        Ok(success_result(text))
    }
}
