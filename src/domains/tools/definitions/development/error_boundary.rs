//! Error boundary generator.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::super::common::{UiFramework, default_true, mark, success_result};
use super::super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Template, ToolError};

/// Fallback shown when rendering fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FallbackUi {
    Simple,
    Detailed,
    #[default]
    Retry,
    Custom,
}

impl FallbackUi {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Detailed => "detailed",
            Self::Retry => "retry",
            Self::Custom => "custom",
        }
    }
}

/// Parameters for the error boundary tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateErrorBoundaryParams {
    /// Frontend framework.
    pub framework: UiFramework,

    /// Include error reporting to external service.
    #[serde(default = "default_true")]
    pub include_reporting: bool,

    /// Type of fallback UI to show on errors.
    #[serde(rename = "fallbackUI", default)]
    pub fallback_ui: FallbackUi,
}

const REPORTER: &str = r#"// src/errors/report.ts
export function reportError(error: Error, context: Record<string, unknown> = {}) {
  const endpoint = import.meta.env.VITE_ERROR_REPORT_URL;
  if (!endpoint) return;

  const payload = JSON.stringify({
    message: error.message,
    stack: error.stack,
    url: window.location.href,
    timestamp: Date.now(),
    ...context,
  });
  navigator.sendBeacon(endpoint, payload);
}"#;

const REACT_BOUNDARY: &str = r#"import { Component, type ErrorInfo, type ReactNode } from 'react';
{{#if reporting}}
import { reportError } from './errors/report';
{{/if}}

interface Props {
  children: ReactNode;
{{#if custom}}
  fallback: (error: Error, reset: () => void) => ReactNode;
{{/if}}
}

interface State {
  error: Error | null;
}

export class ErrorBoundary extends Component<Props, State> {
  state: State = { error: null };

  static getDerivedStateFromError(error: Error): State {
    return { error };
  }

  componentDidCatch(error: Error, info: ErrorInfo) {
{{#if reporting}}
    reportError(error, { componentStack: info.componentStack });
{{else}}
    console.error('Render error:', error, info.componentStack);
{{/if}}
  }

  reset = () => this.setState({ error: null });

  render() {
    const { error } = this.state;
    if (!error) return this.props.children;

{{#if simple}}
    return <div className="error-fallback">Something went wrong.</div>;
{{/if}}
{{#if detailed}}
    return (
      <div className="error-fallback">
        <h2>Something went wrong</h2>
        <p>{error.message}</p>
        <details>
          <summary>Details</summary>
          <pre>{error.stack}</pre>
        </details>
      </div>
    );
{{/if}}
{{#if retry}}
    return (
      <div className="error-fallback">
        <p>Something went wrong.</p>
        <button onClick={this.reset}>Try again</button>
      </div>
    );
{{/if}}
{{#if custom}}
    return this.props.fallback(error, this.reset);
{{/if}}
  }
}"#;

const VUE_BOUNDARY: &str = r#"<!-- ErrorBoundary.vue -->
<script setup lang="ts">
import { ref, onErrorCaptured } from 'vue';
{{#if reporting}}
import { reportError } from './errors/report';
{{/if}}

const error = ref<Error | null>(null);
const reset = () => (error.value = null);

onErrorCaptured((err, instance, info) => {
  error.value = err;
{{#if reporting}}
  reportError(err, { info });
{{else}}
  console.error('Render error:', err, info);
{{/if}}
  return false;
});
</script>

<template>
  <slot v-if="!error" />
{{#if simple}}
  <div v-else class="error-fallback">Something went wrong.</div>
{{/if}}
{{#if detailed}}
  <div v-else class="error-fallback">
    <h2>Something went wrong</h2>
    <p>{{ error.message }}</p>
    <details>
      <summary>Details</summary>
      <pre>{{ error.stack }}</pre>
    </details>
  </div>
{{/if}}
{{#if retry}}
  <div v-else class="error-fallback">
    <p>Something went wrong.</p>
    <button @click="reset">Try again</button>
  </div>
{{/if}}
{{#if custom}}
  <slot v-else name="fallback" :error="error" :reset="reset" />
{{/if}}
</template>"#;

const VANILLA_BOUNDARY: &str = r#"{{#if reporting}}
import { reportError } from './errors/report';

{{/if}}
type Render = (root: HTMLElement) => void;
{{#if custom}}
type Fallback = (root: HTMLElement, error: Error, retry: () => void) => void;
{{/if}}

// Render into root and swap in a fallback when rendering or later events fail
export function mountWithBoundary(root: HTMLElement, render: Render{{#if custom}}, fallback: Fallback{{/if}}) {
  const showFallback = (error: Error) => {
{{#if reporting}}
    reportError(error);
{{else}}
    console.error('Render error:', error);
{{/if}}
    root.replaceChildren();
{{#if simple}}
    root.textContent = 'Something went wrong.';
{{/if}}
{{#if detailed}}
    const heading = document.createElement('h2');
    heading.textContent = 'Something went wrong';
    const message = document.createElement('p');
    message.textContent = error.message;
    const stack = document.createElement('pre');
    stack.textContent = error.stack ?? '';
    root.append(heading, message, stack);
{{/if}}
{{#if retry}}
    const message = document.createElement('p');
    message.textContent = 'Something went wrong.';
    const button = document.createElement('button');
    button.textContent = 'Try again';
    button.onclick = mount;
    root.append(message, button);
{{/if}}
{{#if custom}}
    fallback(root, error, mount);
{{/if}}
  };

  function mount() {
    try {
      root.replaceChildren();
      render(root);
    } catch (error) {
      showFallback(error instanceof Error ? error : new Error(String(error)));
    }
  }

  window.addEventListener('error', (event) => showFallback(event.error));
  mount();
}"#;

const REPORT: &str = r#"# Error Boundary ({{framework}})

## Error Boundary Component:
```{{lang}}
{{boundary}}
```
{{#if reporting}}

## Error Reporter:
```typescript
{{reporter}}
```
{{/if}}

## Usage:
```{{lang}}
{{usage}}
```

## Configuration:
✅ Fallback UI: {{fallback}}
{{reportingMark}} Error reporting

## Recommendations:
- Wrap each screen separately so one failure does not blank the whole app
- Still call `sdk.actions.ready()` when showing a fallback, or the splash screen stays up
- Boundaries do not catch errors in event handlers or async code; handle those explicitly
"#;

/// Error boundary tool.
pub struct GenerateErrorBoundaryTool;

impl GenerateErrorBoundaryTool {
    fn usage(params: &GenerateErrorBoundaryParams) -> &'static str {
        let custom = params.fallback_ui == FallbackUi::Custom;
        match (params.framework, custom) {
            (UiFramework::React, false) => "<ErrorBoundary>\n  <App />\n</ErrorBoundary>",
            (UiFramework::React, true) => {
                "<ErrorBoundary fallback={(error, reset) => <MyFallback error={error} onRetry={reset} />}>\n  <App />\n</ErrorBoundary>"
            }
            (UiFramework::Vue, false) => "<ErrorBoundary>\n  <App />\n</ErrorBoundary>",
            (UiFramework::Vue, true) => {
                "<ErrorBoundary>\n  <App />\n  <template #fallback=\"{ error, reset }\">\n    <MyFallback :error=\"error\" @retry=\"reset\" />\n  </template>\n</ErrorBoundary>"
            }
            (UiFramework::Vanilla, false) => {
                "mountWithBoundary(document.getElementById('app')!, renderApp);"
            }
            (UiFramework::Vanilla, true) => {
                "mountWithBoundary(document.getElementById('app')!, renderApp, (root, error, retry) => {\n  root.textContent = error.message;\n});"
            }
        }
    }
}

impl ToolDefinition for GenerateErrorBoundaryTool {
    const NAME: &'static str = "farcaster_generate_error_boundary";
    const DESCRIPTION: &'static str =
        "Generate error boundary components for graceful error handling";

    type Params = GenerateErrorBoundaryParams;

    #[instrument(skip_all, fields(framework = params.framework.as_str(), fallback = params.fallback_ui.as_str()))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        info!("Generating error boundary");

        let (source, lang) = match params.framework {
            UiFramework::React => (REACT_BOUNDARY, "tsx"),
            UiFramework::Vue => (VUE_BOUNDARY, "vue"),
            UiFramework::Vanilla => (VANILLA_BOUNDARY, "typescript"),
        };

        let fallback = params.fallback_ui;
        let boundary = Template::new(source)
            .flag("reporting", params.include_reporting)
            .flag("simple", fallback == FallbackUi::Simple)
            .flag("detailed", fallback == FallbackUi::Detailed)
            .flag("retry", fallback == FallbackUi::Retry)
            .flag("custom", fallback == FallbackUi::Custom)
            .render()?;

        let text = Template::new(REPORT)
            .var("framework", params.framework.as_str())
            .var("lang", lang)
            .var("boundary", boundary)
            .var("reporter", REPORTER)
            .var("usage", Self::usage(&params))
            .var("fallback", fallback.as_str())
            .var("reportingMark", mark(params.include_reporting))
            .flag("reporting", params.include_reporting)
            .render()?;

        Ok(success_result(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::test_support::{args, run};
    use serde_json::json;

    #[test]
    fn test_react_retry_default() {
        let text = run::<GenerateErrorBoundaryTool>(json!({ "framework": "react" }));
        assert!(text.contains("export class ErrorBoundary"));
        assert!(text.contains("<button onClick={this.reset}>Try again</button>"));
        assert!(text.contains("reportError(error, { componentStack: info.componentStack });"));
        assert!(text.contains("✅ Fallback UI: retry"));
        assert!(!text.contains("<details>"));
    }

    #[test]
    fn test_vue_detailed_keeps_interpolation() {
        let text = run::<GenerateErrorBoundaryTool>(json!({
            "framework": "vue",
            "fallbackUI": "detailed",
            "includeReporting": false
        }));
        assert!(text.contains("<p>{{ error.message }}</p>"));
        assert!(text.contains("console.error('Render error:', err, info);"));
        assert!(!text.contains("## Error Reporter"));
    }

    #[test]
    fn test_vanilla_custom_fallback() {
        let text = run::<GenerateErrorBoundaryTool>(json!({
            "framework": "vanilla",
            "fallbackUI": "custom"
        }));
        assert!(text.contains("render: Render, fallback: Fallback)"));
        assert!(text.contains("fallback(root, error, mount);"));
    }

    #[test]
    fn test_framework_is_required() {
        assert!(GenerateErrorBoundaryTool::parse(args(json!({ "fallbackUI": "simple" }))).is_err());
    }
}
