//! Debugging utilities generator.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::super::common::{default_true, mark, success_result};
use super::super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Template, ToolError};

/// Amount of debug output the generated utilities emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DebugLevel {
    Basic,
    Verbose,
    Production,
}

impl DebugLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Verbose => "verbose",
            Self::Production => "production",
        }
    }

    /// Lowest log level that is printed.
    fn threshold(self) -> &'static str {
        match self {
            Self::Basic => "info",
            Self::Verbose => "debug",
            Self::Production => "error",
        }
    }
}

/// Parameters for the debug tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DebugMiniAppParams {
    /// Level of debug information to include.
    pub debug_level: DebugLevel,

    /// Include SDK-specific debugging.
    #[serde(rename = "includeSDKDebug", default = "default_true")]
    pub include_sdk_debug: bool,

    /// Include error reporting mechanism.
    #[serde(default = "default_true")]
    pub error_reporting: bool,

    /// Include performance monitoring.
    #[serde(default)]
    pub performance_monitoring: bool,
}

const LOGGER: &str = r#"// src/debug/logger.ts
type Level = 'debug' | 'info' | 'warn' | 'error';

const LEVELS: Level[] = ['debug', 'info', 'warn', 'error'];
const THRESHOLD: Level = '{{threshold}}';

function enabled(level: Level): boolean {
  return LEVELS.indexOf(level) >= LEVELS.indexOf(THRESHOLD);
}

export const logger = {
  debug: (...args: unknown[]) => enabled('debug') && console.debug('[miniapp]', ...args),
  info: (...args: unknown[]) => enabled('info') && console.info('[miniapp]', ...args),
  warn: (...args: unknown[]) => enabled('warn') && console.warn('[miniapp]', ...args),
  error: (...args: unknown[]) => enabled('error') && console.error('[miniapp]', ...args),
};
{{#if verbose}}

// Dump environment details once at startup
export function logEnvironment() {
  logger.debug('User agent:', navigator.userAgent);
  logger.debug('Viewport:', `${window.innerWidth}x${window.innerHeight}`);
  logger.debug('In iframe:', window.self !== window.top);
  logger.debug('URL:', window.location.href);
}
{{/if}}"#;

const SDK_DEBUG: &str = r#"// src/debug/sdk.ts
import sdk from '@farcaster/miniapp-sdk';
import { logger } from './logger';

// Log every SDK action with its arguments, duration and outcome
export function instrumentSdk() {
  for (const [name, action] of Object.entries(sdk.actions)) {
    if (typeof action !== 'function') continue;

    (sdk.actions as any)[name] = async (...args: unknown[]) => {
      const started = performance.now();
      logger.debug(`sdk.actions.${name}`, args);
      try {
        const result = await (action as Function)(...args);
        logger.info(`sdk.actions.${name} ok in ${Math.round(performance.now() - started)}ms`);
        return result;
      } catch (error) {
        logger.error(`sdk.actions.${name} failed`, error);
        throw error;
      }
    };
  }
}

export async function logSdkContext() {
  const context = await sdk.context;
  logger.info('SDK context:', {
    fid: context?.user?.fid,
    client: context?.client?.clientFid,
    location: context?.location?.type,
  });
}"#;

const ERROR_REPORTING: &str = r#"// src/debug/errors.ts
import { logger } from './logger';

const REPORT_URL = import.meta.env.VITE_ERROR_REPORT_URL;

interface ErrorReport {
  message: string;
  stack?: string;
  source: 'error' | 'unhandledrejection' | 'manual';
  url: string;
  timestamp: number;
}

export function reportError(error: unknown, source: ErrorReport['source'] = 'manual') {
  const err = error instanceof Error ? error : new Error(String(error));
  const report: ErrorReport = {
    message: err.message,
    stack: err.stack,
    source,
    url: window.location.href,
    timestamp: Date.now(),
  };

  logger.error('Reported error:', report);

  if (REPORT_URL) {
    navigator.sendBeacon(REPORT_URL, JSON.stringify(report));
  }
}

export function installGlobalErrorHandlers() {
  window.addEventListener('error', (event) => reportError(event.error, 'error'));
  window.addEventListener('unhandledrejection', (event) =>
    reportError(event.reason, 'unhandledrejection')
  );
}"#;

const PERFORMANCE: &str = r#"// src/debug/performance.ts
import { logger } from './logger';

// Time from navigation start until sdk.actions.ready() resolved
export function markReady() {
  performance.mark('miniapp:ready');
  const [entry] = performance.getEntriesByName('miniapp:ready');
  logger.info(`Ready after ${Math.round(entry.startTime)}ms`);
}

export function observeVitals() {
  new PerformanceObserver((list) => {
    for (const entry of list.getEntries()) {
      logger.info(`${entry.entryType}:`, Math.round(entry.startTime));
    }
  }).observe({ type: 'largest-contentful-paint', buffered: true });

  new PerformanceObserver((list) => {
    for (const entry of list.getEntries()) {
      if (entry.duration > 50) {
        logger.warn('Long task:', Math.round(entry.duration), 'ms');
      }
    }
  }).observe({ type: 'longtask', buffered: true });
}"#;

const REPORT: &str = r#"# Debug Utilities ({{level}} level)

## Logger:
```typescript
{{logger}}
```
{{#if sdkDebug}}

## SDK Debugging:
```typescript
{{sdkDebug}}
```
{{/if}}
{{#if errorReporting}}

## Error Reporting:
```typescript
{{errorReporting}}
```
{{/if}}
{{#if performance}}

## Performance Monitoring:
```typescript
{{performance}}
```
{{/if}}

## Setup (main.tsx):
```typescript
{{setup}}
```

## Configuration:
✅ Debug level: {{level}} (threshold `{{threshold}}`)
{{sdkMark}} SDK debugging
{{errorMark}} Error reporting
{{perfMark}} Performance monitoring

## Debugging Tips:
- Open the Farcaster developer tools preview to see console output
- Test on a phone: mobile webviews behave differently from desktop
- A blank splash screen usually means `sdk.actions.ready()` was never called
"#;

/// Debug utilities tool.
pub struct DebugMiniAppTool;

impl DebugMiniAppTool {
    fn setup(params: &DebugMiniAppParams) -> String {
        let mut lines = Vec::new();
        if params.debug_level == DebugLevel::Verbose {
            lines.push("import { logEnvironment } from './debug/logger';");
        }
        if params.include_sdk_debug {
            lines.push("import { instrumentSdk, logSdkContext } from './debug/sdk';");
        }
        if params.error_reporting {
            lines.push("import { installGlobalErrorHandlers } from './debug/errors';");
        }
        if params.performance_monitoring {
            lines.push("import { observeVitals } from './debug/performance';");
        }
        lines.push("");
        if params.error_reporting {
            lines.push("installGlobalErrorHandlers();");
        }
        if params.debug_level == DebugLevel::Verbose {
            lines.push("logEnvironment();");
        }
        if params.include_sdk_debug {
            lines.push("instrumentSdk();");
            lines.push("logSdkContext();");
        }
        if params.performance_monitoring {
            lines.push("observeVitals();");
        }
        lines.join("\n")
    }
}

impl ToolDefinition for DebugMiniAppTool {
    const NAME: &'static str = "farcaster_debug_mini_app";
    const DESCRIPTION: &'static str =
        "Generate debugging utilities and error handling for Mini Apps";

    type Params = DebugMiniAppParams;

    #[instrument(skip_all, fields(level = params.debug_level.as_str()))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        info!("Generating debug utilities");

        let level = params.debug_level;
        let logger = Template::new(LOGGER)
            .var("threshold", level.threshold())
            .flag("verbose", level == DebugLevel::Verbose)
            .render()?;

        let text = Template::new(REPORT)
            .var("level", level.as_str())
            .var("threshold", level.threshold())
            .var("logger", logger)
            .var("sdkDebug", SDK_DEBUG)
            .var("errorReporting", ERROR_REPORTING)
            .var("performance", PERFORMANCE)
            .var("setup", Self::setup(&params))
            .var("sdkMark", mark(params.include_sdk_debug))
            .var("errorMark", mark(params.error_reporting))
            .var("perfMark", mark(params.performance_monitoring))
            .flag("sdkDebug", params.include_sdk_debug)
            .flag("errorReporting", params.error_reporting)
            .flag("performance", params.performance_monitoring)
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
    fn test_basic_defaults() {
        let text = run::<DebugMiniAppTool>(json!({ "debugLevel": "basic" }));
        assert!(text.starts_with("# Debug Utilities (basic level)"));
        assert!(text.contains("const THRESHOLD: Level = 'info';"));
        assert!(text.contains("export function instrumentSdk()"));
        assert!(text.contains("export function installGlobalErrorHandlers()"));
        assert!(!text.contains("observeVitals"));
        assert!(!text.contains("logEnvironment"));
    }

    #[test]
    fn test_verbose_with_performance() {
        let text = run::<DebugMiniAppTool>(json!({
            "debugLevel": "verbose",
            "includeSDKDebug": false,
            "errorReporting": false,
            "performanceMonitoring": true
        }));
        assert!(text.contains("const THRESHOLD: Level = 'debug';"));
        assert!(text.contains("logEnvironment();"));
        assert!(text.contains("observeVitals();"));
        assert!(!text.contains("instrumentSdk"));
        assert!(text.contains("❌ SDK debugging"));
    }

    #[test]
    fn test_production_only_logs_errors() {
        let text = run::<DebugMiniAppTool>(json!({ "debugLevel": "production" }));
        assert!(text.contains("threshold `error`"));
    }
}
