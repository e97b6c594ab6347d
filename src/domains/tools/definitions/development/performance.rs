//! Performance optimization generator.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::super::common::{bullet_list, success_result};
use super::super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Template, ToolError};

/// Performance optimization technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Optimization {
    LazyLoading,
    CodeSplitting,
    ImageOptimization,
    Caching,
    BundleAnalysis,
}

impl Optimization {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LazyLoading => "lazy-loading",
            Self::CodeSplitting => "code-splitting",
            Self::ImageOptimization => "image-optimization",
            Self::Caching => "caching",
            Self::BundleAnalysis => "bundle-analysis",
        }
    }

    fn section(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::LazyLoading => ("Lazy Loading", "tsx", LAZY_LOADING),
            Self::CodeSplitting => ("Code Splitting", "typescript", CODE_SPLITTING),
            Self::ImageOptimization => ("Image Optimization", "tsx", IMAGE_OPTIMIZATION),
            Self::Caching => ("Caching", "typescript", CACHING),
            Self::BundleAnalysis => ("Bundle Analysis", "typescript", BUNDLE_ANALYSIS),
        }
    }
}

/// Performance targets.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TargetMetrics {
    /// Target load time in ms.
    pub load_time: Option<u32>,

    /// Target bundle size in KB.
    pub bundle_size: Option<u32>,
}

/// Parameters for the performance tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptimizePerformanceParams {
    /// Performance optimizations to implement.
    #[serde(default = "default_optimizations")]
    pub optimizations: Vec<Optimization>,

    /// Performance targets.
    #[serde(default)]
    pub target_metrics: Option<TargetMetrics>,
}

fn default_optimizations() -> Vec<Optimization> {
    vec![Optimization::LazyLoading, Optimization::ImageOptimization]
}

const LAZY_LOADING: &str = r#"import { lazy, Suspense } from 'react';

// Load secondary screens only when they are first shown
const Profile = lazy(() => import('./screens/Profile'));
const Leaderboard = lazy(() => import('./screens/Leaderboard'));

export function Screens({ screen }: { screen: 'profile' | 'leaderboard' }) {
  return (
    <Suspense fallback={<div className="skeleton" />}>
      {screen === 'profile' ? <Profile /> : <Leaderboard />}
    </Suspense>
  );
}"#;

const CODE_SPLITTING: &str = r#"// vite.config.ts
import { defineConfig } from 'vite';
import react from '@vitejs/plugin-react';

export default defineConfig({
  plugins: [react()],
  build: {
    target: 'es2020',
    rollupOptions: {
      output: {
        manualChunks: {
          vendor: ['react', 'react-dom'],
          sdk: ['@farcaster/miniapp-sdk'],
          wallet: ['wagmi', 'viem', '@tanstack/react-query'],
        },
      },
    },
  },
});"#;

const IMAGE_OPTIMIZATION: &str = r#"interface OptimizedImageProps {
  src: string;
  alt: string;
  width: number;
  height: number;
  priority?: boolean;
}

// Explicit dimensions avoid layout shift inside the modal
export function OptimizedImage({ src, alt, width, height, priority = false }: OptimizedImageProps) {
  const base = src.replace(/\.(png|jpe?g)$/, '');
  return (
    <picture>
      <source srcSet={`${base}.avif`} type="image/avif" />
      <source srcSet={`${base}.webp`} type="image/webp" />
      <img
        src={src}
        alt={alt}
        width={width}
        height={height}
        loading={priority ? 'eager' : 'lazy'}
        decoding="async"
      />
    </picture>
  );
}"#;

const CACHING: &str = r#"// Stale-while-revalidate cache for API responses
const cache = new Map<string, { value: unknown; fetchedAt: number }>();

export async function cachedFetch<T>(url: string, maxAgeMs = 60_000): Promise<T> {
  const hit = cache.get(url);
  const fresh = hit && Date.now() - hit.fetchedAt < maxAgeMs;

  const refresh = fetch(url)
    .then((response) => response.json())
    .then((value) => {
      cache.set(url, { value, fetchedAt: Date.now() });
      return value as T;
    });

  if (hit) {
    if (!fresh) refresh.catch(() => undefined);
    return hit.value as T;
  }
  return refresh;
}"#;

const BUNDLE_ANALYSIS: &str = r#"// vite.config.ts (add to plugins)
import { visualizer } from 'rollup-plugin-visualizer';

export default defineConfig({
  plugins: [
    react(),
    visualizer({
      filename: 'dist/stats.html',
      gzipSize: true,
      brotliSize: true,
    }),
  ],
});

// npm install -D rollup-plugin-visualizer
// npm run build && open dist/stats.html"#;

const BUDGET_CHECK: &str = r#"// scripts/check-budget.ts
import { readdirSync, statSync } from 'fs';
import { join } from 'path';
{{#if bundleSize}}

const MAX_BUNDLE_KB = {{bundleSize}};
const assets = join('dist', 'assets');
const totalKb =
  readdirSync(assets)
    .filter((file) => file.endsWith('.js'))
    .reduce((sum, file) => sum + statSync(join(assets, file)).size, 0) / 1024;

if (totalKb > MAX_BUNDLE_KB) {
  console.error(`Bundle is ${totalKb.toFixed(1)}KB, budget is ${MAX_BUNDLE_KB}KB`);
  process.exit(1);
}
console.log(`Bundle ${totalKb.toFixed(1)}KB within ${MAX_BUNDLE_KB}KB budget`);
{{/if}}
{{#if loadTime}}

// Runtime check: report when ready() takes longer than the target
export const MAX_LOAD_MS = {{loadTime}};

export function checkLoadTime() {
  const elapsed = performance.now();
  if (elapsed > MAX_LOAD_MS) {
    console.warn(`Load took ${Math.round(elapsed)}ms, target is ${MAX_LOAD_MS}ms`);
  }
}
{{/if}}"#;

const REPORT: &str = r#"# Performance Optimization

## Optimizations:
{{optimizations}}

{{sections}}
{{#if targets}}
## Performance Targets:
{{targets}}

```typescript
{{budget}}
```

{{/if}}
## Mini App Performance Checklist:
- Call `sdk.actions.ready()` as soon as the first screen is usable
- Keep the initial JavaScript payload small; the app loads on mobile networks
- Size the splash image correctly (200x200px)
- Preconnect to API origins in index.html
"#;

/// Performance optimization tool.
pub struct OptimizePerformanceTool;

impl ToolDefinition for OptimizePerformanceTool {
    const NAME: &'static str = "farcaster_optimize_performance";
    const DESCRIPTION: &'static str = "Generate performance optimization code for Mini Apps";

    type Params = OptimizePerformanceParams;

    #[instrument(skip_all, fields(optimizations = params.optimizations.len()))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        info!("Generating performance optimizations");

        let optimizations = bullet_list(params.optimizations.iter().map(|o| o.as_str()));

        let sections = params
            .optimizations
            .iter()
            .map(|o| {
                let (title, lang, code) = o.section();
                format!("## {}:\n```{}\n{}\n```\n", title, lang, code)
            })
            .collect::<Vec<_>>()
            .join("\n");

        let metrics = params.target_metrics.unwrap_or_default();
        let mut targets = Vec::new();
        if let Some(ms) = metrics.load_time {
            targets.push(format!("- Load time: {}ms", ms));
        }
        if let Some(kb) = metrics.bundle_size {
            targets.push(format!("- Bundle size: {}KB", kb));
        }

        let budget = Template::new(BUDGET_CHECK)
            .var("loadTime", metrics.load_time.map(|v| v.to_string()).unwrap_or_default())
            .var("bundleSize", metrics.bundle_size.map(|v| v.to_string()).unwrap_or_default())
            .render()?;

        let text = Template::new(REPORT)
            .var("optimizations", optimizations)
            .var("sections", sections)
            .var("targets", targets.join("\n"))
            .var("budget", budget)
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
        let text = run::<OptimizePerformanceTool>(json!({}));
        assert!(text.contains("- lazy-loading\n- image-optimization"));
        assert!(text.contains("## Lazy Loading:"));
        assert!(text.contains("export function OptimizedImage"));
        assert!(!text.contains("## Caching:"));
        assert!(!text.contains("## Performance Targets"));
    }

    #[test]
    fn test_targets_render_budget_checks() {
        let text = run::<OptimizePerformanceTool>(json!({
            "optimizations": ["bundle-analysis"],
            "targetMetrics": { "loadTime": 1500, "bundleSize": 250 }
        }));
        assert!(text.contains("- Load time: 1500ms\n- Bundle size: 250KB"));
        assert!(text.contains("const MAX_BUNDLE_KB = 250;"));
        assert!(text.contains("export const MAX_LOAD_MS = 1500;"));
        assert!(text.contains("rollup-plugin-visualizer"));
    }

    #[test]
    fn test_partial_targets() {
        let text = run::<OptimizePerformanceTool>(json!({
            "optimizations": [],
            "targetMetrics": { "loadTime": 800 }
        }));
        assert!(text.contains("MAX_LOAD_MS = 800"));
        assert!(!text.contains("MAX_BUNDLE_KB"));
    }
}
