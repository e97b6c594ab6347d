//! Navigation pattern generator.
//!
//! Mini Apps render inside a modal owned by the client, so navigation stays
//! in-app and the client back gesture has to be wired to the router.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::super::common::{default_true, mark, success_result};
use super::super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Template, ToolError};

/// Navigation pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum NavigationType {
    Stack,
    Tabs,
    Drawer,
    Simple,
}

impl NavigationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stack => "stack",
            Self::Tabs => "tabs",
            Self::Drawer => "drawer",
            Self::Simple => "simple",
        }
    }

    fn component(self) -> &'static str {
        match self {
            Self::Stack => STACK,
            Self::Tabs => TABS,
            Self::Drawer => DRAWER,
            Self::Simple => SIMPLE,
        }
    }
}

/// Parameters for the navigation tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateNavigationParams {
    /// Navigation pattern to implement.
    pub navigation_type: NavigationType,

    /// Include back button handling.
    #[serde(default = "default_true")]
    pub include_back_button: bool,

    /// Optimize for mobile viewport.
    #[serde(default = "default_true")]
    pub mobile_optimized: bool,
}

const BACK_HOOK: &str = r#"import sdk from '@farcaster/miniapp-sdk';
import { useEffect } from 'react';

// Route the client back gesture through the in-app history
export function useBackNavigation(canGoBack: boolean, goBack: () => void) {
  useEffect(() => {
    const onBack = () => (canGoBack ? goBack() : sdk.actions.close());
    sdk.on('back', onBack);
    return () => {
      sdk.off('back', onBack);
    };
  }, [canGoBack, goBack]);
}"#;

const STACK: &str = r#"import { useCallback, useState, type ReactNode } from 'react';
{{#if backButton}}
import { useBackNavigation } from './useBackNavigation';
{{/if}}

type Screen = { id: string; title: string; render: () => ReactNode };

export function StackNavigator({ initial }: { initial: Screen }) {
  const [stack, setStack] = useState<Screen[]>([initial]);
  const current = stack[stack.length - 1];

  const push = useCallback((screen: Screen) => setStack((s) => [...s, screen]), []);
  const pop = useCallback(() => setStack((s) => (s.length > 1 ? s.slice(0, -1) : s)), []);
{{#if backButton}}

  useBackNavigation(stack.length > 1, pop);
{{/if}}

  return (
    <div className="nav-container">
      <header className="nav-header">
{{#if backButton}}
        {stack.length > 1 && (
          <button className="nav-back" onClick={pop} aria-label="Back">←</button>
        )}
{{/if}}
        <h1>{current.title}</h1>
      </header>
      <main className="nav-content">{current.render()}</main>
    </div>
  );
}"#;

const TABS: &str = r#"import { useState, type ReactNode } from 'react';
{{#if backButton}}
import { useBackNavigation } from './useBackNavigation';
{{/if}}

type Tab = { id: string; label: string; icon: string; render: () => ReactNode };

export function TabNavigator({ tabs }: { tabs: Tab[] }) {
  const [history, setHistory] = useState<string[]>([tabs[0].id]);
  const active = history[history.length - 1];
  const tab = tabs.find((t) => t.id === active) ?? tabs[0];

  const select = (id: string) => id !== active && setHistory((h) => [...h, id]);
{{#if backButton}}

  useBackNavigation(history.length > 1, () => setHistory((h) => h.slice(0, -1)));
{{/if}}

  return (
    <div className="nav-container">
      <main className="nav-content">{tab.render()}</main>
      <nav className="nav-tabs" role="tablist">
        {tabs.map((t) => (
          <button
            key={t.id}
            role="tab"
            aria-selected={t.id === active}
            className={t.id === active ? 'nav-tab active' : 'nav-tab'}
            onClick={() => select(t.id)}
          >
            <span aria-hidden>{t.icon}</span>
            <span>{t.label}</span>
          </button>
        ))}
      </nav>
    </div>
  );
}"#;

const DRAWER: &str = r#"import { useState, type ReactNode } from 'react';
{{#if backButton}}
import { useBackNavigation } from './useBackNavigation';
{{/if}}

type Item = { id: string; label: string; render: () => ReactNode };

export function DrawerNavigator({ items }: { items: Item[] }) {
  const [open, setOpen] = useState(false);
  const [active, setActive] = useState(items[0].id);
  const item = items.find((i) => i.id === active) ?? items[0];
{{#if backButton}}

  // Back closes the drawer first
  useBackNavigation(open, () => setOpen(false));
{{/if}}

  return (
    <div className="nav-container">
      <header className="nav-header">
        <button className="nav-menu" onClick={() => setOpen(true)} aria-label="Menu">☰</button>
        <h1>{item.label}</h1>
      </header>
      {open && <div className="nav-overlay" onClick={() => setOpen(false)} />}
      <aside className={open ? 'nav-drawer open' : 'nav-drawer'}>
        {items.map((i) => (
          <button
            key={i.id}
            className={i.id === active ? 'nav-item active' : 'nav-item'}
            onClick={() => {
              setActive(i.id);
              setOpen(false);
            }}
          >
            {i.label}
          </button>
        ))}
      </aside>
      <main className="nav-content">{item.render()}</main>
    </div>
  );
}"#;

const SIMPLE: &str = r#"import { useState, type ReactNode } from 'react';
{{#if backButton}}
import { useBackNavigation } from './useBackNavigation';
{{/if}}

type Page = { id: string; title: string; render: () => ReactNode };

export function SimpleNavigator({ home, pages }: { home: Page; pages: Page[] }) {
  const [page, setPage] = useState<Page>(home);
  const goHome = () => setPage(home);
{{#if backButton}}

  useBackNavigation(page.id !== home.id, goHome);
{{/if}}

  return (
    <div className="nav-container">
      <header className="nav-header">
{{#if backButton}}
        {page.id !== home.id && (
          <button className="nav-back" onClick={goHome} aria-label="Back">←</button>
        )}
{{/if}}
        <h1>{page.title}</h1>
      </header>
      <main className="nav-content">
        {page.id === home.id
          ? pages.map((p) => (
              <button key={p.id} className="nav-item" onClick={() => setPage(p)}>
                {p.title}
              </button>
            ))
          : page.render()}
      </main>
    </div>
  );
}"#;

const MOBILE_CSS: &str = r#".nav-container {
  display: flex;
  flex-direction: column;
  height: 100dvh;
  padding-top: env(safe-area-inset-top);
  padding-bottom: env(safe-area-inset-bottom);
  overscroll-behavior: contain;
}

.nav-header {
  display: flex;
  align-items: center;
  gap: 8px;
  padding: 8px 12px;
}

.nav-content {
  flex: 1;
  overflow-y: auto;
  -webkit-overflow-scrolling: touch;
}

.nav-back,
.nav-menu,
.nav-tab,
.nav-item {
  min-width: 44px;
  min-height: 44px;
  touch-action: manipulation;
}

.nav-tabs {
  display: flex;
  justify-content: space-around;
  border-top: 1px solid #e5e5e5;
}

.nav-drawer {
  position: fixed;
  inset: 0 auto 0 0;
  width: 80vw;
  max-width: 320px;
  transform: translateX(-100%);
  transition: transform 0.2s ease-out;
}

.nav-drawer.open {
  transform: translateX(0);
}"#;

const REPORT: &str = r#"# Mini App Navigation ({{navigationType}})

## Navigator Component:
```tsx
{{component}}
```
{{#if backButton}}

## Back Navigation Hook:
```typescript
{{backHook}}
```
{{/if}}
{{#if mobile}}

## Mobile Styles:
```css
{{css}}
```
{{/if}}

## Configuration:
{{backMark}} Back button handling
{{mobileMark}} Mobile viewport optimization

## Modal Constraints:
- The app renders inside a client-owned modal, so avoid full page reloads
- Keep navigation depth shallow; users can dismiss the modal at any time
- Open external links with `sdk.actions.openUrl()` instead of `window.open`
- Call `sdk.actions.close()` when the user backs out of the root screen
"#;

/// Navigation tool.
pub struct GenerateNavigationTool;

impl ToolDefinition for GenerateNavigationTool {
    const NAME: &'static str = "farcaster_generate_navigation";
    const DESCRIPTION: &'static str =
        "Generate navigation patterns for Mini Apps within modal constraints";

    type Params = GenerateNavigationParams;

    #[instrument(skip_all, fields(navigation = params.navigation_type.as_str()))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        info!("Generating navigation pattern");

        let component = Template::new(params.navigation_type.component())
            .flag("backButton", params.include_back_button)
            .render()?;

        let text = Template::new(REPORT)
            .var("navigationType", params.navigation_type.as_str())
            .var("component", component)
            .var("backHook", BACK_HOOK)
            .var("css", MOBILE_CSS)
            .var("backMark", mark(params.include_back_button))
            .var("mobileMark", mark(params.mobile_optimized))
            .flag("backButton", params.include_back_button)
            .flag("mobile", params.mobile_optimized)
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
    fn test_stack_with_defaults() {
        let text = run::<GenerateNavigationTool>(json!({ "navigationType": "stack" }));
        assert!(text.starts_with("# Mini App Navigation (stack)"));
        assert!(text.contains("export function StackNavigator"));
        assert!(text.contains("useBackNavigation(stack.length > 1, pop);"));
        assert!(text.contains("min-height: 44px;"));
    }

    #[test]
    fn test_tabs_without_back_or_mobile() {
        let text = run::<GenerateNavigationTool>(json!({
            "navigationType": "tabs",
            "includeBackButton": false,
            "mobileOptimized": false
        }));
        assert!(text.contains("export function TabNavigator"));
        assert!(!text.contains("useBackNavigation"));
        assert!(!text.contains("## Mobile Styles"));
        assert!(text.contains("❌ Back button handling"));
    }

    #[test]
    fn test_every_pattern_renders() {
        for kind in ["stack", "tabs", "drawer", "simple"] {
            let text = run::<GenerateNavigationTool>(json!({ "navigationType": kind }));
            assert!(text.contains(&format!("({})", kind)));
        }
    }

    #[test]
    fn test_navigation_type_is_required() {
        assert!(GenerateNavigationTool::parse(args(json!({}))).is_err());
    }
}
