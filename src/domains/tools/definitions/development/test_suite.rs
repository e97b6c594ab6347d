//! Test suite generator.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::super::common::{bullet_list, default_true, mark, success_result};
use super::super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Template, ToolError};

/// Testing framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TestFramework {
    Jest,
    Vitest,
    Playwright,
    Cypress,
}

impl TestFramework {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jest => "jest",
            Self::Vitest => "vitest",
            Self::Playwright => "playwright",
            Self::Cypress => "cypress",
        }
    }

    /// Browser runners drive a real page instead of rendering into jsdom.
    fn is_browser(self) -> bool {
        matches!(self, Self::Playwright | Self::Cypress)
    }
}

/// Kind of test to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    Unit,
    Integration,
    E2e,
    Sdk,
}

impl TestType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Integration => "integration",
            Self::E2e => "e2e",
            Self::Sdk => "sdk",
        }
    }
}

/// Parameters for the test suite tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTestSuiteParams {
    /// Testing framework to use.
    pub test_framework: TestFramework,

    /// Types of tests to generate.
    #[serde(default = "default_test_types")]
    pub test_types: Vec<TestType>,

    /// Include SDK mocking utilities.
    #[serde(rename = "mockSDK", default = "default_true")]
    pub mock_sdk: bool,

    /// Include authentication flow tests.
    #[serde(default = "default_true")]
    pub test_auth: bool,
}

fn default_test_types() -> Vec<TestType> {
    vec![TestType::Unit, TestType::Integration]
}

const SDK_MOCK: &str = r#"// test/mocks/sdk.ts
{{#if vitest}}
import { vi } from 'vitest';

{{/if}}
export const mockSdk = {
  actions: {
    ready: {{mock}}.fn().mockResolvedValue(undefined),
    close: {{mock}}.fn().mockResolvedValue(undefined),
    openUrl: {{mock}}.fn().mockResolvedValue(undefined),
    signIn: {{mock}}.fn().mockResolvedValue({
      message: 'example.com wants you to sign in...',
      signature: '0xsignature',
    }),
    composeCast: {{mock}}.fn().mockResolvedValue(undefined),
  },
  context: Promise.resolve({
    user: { fid: 1234, username: 'tester', displayName: 'Test User' },
  }),
  wallet: { ethProvider: { request: {{mock}}.fn() } },
  quickAuth: { getToken: {{mock}}.fn().mockResolvedValue({ token: 'test-token' }) },
  on: {{mock}}.fn(),
  off: {{mock}}.fn(),
  removeAllListeners: {{mock}}.fn(),
};

{{mock}}.mock('@farcaster/miniapp-sdk', () => ({ default: mockSdk, sdk: mockSdk }));"#;

const UNIT_TESTS: &str = r#"// src/__tests__/App.test.tsx
{{#if vitest}}
import { describe, it, expect, beforeEach, vi } from 'vitest';
{{/if}}
import { render, screen, waitFor } from '@testing-library/react';
{{#if mockSdk}}
import { mockSdk } from '../../test/mocks/sdk';
{{/if}}
import App from '../App';

describe('App', () => {
{{#if mockSdk}}
  beforeEach(() => {{mock}}.clearAllMocks());

{{/if}}
{{#if unit}}
  it('renders the loading state first', () => {
    render(<App />);
    expect(screen.getByText(/loading/i)).toBeTruthy();
  });

{{/if}}
{{#if integration}}
  it('shows the user once the SDK context resolves', async () => {
    render(<App />);
    await waitFor(() => expect(screen.getByText(/tester/)).toBeTruthy());
  });

{{/if}}
{{#if sdk}}
  it('signals ready exactly once', async () => {
    render(<App />);
    await waitFor(() => expect(mockSdk.actions.ready).toHaveBeenCalledTimes(1));
  });

  it('surfaces SDK initialization failures', async () => {
    mockSdk.actions.ready.mockRejectedValueOnce(new Error('INIT_FAILED'));
    render(<App />);
    await waitFor(() => expect(screen.getByText(/INIT_FAILED/)).toBeTruthy());
  });

{{/if}}
{{#if auth}}
  it('signs in with Farcaster', async () => {
    render(<App />);
    screen.getByRole('button', { name: /sign in/i }).click();
    await waitFor(() => expect(mockSdk.actions.signIn).toHaveBeenCalled());
  });

{{/if}}
});"#;

const PLAYWRIGHT_SPEC: &str = r#"// e2e/miniapp.spec.ts
import { test, expect } from '@playwright/test';
{{#if mockSdk}}

// Stub the host bridge before the app boots
test.beforeEach(async ({ page }) => {
  await page.addInitScript(() => {
    (window as any).__FARCASTER_TEST__ = {
      user: { fid: 1234, username: 'tester' },
    };
  });
});
{{/if}}
{{#if unit}}

test('home page renders', async ({ page }) => {
  await page.goto('/');
  await expect(page.locator('h1')).toBeVisible();
});
{{/if}}
{{#if integration}}

test('navigates between screens', async ({ page }) => {
  await page.goto('/');
  await page.getByRole('button').first().click();
  await expect(page).not.toHaveURL(/error/);
});
{{/if}}
{{#if e2e}}

test('fits the mobile modal viewport', async ({ page }) => {
  await page.setViewportSize({ width: 424, height: 695 });
  await page.goto('/');
  const overflow = await page.evaluate(
    () => document.documentElement.scrollWidth > window.innerWidth
  );
  expect(overflow).toBe(false);
});
{{/if}}
{{#if sdk}}

test('serves the manifest', async ({ request }) => {
  const response = await request.get('/.well-known/farcaster.json');
  expect(response.ok()).toBe(true);
  const manifest = await response.json();
  expect(manifest.miniapp ?? manifest.frame).toBeTruthy();
});
{{/if}}
{{#if auth}}

test('shows sign in button', async ({ page }) => {
  await page.goto('/');
  await expect(page.getByRole('button', { name: /sign in/i })).toBeVisible();
});
{{/if}}"#;

const CYPRESS_SPEC: &str = r#"// cypress/e2e/miniapp.cy.ts
describe('Mini App', () => {
{{#if mockSdk}}
  beforeEach(() => {
    cy.visit('/', {
      onBeforeLoad(win) {
        (win as any).__FARCASTER_TEST__ = { user: { fid: 1234, username: 'tester' } };
      },
    });
  });

{{else}}
  beforeEach(() => cy.visit('/'));

{{/if}}
{{#if unit}}
  it('renders the home page', () => {
    cy.get('h1').should('be.visible');
  });

{{/if}}
{{#if integration}}
  it('navigates between screens', () => {
    cy.get('button').first().click();
    cy.url().should('not.include', 'error');
  });

{{/if}}
{{#if e2e}}
  it('fits the mobile modal viewport', () => {
    cy.viewport(424, 695);
    cy.document().its('documentElement.scrollWidth').should('be.lte', 424);
  });

{{/if}}
{{#if sdk}}
  it('serves the manifest', () => {
    cy.request('/.well-known/farcaster.json').its('status').should('eq', 200);
  });

{{/if}}
{{#if auth}}
  it('shows sign in button', () => {
    cy.contains('button', /sign in/i).should('be.visible');
  });

{{/if}}
});"#;

const REPORT: &str = r#"# Test Suite Generation ({{framework}})

## Test Types:
{{types}}
{{#if mockSdk}}

## SDK Mock:
```typescript
{{sdkMock}}
```
{{/if}}

## Tests:
```tsx
{{tests}}
```
{{#if e2eNote}}

## End-to-End Tests:
End-to-end tests need a real browser. Add Playwright alongside {{framework}}:
```bash
npm install -D @playwright/test
npx playwright test
```
{{/if}}

## Configuration:
{{mockMark}} SDK mocking
{{authMark}} Authentication flow tests

## Run:
```bash
{{command}}
```
"#;

/// Test suite tool.
pub struct GenerateTestSuiteTool;

impl ToolDefinition for GenerateTestSuiteTool {
    const NAME: &'static str = "farcaster_generate_test_suite";
    const DESCRIPTION: &'static str = "Generate comprehensive test suite for Mini App functionality";

    type Params = GenerateTestSuiteParams;

    #[instrument(skip_all, fields(framework = params.test_framework.as_str()))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        info!("Generating test suite");

        let framework = params.test_framework;
        let has = |kind| params.test_types.contains(&kind);
        // Browser runners stub the host in the page, so the module mock only
        // applies to jsdom runners.
        let module_mock = params.mock_sdk && !framework.is_browser();

        let source = match framework {
            TestFramework::Jest | TestFramework::Vitest => UNIT_TESTS,
            TestFramework::Playwright => PLAYWRIGHT_SPEC,
            TestFramework::Cypress => CYPRESS_SPEC,
        };
        let mock = if framework == TestFramework::Vitest { "vi" } else { "jest" };

        let bind = |source: &'static str| {
            Template::new(source)
                .var("mock", mock)
                .flag("vitest", framework == TestFramework::Vitest)
                .flag("unit", has(TestType::Unit))
                .flag("integration", has(TestType::Integration))
                .flag("e2e", has(TestType::E2e))
                .flag("sdk", has(TestType::Sdk))
                .flag("auth", params.test_auth)
        };

        let tests = bind(source)
            .flag("mockSdk", params.mock_sdk)
            .render()?;
        let sdk_mock = if module_mock {
            bind(SDK_MOCK).render()?
        } else {
            String::new()
        };

        let command = match framework {
            TestFramework::Jest => "npx jest",
            TestFramework::Vitest => "npx vitest run",
            TestFramework::Playwright => "npx playwright test",
            TestFramework::Cypress => "npx cypress run",
        };

        let types = bullet_list(params.test_types.iter().map(|t| t.as_str()));

        let text = Template::new(REPORT)
            .var("framework", framework.as_str())
            .var("types", types)
            .var("sdkMock", sdk_mock)
            .var("tests", tests)
            .var("mockMark", mark(params.mock_sdk))
            .var("authMark", mark(params.test_auth))
            .var("command", command)
            .flag("mockSdk", module_mock)
            .flag("e2eNote", has(TestType::E2e) && !framework.is_browser())
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
    fn test_vitest_defaults() {
        let text = run::<GenerateTestSuiteTool>(json!({ "testFramework": "vitest" }));
        assert!(text.starts_with("# Test Suite Generation (vitest)"));
        assert!(text.contains("ready: vi.fn().mockResolvedValue(undefined),"));
        assert!(text.contains("vi.mock('@farcaster/miniapp-sdk'"));
        assert!(text.contains("it('renders the loading state first'"));
        assert!(text.contains("it('signs in with Farcaster'"));
        assert!(!text.contains("signals ready exactly once"));
        assert!(text.contains("npx vitest run"));
    }

    #[test]
    fn test_jest_without_mock_or_auth() {
        let text = run::<GenerateTestSuiteTool>(json!({
            "testFramework": "jest",
            "testTypes": ["sdk", "e2e"],
            "mockSDK": false,
            "testAuth": false
        }));
        assert!(!text.contains("## SDK Mock"));
        assert!(!text.contains("jest.clearAllMocks"));
        assert!(text.contains("signals ready exactly once"));
        assert!(text.contains("## End-to-End Tests"));
        assert!(!text.contains("signs in with Farcaster"));
    }

    #[test]
    fn test_browser_runners() {
        let playwright = run::<GenerateTestSuiteTool>(json!({
            "testFramework": "playwright",
            "testTypes": ["e2e"]
        }));
        assert!(playwright.contains("import { test, expect } from '@playwright/test';"));
        assert!(playwright.contains("fits the mobile modal viewport"));
        assert!(playwright.contains("page.addInitScript"));
        assert!(!playwright.contains("## SDK Mock"));

        let cypress = run::<GenerateTestSuiteTool>(json!({ "testFramework": "cypress" }));
        assert!(cypress.contains("cy.visit('/', {"));
        assert!(cypress.contains("npx cypress run"));
    }

    #[test]
    fn test_framework_is_required() {
        assert!(GenerateTestSuiteTool::parse(args(json!({}))).is_err());
    }
}
