//! Authentication flow generator with session persistence.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::super::common::{default_true, success_result};
use super::super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Template, ToolError};

/// Where the session is persisted in the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum SessionStorage {
    #[default]
    LocalStorage,
    SessionStorage,
    Cookies,
    Memory,
}

impl SessionStorage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LocalStorage => "localStorage",
            Self::SessionStorage => "sessionStorage",
            Self::Cookies => "cookies",
            Self::Memory => "memory",
        }
    }

    /// A `getItem`/`setItem`/`removeItem` adapter over the backing store.
    fn adapter(self) -> &'static str {
        match self {
            Self::LocalStorage => "const sessionStore = window.localStorage;",
            Self::SessionStorage => "const sessionStore = window.sessionStorage;",
            Self::Cookies => COOKIE_ADAPTER,
            Self::Memory => MEMORY_ADAPTER,
        }
    }
}

const COOKIE_ADAPTER: &str = r#"// Cookie-backed store; keep sessions small (4KB cookie limit)
const sessionStore = {
  getItem(key: string) {
    const match = document.cookie
      .split('; ')
      .find(row => row.startsWith(key + '='));
    return match ? decodeURIComponent(match.split('=')[1]) : null;
  },
  setItem(key: string, value: string) {
    document.cookie = `${key}=${encodeURIComponent(value)}; path=/; max-age=604800; secure; samesite=strict`;
  },
  removeItem(key: string) {
    document.cookie = `${key}=; path=/; max-age=0`;
  }
};"#;

const MEMORY_ADAPTER: &str = r#"// In-memory store; sessions end when the Mini App is closed
const memory = new Map<string, string>();
const sessionStore = {
  getItem: (key: string) => memory.get(key) ?? null,
  setItem: (key: string, value: string) => { memory.set(key, value); },
  removeItem: (key: string) => { memory.delete(key); }
};"#;

/// Parameters for the authentication flow tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAuthFlowParams {
    /// Where to store user session data.
    #[serde(default)]
    pub session_storage: SessionStorage,

    /// Include user profile data fetching.
    #[serde(default = "default_true")]
    pub include_profile: bool,

    /// Automatically attempt sign-in on app load.
    #[serde(default = "default_true")]
    pub auto_sign_in: bool,
}

const AUTH_FLOW_CODE: &str = r#"// Authentication flow with session management
import { SDK } from '@farcaster/miniapp-sdk';

{{adapter}}

class FarcasterAuth {
  private sdk: SDK;
  private storageKey = 'farcaster_auth_session';

  constructor() {
    this.sdk = new SDK();
  }

  async initialize() {
{{#if autoSignIn}}
    // Attempt auto sign-in on app load
    const existingSession = this.getSession();
    if (existingSession && this.isSessionValid(existingSession)) {
      return existingSession;
    }
{{/if}}
    return null;
  }

  async signIn() {
    try {
      const authData = await this.sdk.actions.signIn();

      const session = {
        fid: authData.fid,
        username: authData.username,
        displayName: authData.displayName,
        pfpUrl: authData.pfpUrl,
{{#if includeProfile}}
        profile: await this.fetchProfile(authData.fid),
{{/if}}
        timestamp: Date.now(),
        expiresAt: Date.now() + (7 * 24 * 60 * 60 * 1000) // 7 days
      };

      this.setSession(session);
      return session;
    } catch (error) {
      console.error('Sign in failed:', error);
      throw error;
    }
  }

  signOut() {
    this.clearSession();
    // Optionally notify app of sign out
    window.dispatchEvent(new CustomEvent('farcaster:signout'));
  }

  getSession() {
    try {
      const stored = sessionStore.getItem(this.storageKey);
      return stored ? JSON.parse(stored) : null;
    } catch {
      return null;
    }
  }

  private setSession(session: any) {
    sessionStore.setItem(this.storageKey, JSON.stringify(session));

    // Notify app of sign in
    window.dispatchEvent(new CustomEvent('farcaster:signin', { detail: session }));
  }

  private clearSession() {
    sessionStore.removeItem(this.storageKey);
  }

  private isSessionValid(session: any): boolean {
    return session.expiresAt > Date.now();
  }
{{#if includeProfile}}

  private async fetchProfile(fid: number) {
    // Fetch additional profile data if needed
    return {
      bio: '',
      followerCount: 0,
      followingCount: 0,
      verifications: []
    };
  }
{{/if}}
}

// Usage
const auth = new FarcasterAuth();

// Initialize auth on app load
auth.initialize().then(session => {
  if (session) {
    console.log('User already signed in:', session);
  }
});

// Listen for auth events
window.addEventListener('farcaster:signin', (event) => {
  console.log('User signed in:', event.detail);
});

window.addEventListener('farcaster:signout', () => {
  console.log('User signed out');
});"#;

const REPORT: &str = r#"# Complete Authentication Flow

## Session Management: {{storage}}
## Auto Sign-in: {{#if autoSignIn}}Enabled{{else}}Disabled{{/if}}
## Profile Data: {{#if includeProfile}}Included{{else}}Basic only{{/if}}

## Implementation:
```typescript
{{code}}
```

## React Hook Integration:
```tsx
import { useState, useEffect } from 'react';

function useAuth() {
  const [user, setUser] = useState(null);
  const [loading, setLoading] = useState(true);

  useEffect(() => {
    const auth = new FarcasterAuth();

    auth.initialize().then(session => {
      setUser(session);
      setLoading(false);
    });

    const handleSignIn = (event) => setUser(event.detail);
    const handleSignOut = () => setUser(null);

    window.addEventListener('farcaster:signin', handleSignIn);
    window.addEventListener('farcaster:signout', handleSignOut);

    return () => {
      window.removeEventListener('farcaster:signin', handleSignIn);
      window.removeEventListener('farcaster:signout', handleSignOut);
    };
  }, []);

  return { user, loading };
}
```

## Features:
✅ Session persistence
✅ Automatic expiration
✅ Event-driven updates
✅ Profile data integration
✅ Error handling
"#;

/// Authentication flow tool.
pub struct GenerateAuthFlowTool;

impl ToolDefinition for GenerateAuthFlowTool {
    const NAME: &'static str = "farcaster_generate_auth_flow";
    const DESCRIPTION: &'static str =
        "Generate complete authentication flow with user session management";

    type Params = GenerateAuthFlowParams;

    #[instrument(skip_all, fields(storage = params.session_storage.as_str()))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        info!("Generating authentication flow");

        let code = Template::new(AUTH_FLOW_CODE)
            .var("adapter", params.session_storage.adapter())
            .flag("autoSignIn", params.auto_sign_in)
            .flag("includeProfile", params.include_profile)
            .render()?;

        let text = Template::new(REPORT)
            .var("storage", params.session_storage.as_str())
            .var("code", code)
            .flag("autoSignIn", params.auto_sign_in)
            .flag("includeProfile", params.include_profile)
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
        let text = run::<GenerateAuthFlowTool>(json!({}));
        assert!(text.contains("## Session Management: localStorage"));
        assert!(text.contains("## Auto Sign-in: Enabled"));
        assert!(text.contains("const sessionStore = window.localStorage;"));
        assert!(text.contains("profile: await this.fetchProfile(authData.fid),"));
    }

    #[test]
    fn test_cookie_storage_without_profile() {
        let text = run::<GenerateAuthFlowTool>(json!({
            "sessionStorage": "cookies",
            "includeProfile": false,
            "autoSignIn": false
        }));
        assert!(text.contains("document.cookie"));
        assert!(text.contains("## Profile Data: Basic only"));
        assert!(text.contains("## Auto Sign-in: Disabled"));
        assert!(!text.contains("fetchProfile"));
        assert!(!text.contains("existingSession"));
    }

    #[test]
    fn test_memory_storage() {
        let text = run::<GenerateAuthFlowTool>(json!({ "sessionStorage": "memory" }));
        assert!(text.contains("new Map<string, string>()"));
    }
}
