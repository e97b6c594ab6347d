//! Sign In With Farcaster code generator.
//!
//! Two paths: Quick Auth, where the Farcaster client handles the whole
//! exchange, and a custom flow where the app issues a nonce and verifies the
//! signed message on its own backend.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::super::common::{Framework, default_true, success_result};
use super::super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Template, ToolError};

/// Backend that verifies sign-in messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AuthBackend {
    Express,
    NextjsApi,
    Fastify,
    #[default]
    None,
}

impl AuthBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Express => "express",
            Self::NextjsApi => "nextjs-api",
            Self::Fastify => "fastify",
            Self::None => "none",
        }
    }
}

/// Parameters for the SIWF tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImplementSiwfParams {
    /// Frontend framework to generate code for.
    pub framework: Framework,

    /// Backend framework for auth handling.
    #[serde(default)]
    pub backend: AuthBackend,

    /// Use Farcaster Quick Auth service instead of custom SIWF.
    #[serde(default = "default_true")]
    pub use_quick_auth: bool,
}

const QUICK_AUTH_CODE: &str = r#"import { SDK } from '@farcaster/miniapp-sdk';

const sdk = new SDK();

// Quick Auth Implementation
async function signInWithFarcaster() {
  try {
    const authData = await sdk.actions.signIn();

    // Store user session
    const userSession = {
      fid: authData.fid,
      username: authData.username,
      displayName: authData.displayName,
      pfpUrl: authData.pfpUrl,
      isAuthenticated: true,
      timestamp: Date.now()
    };

    localStorage.setItem('farcaster_session', JSON.stringify(userSession));

    return userSession;
  } catch (error) {
    console.error('Authentication failed:', error);
    throw error;
  }
}

// Check existing session
function getAuthenticatedUser() {
  try {
    const session = localStorage.getItem('farcaster_session');
    return session ? JSON.parse(session) : null;
  } catch {
    return null;
  }
}

// Sign out
function signOut() {
  localStorage.removeItem('farcaster_session');
  window.location.reload();
}"#;

const REACT_COMPONENT: &str = r#"## React Component Example:
```tsx
import React, { useState, useEffect } from 'react';

function AuthComponent() {
  const [user, setUser] = useState(null);
  const [loading, setLoading] = useState(false);

  useEffect(() => {
    const existingUser = getAuthenticatedUser();
    if (existingUser) {
      setUser(existingUser);
    }
  }, []);

  const handleSignIn = async () => {
    setLoading(true);
    try {
      const userData = await signInWithFarcaster();
      setUser(userData);
    } catch (error) {
      alert('Failed to sign in');
    } finally {
      setLoading(false);
    }
  };

  const handleSignOut = () => {
    signOut();
    setUser(null);
  };

  if (user) {
    return (
      <div className="auth-container">
        <div className="user-info">
          <img src={user.pfpUrl} alt={user.displayName} width="40" height="40" />
          <div>
            <h3>{user.displayName}</h3>
            <p>@{user.username}</p>
          </div>
        </div>
        <button onClick={handleSignOut}>Sign Out</button>
      </div>
    );
  }

  return (
    <div className="auth-container">
      <button onClick={handleSignIn} disabled={loading}>
        {loading ? 'Signing in...' : 'Sign in with Farcaster'}
      </button>
    </div>
  );
}
```"#;

const VUE_COMPONENT: &str = r#"## Vue Component Example:
```vue
<script setup>
import { ref, onMounted } from 'vue';

const user = ref(null);
const loading = ref(false);

onMounted(() => {
  user.value = getAuthenticatedUser();
});

async function handleSignIn() {
  loading.value = true;
  try {
    user.value = await signInWithFarcaster();
  } catch (error) {
    alert('Failed to sign in');
  } finally {
    loading.value = false;
  }
}
</script>

<template>
  <div class="auth-container">
    <div v-if="user" class="user-info">
      <img :src="user.pfpUrl" :alt="user.displayName" width="40" height="40" />
      <h3>{{ user.displayName }}</h3>
      <button @click="signOut">Sign Out</button>
    </div>
    <button v-else :disabled="loading" @click="handleSignIn">
      {{ loading ? 'Signing in...' : 'Sign in with Farcaster' }}
    </button>
  </div>
</template>
```"#;

const VANILLA_COMPONENT: &str = r#"## Vanilla JS Example:
```javascript
const container = document.getElementById('auth');

function render(user) {
  container.innerHTML = user
    ? `<p>Signed in as @${user.username}</p><button id="signout">Sign Out</button>`
    : `<button id="signin">Sign in with Farcaster</button>`;

  container.querySelector('#signin')?.addEventListener('click', async () => {
    render(await signInWithFarcaster());
  });
  container.querySelector('#signout')?.addEventListener('click', signOut);
}

render(getAuthenticatedUser());
```"#;

const QUICK_AUTH_REPORT: &str = r#"# Quick Auth Implementation ({{framework}})

## Authentication Code:
```javascript
{{code}}
```

{{component}}

## Benefits of Quick Auth:
✅ Simple integration
✅ No backend required
✅ Farcaster-hosted authentication
✅ Automatic session management
✅ Mobile optimized
"#;

const CUSTOM_CLIENT: &str = r#"import { SDK } from '@farcaster/miniapp-sdk';

const sdk = new SDK();

async function signInWithFarcaster() {
  // 1. Ask the backend for a single-use nonce
  const { nonce } = await fetch('/api/auth/nonce').then(res => res.json());

  // 2. Let the Farcaster client sign a SIWF message bound to that nonce
  const { message, signature } = await sdk.actions.signIn({ nonce });

  // 3. Verify the signature server-side and receive a session
  const res = await fetch('/api/auth/verify', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({ message, signature, nonce })
  });

  if (!res.ok) {
    throw new Error('Sign-in verification failed');
  }

  return res.json();
}"#;

const EXPRESS_SERVER: &str = r#"import express from 'express';
import crypto from 'node:crypto';
import { createAppClient, viemConnector } from '@farcaster/auth-client';

const app = express();
app.use(express.json());

const appClient = createAppClient({ ethereum: viemConnector() });
const nonces = new Set();

app.get('/api/auth/nonce', (req, res) => {
  const nonce = crypto.randomBytes(16).toString('hex');
  nonces.add(nonce);
  res.json({ nonce });
});

app.post('/api/auth/verify', async (req, res) => {
  const { message, signature, nonce } = req.body;
  if (!nonces.delete(nonce)) {
    return res.status(401).json({ error: 'Unknown or reused nonce' });
  }

  const { success, fid } = await appClient.verifySignInMessage({
    message,
    signature,
    domain: req.hostname,
    nonce
  });

  if (!success) {
    return res.status(401).json({ error: 'Invalid signature' });
  }

  res.json({ fid, isAuthenticated: true });
});"#;

const NEXTJS_SERVER: &str = r#"// app/api/auth/nonce/route.ts
import crypto from 'node:crypto';
import { NextResponse } from 'next/server';
import { cookies } from 'next/headers';

export async function GET() {
  const nonce = crypto.randomBytes(16).toString('hex');
  cookies().set('siwf_nonce', nonce, { httpOnly: true, secure: true, sameSite: 'strict' });
  return NextResponse.json({ nonce });
}

// app/api/auth/verify/route.ts
import { createAppClient, viemConnector } from '@farcaster/auth-client';

const appClient = createAppClient({ ethereum: viemConnector() });

export async function POST(request: Request) {
  const { message, signature, nonce } = await request.json();
  if (cookies().get('siwf_nonce')?.value !== nonce) {
    return NextResponse.json({ error: 'Nonce mismatch' }, { status: 401 });
  }

  const { success, fid } = await appClient.verifySignInMessage({
    message,
    signature,
    domain: new URL(request.url).hostname,
    nonce
  });

  if (!success) {
    return NextResponse.json({ error: 'Invalid signature' }, { status: 401 });
  }

  cookies().delete('siwf_nonce');
  return NextResponse.json({ fid, isAuthenticated: true });
}"#;

const FASTIFY_SERVER: &str = r#"import Fastify from 'fastify';
import crypto from 'node:crypto';
import { createAppClient, viemConnector } from '@farcaster/auth-client';

const fastify = Fastify();
const appClient = createAppClient({ ethereum: viemConnector() });
const nonces = new Set();

fastify.get('/api/auth/nonce', async () => {
  const nonce = crypto.randomBytes(16).toString('hex');
  nonces.add(nonce);
  return { nonce };
});

fastify.post('/api/auth/verify', async (request, reply) => {
  const { message, signature, nonce } = request.body;
  if (!nonces.delete(nonce)) {
    return reply.code(401).send({ error: 'Unknown or reused nonce' });
  }

  const { success, fid } = await appClient.verifySignInMessage({
    message,
    signature,
    domain: request.hostname,
    nonce
  });

  if (!success) {
    return reply.code(401).send({ error: 'Invalid signature' });
  }

  return { fid, isAuthenticated: true };
});"#;

const CUSTOM_REPORT: &str = r#"# Custom SIWF Implementation ({{framework}}, backend: {{backend}})

## Client Code:
```javascript
{{client}}
```
{{#if server}}

## Server Code:
```typescript
{{server}}
```
{{else}}

## ⚠️ No Backend Selected
Signatures must be verified on a server you control. Choose `express`,
`nextjs-api` or `fastify` as the backend, or use Quick Auth instead.
{{/if}}

## Flow:
1. Client requests a nonce from the backend
2. Farcaster client signs a SIWF message containing the nonce
3. Backend verifies the signature and the nonce, then creates a session
4. Nonces are single-use to prevent replay

## Security Notes:
- Always verify the message domain matches your app
- Reject expired or reused nonces
- Store sessions in httpOnly cookies where possible
"#;

/// SIWF implementation tool.
pub struct ImplementSiwfTool;

impl ToolDefinition for ImplementSiwfTool {
    const NAME: &'static str = "farcaster_implement_siwf";
    const DESCRIPTION: &'static str = "Generate Sign In With Farcaster (SIWF) implementation code";

    type Params = ImplementSiwfParams;

    #[instrument(skip_all, fields(framework = params.framework.as_str(), quick_auth = params.use_quick_auth))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        info!("Generating SIWF implementation");

        let text = if params.use_quick_auth {
            let component = match params.framework {
                Framework::React | Framework::Next => REACT_COMPONENT,
                Framework::Vue => VUE_COMPONENT,
                Framework::Vanilla => VANILLA_COMPONENT,
            };
            Template::new(QUICK_AUTH_REPORT)
                .var("framework", params.framework.as_str())
                .var("code", QUICK_AUTH_CODE)
                .var("component", component)
                .render()?
        } else {
            let server = match params.backend {
                AuthBackend::Express => EXPRESS_SERVER,
                AuthBackend::NextjsApi => NEXTJS_SERVER,
                AuthBackend::Fastify => FASTIFY_SERVER,
                AuthBackend::None => "",
            };
            Template::new(CUSTOM_REPORT)
                .var("framework", params.framework.as_str())
                .var("backend", params.backend.as_str())
                .var("client", CUSTOM_CLIENT)
                .var("server", server)
                .render()?
        };

        Ok(success_result(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::test_support::{args, context, run};
    use serde_json::json;

    #[test]
    fn test_quick_auth_react() {
        let text = run::<ImplementSiwfTool>(json!({ "framework": "react" }));
        assert!(text.starts_with("# Quick Auth Implementation (react)"));
        assert!(text.contains("sdk.actions.signIn()"));
        assert!(text.contains("## React Component Example:"));
    }

    #[test]
    fn test_quick_auth_vue_keeps_mustaches() {
        let text = run::<ImplementSiwfTool>(json!({ "framework": "vue" }));
        assert!(text.contains("{{ user.displayName }}"));
    }

    #[test]
    fn test_custom_flow_with_express() {
        let text = run::<ImplementSiwfTool>(json!({
            "framework": "next",
            "backend": "express",
            "useQuickAuth": false
        }));
        assert!(text.contains("backend: express"));
        assert!(text.contains("verifySignInMessage"));
        assert!(!text.contains("No Backend Selected"));
    }

    #[test]
    fn test_custom_flow_without_backend_warns() {
        let text = run::<ImplementSiwfTool>(json!({
            "framework": "vanilla",
            "useQuickAuth": false
        }));
        assert!(text.contains("No Backend Selected"));
        assert!(!text.contains("## Server Code:"));
    }

    #[test]
    fn test_framework_is_required() {
        let err = ImplementSiwfTool::call(args(json!({})), &context()).unwrap_err();
        assert!(err.to_string().contains("missing field `framework`"));
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let result = ImplementSiwfTool::call(
            args(json!({ "framework": "react", "backend": "django" })),
            &context(),
        );
        assert!(matches!(result, Err(ToolError::MalformedArguments { .. })));
    }
}
