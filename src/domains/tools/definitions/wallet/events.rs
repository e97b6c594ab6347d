//! Wallet event handling generator.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::super::common::{default_true, success_result};
use super::super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Template, ToolError};

/// Wallet lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum WalletEvent {
    Connect,
    Disconnect,
    AccountsChanged,
    ChainChanged,
}

impl WalletEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Disconnect => "disconnect",
            Self::AccountsChanged => "accountsChanged",
            Self::ChainChanged => "chainChanged",
        }
    }
}

/// Parameters for the wallet events tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HandleWalletEventsParams {
    /// Wallet events to handle.
    #[serde(default = "default_events")]
    pub events: Vec<WalletEvent>,

    /// Include comprehensive error handling.
    #[serde(default = "default_true")]
    pub include_error_handling: bool,

    /// Include event logging for debugging.
    #[serde(default = "default_true")]
    pub include_logging: bool,
}

fn default_events() -> Vec<WalletEvent> {
    vec![
        WalletEvent::Connect,
        WalletEvent::Disconnect,
        WalletEvent::ChainChanged,
    ]
}

const HANDLERS: &str = r#"import { useAccount, useChainId } from 'wagmi';
import { useEffect } from 'react';

function WalletEventHandler() {
  const { address, isConnected, connector } = useAccount();
  const chainId = useChainId();
{{#if connect}}

  useEffect(() => {
    if (isConnected && address) {
{{#if logging}}
      console.log('Wallet connected:', { address, connector: connector?.name });
{{/if}}

      // Handle wallet connection
      onWalletConnected({
        address,
        connector: connector?.name,
        chainId
      });
    }
  }, [isConnected, address, connector]);
{{/if}}
{{#if disconnect}}

  useEffect(() => {
    if (!isConnected) {
{{#if logging}}
      console.log('Wallet disconnected');
{{/if}}

      // Handle wallet disconnection
      onWalletDisconnected();
    }
  }, [isConnected]);
{{/if}}
{{#if chainChanged}}

  useEffect(() => {
{{#if logging}}
    console.log('Chain changed to:', chainId);
{{/if}}

    // Handle chain change
    onChainChanged(chainId);
  }, [chainId]);
{{/if}}
{{#if accountsChanged}}

  useEffect(() => {
{{#if logging}}
    console.log('Account changed to:', address);
{{/if}}

    // Handle account change
    if (address) {
      onAccountChanged(address);
    }
  }, [address]);
{{/if}}

  return null;
}

// Event handler functions
function onWalletConnected(walletInfo: any) {
  // Store wallet connection state
  localStorage.setItem('wallet_connected', 'true');
  localStorage.setItem('wallet_info', JSON.stringify(walletInfo));

  // Update app state
  window.dispatchEvent(new CustomEvent('wallet:connected', { detail: walletInfo }));
}

function onWalletDisconnected() {
  // Clear wallet state
  localStorage.removeItem('wallet_connected');
  localStorage.removeItem('wallet_info');

  // Update app state
  window.dispatchEvent(new CustomEvent('wallet:disconnected'));
}

function onChainChanged(chainId: number) {
  const supportedChains = [1, 8453, 10]; // mainnet, base, optimism

  if (!supportedChains.includes(chainId)) {
    // Show unsupported network warning
    showNetworkWarning(chainId);
  } else {
    // Update chain-specific settings
    updateChainSettings(chainId);
  }

  window.dispatchEvent(new CustomEvent('wallet:chainChanged', { detail: { chainId } }));
}

function onAccountChanged(address: string) {
  // Update user session with new address
  updateUserSession(address);

  window.dispatchEvent(new CustomEvent('wallet:accountChanged', { detail: { address } }));
}"#;

const REPORT: &str = r#"# Wallet Event Handling

## Events Monitored:
{{events}}

## Event Handler Implementation:
```typescript
{{handlers}}
```
{{#if errorHandling}}

## Error Handling:
```typescript
import { useEffect } from 'react';
import { useConnect } from 'wagmi';

function WalletErrorHandler() {
  const { error } = useConnect();

  useEffect(() => {
    if (error) {
      handleWalletError(error);
    }
  }, [error]);

  return null;
}

function handleWalletError(error: any) {
{{#if logging}}
  console.error('Wallet error:', error);
{{/if}}

  let message = 'An error occurred with your wallet';

  switch (error.code) {
    case 'USER_REJECTED_REQUEST':
      message = 'Connection request was cancelled';
      break;
    case 'UNAUTHORIZED':
      message = 'Please authorize the connection in your wallet';
      break;
    case 'UNSUPPORTED_METHOD':
      message = 'This wallet doesn\'t support this action';
      break;
    case 'DISCONNECTED':
      message = 'Wallet connection was lost';
      break;
    case 'CHAIN_NOT_ADDED':
      message = 'Please add this network to your wallet';
      break;
    default:
      if (error.message) {
        message = error.message;
      }
  }

  // Show user-friendly error message
  showErrorNotification(message);

  // Report error for debugging
  reportError({
    type: 'wallet_error',
    code: error.code,
    message: error.message,
    timestamp: Date.now()
  });
}
```
{{/if}}

## React Hook for Global Events:
```typescript
import { useEffect } from 'react';

function useWalletEvents() {
  useEffect(() => {
    const handleWalletConnected = (event: CustomEvent) => {
      console.log('App: Wallet connected', event.detail);
      // Update global state
    };

    const handleWalletDisconnected = () => {
      console.log('App: Wallet disconnected');
      // Clear user data, redirect if needed
    };

    const handleChainChanged = (event: CustomEvent) => {
      console.log('App: Chain changed', event.detail);
      // Update UI for new chain
    };

    window.addEventListener('wallet:connected', handleWalletConnected);
    window.addEventListener('wallet:disconnected', handleWalletDisconnected);
    window.addEventListener('wallet:chainChanged', handleChainChanged);

    return () => {
      window.removeEventListener('wallet:connected', handleWalletConnected);
      window.removeEventListener('wallet:disconnected', handleWalletDisconnected);
      window.removeEventListener('wallet:chainChanged', handleChainChanged);
    };
  }, []);
}
```

## Utility Functions:
```typescript
function showNetworkWarning(chainId: number) {
  const notification = document.createElement('div');
  notification.className = 'network-warning';
  notification.innerHTML = `
    <p>Unsupported network detected (Chain ID: ${chainId})</p>
    <button onclick="this.parentElement.remove()">Dismiss</button>
  `;
  document.body.appendChild(notification);
}

function updateChainSettings(chainId: number) {
  // Update chain-specific configuration
  const chainConfig = getChainConfig(chainId);
  localStorage.setItem('current_chain', chainId.toString());
  localStorage.setItem('chain_config', JSON.stringify(chainConfig));
}

function reportError(errorData: any) {
  // Send to analytics or error reporting service
  if (process.env.NODE_ENV === 'production') {
    // analytics.track('wallet_error', errorData);
  }
}
```

## Features:
{{#if logging}}✅ Event logging{{else}}❌ Event logging (disabled){{/if}}
{{#if errorHandling}}✅ Error handling{{else}}❌ Error handling (disabled){{/if}}
✅ Custom event system
✅ Persistent state management
✅ User-friendly notifications
"#;

/// Wallet event handling tool.
pub struct HandleWalletEventsTool;

impl ToolDefinition for HandleWalletEventsTool {
    const NAME: &'static str = "farcaster_handle_wallet_events";
    const DESCRIPTION: &'static str =
        "Generate wallet event handling code (connection, disconnection, chain changes)";

    type Params = HandleWalletEventsParams;

    #[instrument(skip_all, fields(events = params.events.len()))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        info!("Generating wallet event handlers");

        let has = |event| params.events.contains(&event);
        let handlers = Template::new(HANDLERS)
            .flag("connect", has(WalletEvent::Connect))
            .flag("disconnect", has(WalletEvent::Disconnect))
            .flag("chainChanged", has(WalletEvent::ChainChanged))
            .flag("accountsChanged", has(WalletEvent::AccountsChanged))
            .flag("logging", params.include_logging)
            .render()?;

        let events = params
            .events
            .iter()
            .map(|e| format!("✅ {}", e.as_str()))
            .collect::<Vec<_>>()
            .join("\n");

        let text = Template::new(REPORT)
            .var("events", events)
            .var("handlers", handlers)
            .flag("errorHandling", params.include_error_handling)
            .flag("logging", params.include_logging)
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
        let text = run::<HandleWalletEventsTool>(json!({}));
        assert!(text.contains("✅ connect\n✅ disconnect\n✅ chainChanged"));
        assert!(text.contains("console.log('Wallet connected:'"));
        assert!(text.contains("onChainChanged(chainId);"));
        assert!(!text.contains("onAccountChanged(address);\n    }"));
        assert!(text.contains("## Error Handling:"));
    }

    #[test]
    fn test_accounts_changed_without_logging() {
        let text = run::<HandleWalletEventsTool>(json!({
            "events": ["accountsChanged"],
            "includeLogging": false,
            "includeErrorHandling": false
        }));
        assert!(text.contains("✅ accountsChanged"));
        assert!(text.contains("onAccountChanged(address);\n    }"));
        assert!(!text.contains("console.log('Account changed to:'"));
        assert!(!text.contains("## Error Handling:"));
        assert!(text.contains("❌ Event logging (disabled)"));
    }
}
