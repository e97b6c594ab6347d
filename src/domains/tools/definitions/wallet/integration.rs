//! Wallet integration setup using Wagmi and the Mini App connector.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::super::common::{UiFramework, success_result};
use super::super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Template, ToolError};

/// Network a wallet integration can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletChain {
    Ethereum,
    Base,
    Optimism,
    Polygon,
    Arbitrum,
}

impl WalletChain {
    const ALL: [Self; 5] = [
        Self::Ethereum,
        Self::Base,
        Self::Optimism,
        Self::Polygon,
        Self::Arbitrum,
    ];

    /// Resolve a chain by its parameter name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|chain| chain.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ethereum => "ethereum",
            Self::Base => "base",
            Self::Optimism => "optimism",
            Self::Polygon => "polygon",
            Self::Arbitrum => "arbitrum",
        }
    }

    /// The chain's export name in `wagmi/chains`.
    fn wagmi_name(self) -> &'static str {
        match self {
            Self::Ethereum => "mainnet",
            Self::Base => "base",
            Self::Optimism => "optimism",
            Self::Polygon => "polygon",
            Self::Arbitrum => "arbitrum",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Ethereum => "Ethereum",
            Self::Base => "Base",
            Self::Optimism => "Optimism",
            Self::Polygon => "Polygon",
            Self::Arbitrum => "Arbitrum",
        }
    }
}

/// Wallet connector to register with Wagmi.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletConnector {
    Miniapp,
    Injected,
    Walletconnect,
    Coinbase,
}

impl WalletConnector {
    const ALL: [Self; 4] = [
        Self::Miniapp,
        Self::Injected,
        Self::Walletconnect,
        Self::Coinbase,
    ];

    /// Resolve a connector by its parameter name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|connector| connector.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Miniapp => "miniapp",
            Self::Injected => "injected",
            Self::Walletconnect => "walletconnect",
            Self::Coinbase => "coinbase",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Miniapp => "Farcaster Mini App",
            Self::Injected => "Injected",
            Self::Walletconnect => "WalletConnect",
            Self::Coinbase => "Coinbase Wallet",
        }
    }

    fn import(self) -> &'static str {
        match self {
            Self::Miniapp => "import { miniapp } from '@farcaster/miniapp-sdk/connectors';",
            Self::Injected => "import { injected } from 'wagmi/connectors';",
            Self::Walletconnect => "import { walletConnect } from 'wagmi/connectors';",
            Self::Coinbase => "import { coinbaseWallet } from 'wagmi/connectors';",
        }
    }

    fn constructor(self) -> &'static str {
        match self {
            Self::Miniapp => "miniapp()",
            Self::Injected => "injected()",
            Self::Walletconnect => "walletConnect({ projectId: import.meta.env.VITE_WC_PROJECT_ID })",
            Self::Coinbase => "coinbaseWallet({ appName: 'Farcaster Mini App' })",
        }
    }
}

/// Parameters for the wallet integration tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetupWalletIntegrationParams {
    /// Frontend framework.
    pub framework: UiFramework,

    /// Blockchain networks to support (ethereum, base, optimism, polygon,
    /// arbitrum). Other names are skipped.
    #[serde(default = "default_chains")]
    pub chains: Vec<String>,

    /// Wallet connectors to include (miniapp, injected, walletconnect,
    /// coinbase). Other names are skipped.
    #[serde(default = "default_connectors")]
    pub include_connectors: Vec<String>,
}

fn default_chains() -> Vec<String> {
    ["ethereum", "base", "optimism"].map(String::from).to_vec()
}

fn default_connectors() -> Vec<String> {
    ["miniapp", "injected", "walletconnect"].map(String::from).to_vec()
}

/// Resolve names, dropping the ones that are not recognized.
fn known<T>(names: &[String], resolve: impl Fn(&str) -> Option<T>) -> Vec<T> {
    names
        .iter()
        .filter_map(|name| {
            let found = resolve(name);
            if found.is_none() {
                debug!(name = name.as_str(), "Skipping unknown wallet option");
            }
            found
        })
        .collect()
}

/// Build the `createConfig` module for the selected chains and connectors.
fn wagmi_config(chains: &[WalletChain], connectors: &[WalletConnector]) -> String {
    let chain_names: Vec<_> = chains.iter().map(|c| c.wagmi_name()).collect();

    let mut lines = vec![
        "import { createConfig, http } from 'wagmi';".to_string(),
        format!("import {{ {} }} from 'wagmi/chains';", chain_names.join(", ")),
    ];
    lines.extend(connectors.iter().map(|c| c.import().to_string()));
    lines.push(String::new());
    lines.push("export const config = createConfig({".to_string());
    lines.push(format!("  chains: [{}],", chain_names.join(", ")));
    lines.push("  connectors: [".to_string());
    lines.extend(connectors.iter().map(|c| format!("    {},", c.constructor())));
    lines.push("  ],".to_string());
    lines.push("  transports: {".to_string());
    lines.extend(chain_names.iter().map(|name| format!("    [{}.id]: http(),", name)));
    lines.push("  },".to_string());
    lines.push("});".to_string());

    lines.join("\n")
}

const REACT_SETUP: &str = r#"## React App Setup:
```tsx
import { WagmiProvider } from 'wagmi';
import { QueryClient, QueryClientProvider } from '@tanstack/react-query';
import { config } from './config/wagmi';

const queryClient = new QueryClient();

function App() {
  return (
    <WagmiProvider config={config}>
      <QueryClientProvider client={queryClient}>
        <YourMiniApp />
      </QueryClientProvider>
    </WagmiProvider>
  );
}
```

## Wallet Connection Component:
```tsx
import { useAccount, useConnect, useDisconnect } from 'wagmi';

function WalletConnection() {
  const { isConnected, address, chain } = useAccount();
  const { connect, connectors, isPending } = useConnect();
  const { disconnect } = useDisconnect();

  if (isConnected) {
    return (
      <div className="wallet-connected">
        <div className="wallet-info">
          <p><strong>Address:</strong> {address}</p>
          <p><strong>Chain:</strong> {chain?.name}</p>
        </div>
        <button onClick={() => disconnect()}>
          Disconnect
        </button>
      </div>
    );
  }

  return (
    <div className="wallet-connection">
      <h3>Connect Wallet</h3>
      {connectors.map((connector) => (
        <button
          key={connector.id}
          onClick={() => connect({ connector })}
          disabled={isPending}
          className="connect-button"
        >
          {connector.name}
        </button>
      ))}
    </div>
  );
}
```"#;

const VUE_SETUP: &str = r#"## Vue App Setup:
```typescript
import { createApp } from 'vue';
import { WagmiPlugin } from '@wagmi/vue';
import { QueryClient, VueQueryPlugin } from '@tanstack/vue-query';
import { config } from './config/wagmi';
import App from './App.vue';

const queryClient = new QueryClient();

createApp(App)
  .use(WagmiPlugin, { config })
  .use(VueQueryPlugin, { queryClient })
  .mount('#app');
```

## Wallet Connection Component:
```vue
<script setup>
import { useAccount, useConnect, useDisconnect } from '@wagmi/vue';

const { isConnected, address, chain } = useAccount();
const { connect, connectors, isPending } = useConnect();
const { disconnect } = useDisconnect();
</script>

<template>
  <div v-if="isConnected" class="wallet-connected">
    <div class="wallet-info">
      <p><strong>Address:</strong> {{ address }}</p>
      <p><strong>Chain:</strong> {{ chain?.name }}</p>
    </div>
    <button @click="disconnect()">Disconnect</button>
  </div>
  <div v-else class="wallet-connection">
    <h3>Connect Wallet</h3>
    <button
      v-for="connector in connectors"
      :key="connector.uid"
      :disabled="isPending"
      class="connect-button"
      @click="connect({ connector })"
    >
      {{ connector.name }}
    </button>
  </div>
</template>
```"#;

const VANILLA_SETUP: &str = r#"## Vanilla JS Setup:
```typescript
import { connect, disconnect, getAccount, watchAccount } from '@wagmi/core';
import { config } from './config/wagmi';

const container = document.getElementById('wallet');

function render() {
  const account = getAccount(config);
  container.innerHTML = account.isConnected
    ? `<p>Connected: ${account.address}</p><button id="disconnect">Disconnect</button>`
    : config.connectors
        .map((c, i) => `<button class="connect-button" data-index="${i}">${c.name}</button>`)
        .join('');
}

container.addEventListener('click', async (event) => {
  const target = event.target;
  if (target.id === 'disconnect') {
    await disconnect(config);
  } else if (target.dataset.index) {
    await connect(config, { connector: config.connectors[Number(target.dataset.index)] });
  }
});

watchAccount(config, { onChange: render });
render();
```"#;

const REPORT: &str = r#"# Wallet Integration Setup ({{framework}})

## Wagmi Configuration:
```typescript
{{wagmiConfig}}
```

{{frameworkSetup}}

## Supported Chains:
{{chains}}

## Supported Connectors:
{{connectors}}

## CSS Styling:
```css
.wallet-connected {
  padding: 16px;
  border: 1px solid #e5e5e5;
  border-radius: 8px;
  background: #f9f9f9;
}

.wallet-info p {
  margin: 4px 0;
  font-family: monospace;
  font-size: 14px;
}

.connect-button {
  display: block;
  width: 100%;
  padding: 12px;
  margin: 8px 0;
  background: #7c65c1;
  color: white;
  border: none;
  border-radius: 6px;
  cursor: pointer;
  font-size: 16px;
}

.connect-button:hover {
  background: #6b5aa8;
}

.connect-button:disabled {
  opacity: 0.6;
  cursor: not-allowed;
}
```

## Next Steps:
1. Install dependencies: `npm install {{packages}}`
2. Configure your chains and connectors
3. Implement wallet connection UI
4. Add transaction functionality
5. Test in different wallet environments
"#;

fn checklist<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels
        .map(|label| format!("✅ {}", label))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wallet integration setup tool.
pub struct SetupWalletIntegrationTool;

impl ToolDefinition for SetupWalletIntegrationTool {
    const NAME: &'static str = "farcaster_setup_wallet_integration";
    const DESCRIPTION: &'static str = "Setup wallet integration using EIP-1193 provider and Wagmi";

    type Params = SetupWalletIntegrationParams;

    #[instrument(skip_all, fields(framework = params.framework.as_str(), chains = params.chains.len()))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        info!("Generating wallet integration setup");

        let (setup, packages) = match params.framework {
            UiFramework::React => (REACT_SETUP, "wagmi viem @tanstack/react-query"),
            UiFramework::Vue => (VUE_SETUP, "@wagmi/vue viem @tanstack/vue-query"),
            UiFramework::Vanilla => (VANILLA_SETUP, "@wagmi/core viem"),
        };

        let chains = known(&params.chains, WalletChain::from_name);
        let connectors = known(&params.include_connectors, WalletConnector::from_name);

        let text = Template::new(REPORT)
            .var("framework", params.framework.as_str())
            .var("wagmiConfig", wagmi_config(&chains, &connectors))
            .var("frameworkSetup", setup)
            .var("chains", checklist(chains.iter().map(|c| c.label())))
            .var(
                "connectors",
                checklist(connectors.iter().map(|c| c.label())),
            )
            .var("packages", packages)
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
    fn test_wagmi_config_lists_selected_chains() {
        let config = wagmi_config(
            &[WalletChain::Ethereum, WalletChain::Base],
            &[WalletConnector::Miniapp],
        );
        assert!(config.contains("import { mainnet, base } from 'wagmi/chains';"));
        assert!(config.contains("  chains: [mainnet, base],"));
        assert!(config.contains("    miniapp(),"));
        assert!(config.contains("    [base.id]: http(),"));
        assert!(!config.contains("injected"));
    }

    #[test]
    fn test_react_defaults() {
        let text = run::<SetupWalletIntegrationTool>(json!({ "framework": "react" }));
        assert!(text.starts_with("# Wallet Integration Setup (react)"));
        assert!(text.contains("✅ Ethereum\n✅ Base\n✅ Optimism"));
        assert!(text.contains("✅ Farcaster Mini App"));
        assert!(text.contains("walletConnect({ projectId"));
        assert!(text.contains("<WagmiProvider config={config}>"));
    }

    #[test]
    fn test_vue_setup() {
        let text = run::<SetupWalletIntegrationTool>(json!({
            "framework": "vue",
            "chains": ["polygon"],
            "includeConnectors": ["injected"]
        }));
        assert!(text.contains("WagmiPlugin"));
        assert!(text.contains("{{ address }}"));
        assert!(text.contains("✅ Polygon"));
        assert!(!text.contains("✅ Farcaster Mini App"));
    }

    #[test]
    fn test_unknown_chain_is_skipped() {
        let text = run::<SetupWalletIntegrationTool>(json!({
            "framework": "react",
            "chains": ["ethereum", "zora"],
            "includeConnectors": ["miniapp", "rabby"]
        }));
        assert!(text.contains("  chains: [mainnet],"));
        assert!(text.contains("## Supported Chains:\n✅ Ethereum\n\n"));
        assert!(!text.contains("zora"));
        assert!(!text.contains("rabby"));
    }

    #[test]
    fn test_chain_names_resolve() {
        assert_eq!(WalletChain::from_name("arbitrum"), Some(WalletChain::Arbitrum));
        assert_eq!(WalletChain::from_name("Arbitrum"), None);
        assert_eq!(
            WalletConnector::from_name("walletconnect"),
            Some(WalletConnector::Walletconnect)
        );
    }
}
