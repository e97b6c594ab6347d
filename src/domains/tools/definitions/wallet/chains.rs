//! Chain configuration tool.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::super::common::{default_true, mark, success_result};
use super::super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Template, ToolError};

/// A custom network definition.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomRpc {
    /// EIP-155 chain id.
    pub chain_id: u64,

    /// Human readable network name.
    pub name: String,

    /// JSON-RPC endpoint.
    pub rpc_url: String,

    /// Block explorer base URL.
    #[serde(default)]
    pub explorer_url: Option<String>,
}

impl CustomRpc {
    /// JavaScript identifier for the exported chain constant.
    fn ident(&self) -> String {
        let base: String = self
            .name
            .to_lowercase()
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect();
        match base.chars().next() {
            Some(c) if c.is_ascii_alphabetic() => format!("{}Chain", base),
            _ => format!("custom{}Chain", self.chain_id),
        }
    }

    fn define_chain(&self) -> String {
        format!(
            r#"export const {ident} = defineChain({{
  id: {id},
  name: '{name}',
  nativeCurrency: {{
    decimals: 18,
    name: 'Ether',
    symbol: 'ETH',
  }},
  rpcUrls: {{
    default: {{ http: ['{rpc}'] }},
  }},
  blockExplorers: {{
    default: {{ name: 'Explorer', url: '{explorer}' }},
  }},
}});"#,
            ident = self.ident(),
            id = self.chain_id,
            name = self.name,
            rpc = self.rpc_url,
            explorer = self.explorer_url.as_deref().unwrap_or_default(),
        )
    }
}

/// Parameters for the chain configuration tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigureChainsParams {
    /// Include Ethereum mainnet.
    #[serde(default = "default_true")]
    pub mainnet: bool,

    /// Include Base network.
    #[serde(default = "default_true")]
    pub base: bool,

    /// Include Optimism.
    #[serde(default)]
    pub optimism: bool,

    /// Include Polygon.
    #[serde(default)]
    pub polygon: bool,

    /// Custom RPC configurations.
    #[serde(default)]
    pub custom_rpcs: Vec<CustomRpc>,
}

impl ConfigureChainsParams {
    fn standard_chains(&self) -> Vec<&'static str> {
        [
            (self.mainnet, "mainnet"),
            (self.base, "base"),
            (self.optimism, "optimism"),
            (self.polygon, "polygon"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }
}

fn chain_config(params: &ConfigureChainsParams) -> String {
    let standard = params.standard_chains();
    let mut out = vec![
        "import { createConfig, http } from 'wagmi';".to_string(),
        "import { defineChain } from 'viem';".to_string(),
        format!("import {{ {} }} from 'wagmi/chains';", standard.join(", ")),
        String::new(),
        "// Standard chains".to_string(),
        format!("export const supportedChains = [{}];", standard.join(", ")),
    ];

    let has_custom = !params.custom_rpcs.is_empty();
    if has_custom {
        out.push(String::new());
        out.push("// Custom chain configurations".to_string());
        for rpc in &params.custom_rpcs {
            out.push(rpc.define_chain());
            out.push(String::new());
        }
        let idents: Vec<_> = params.custom_rpcs.iter().map(CustomRpc::ident).collect();
        out.push(format!(
            "export const allChains = [...supportedChains, {}];",
            idents.join(", ")
        ));
    }

    out.push(String::new());
    out.push("// Wagmi configuration with chains".to_string());
    out.push("export const config = createConfig({".to_string());
    out.push(format!(
        "  chains: {},",
        if has_custom { "allChains" } else { "supportedChains" }
    ));
    out.push("  transports: {".to_string());
    out.extend(standard.iter().map(|name| format!("    [{}.id]: http(),", name)));
    out.extend(
        params
            .custom_rpcs
            .iter()
            .map(|rpc| format!("    [{}]: http('{}'),", rpc.chain_id, rpc.rpc_url)),
    );
    out.push("  },".to_string());
    out.push("});".to_string());

    out.join("\n")
}

const REPORT: &str = r#"# Chain Configuration

## Supported Networks:
{{mainnet}} Ethereum Mainnet
{{base}} Base
{{optimism}} Optimism
{{polygon}} Polygon
{{#if customCount}}
✅ {{customCount}} Custom RPC(s)
{{/if}}

## Chain Configuration:
```typescript
{{config}}
```

## Chain Switcher Component:
```tsx
import { useSwitchChain, useChainId } from 'wagmi';

function ChainSwitcher() {
  const chainId = useChainId();
  const { chains, switchChain } = useSwitchChain();

  return (
    <div className="chain-switcher">
      <p>Current: {chains.find(c => c.id === chainId)?.name}</p>
      {chains.map((chain) => (
        <button
          key={chain.id}
          onClick={() => switchChain({ chainId: chain.id })}
          disabled={chainId === chain.id}
        >
          {chain.name}
        </button>
      ))}
    </div>
  );
}
```

## Chain-Specific Logic:
```typescript
import { useChainId } from 'wagmi';

function useChainSpecificConfig() {
  const chainId = useChainId();

  const getExplorerUrl = (txHash: string) => {
    switch (chainId) {
      case 1: // Mainnet
        return `https://etherscan.io/tx/${txHash}`;
      case 8453: // Base
        return `https://basescan.org/tx/${txHash}`;
      case 10: // Optimism
        return `https://optimistic.etherscan.io/tx/${txHash}`;
      case 137: // Polygon
        return `https://polygonscan.com/tx/${txHash}`;
      default:
        return '#';
    }
  };

  const getNativeCurrency = () => {
    switch (chainId) {
      case 137: // Polygon
        return { symbol: 'MATIC', decimals: 18 };
      default:
        return { symbol: 'ETH', decimals: 18 };
    }
  };

  return { getExplorerUrl, getNativeCurrency };
}
```

## Network Detection:
```typescript
import { useEffect } from 'react';
import { useChainId } from 'wagmi';

function NetworkMonitor() {
  const chainId = useChainId();

  useEffect(() => {
    const supportedChainIds = [{{chainIds}}];

    if (!supportedChainIds.includes(chainId)) {
      console.warn('Unsupported network detected:', chainId);
      // Show network switch prompt
    }
  }, [chainId]);

  return null;
}
```

## Best Practices:
- Always check if the current chain is supported
- Provide clear chain switching UI
- Handle network-specific token addresses
- Use appropriate RPC endpoints for each network
- Consider gas price differences between chains
"#;

/// Chain configuration tool.
pub struct ConfigureChainsTool;

impl ToolDefinition for ConfigureChainsTool {
    const NAME: &'static str = "farcaster_configure_chains";
    const DESCRIPTION: &'static str = "Configure blockchain networks for wallet integration";

    type Params = ConfigureChainsParams;

    #[instrument(skip_all, fields(custom_rpcs = params.custom_rpcs.len()))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        info!("Generating chain configuration");

        let chain_ids: Vec<String> = [
            (params.mainnet, 1),
            (params.base, 8453),
            (params.optimism, 10),
            (params.polygon, 137),
        ]
        .into_iter()
        .filter_map(|(on, id)| on.then_some(id))
        .chain(params.custom_rpcs.iter().map(|rpc| rpc.chain_id))
        .map(|id| id.to_string())
        .collect();

        let custom_count = if params.custom_rpcs.is_empty() {
            String::new()
        } else {
            params.custom_rpcs.len().to_string()
        };

        let text = Template::new(REPORT)
            .var("mainnet", mark(params.mainnet))
            .var("base", mark(params.base))
            .var("optimism", mark(params.optimism))
            .var("polygon", mark(params.polygon))
            .var("customCount", custom_count)
            .var("config", chain_config(&params))
            .var("chainIds", chain_ids.join(", "))
            .render()?;

        Ok(success_result(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::test_support::{args, context, run};
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let text = run::<ConfigureChainsTool>(json!({}));
        assert!(text.contains("✅ Ethereum Mainnet\n✅ Base\n❌ Optimism\n❌ Polygon"));
        assert!(text.contains("export const supportedChains = [mainnet, base];"));
        assert!(text.contains("chains: supportedChains,"));
        assert!(text.contains("const supportedChainIds = [1, 8453];"));
        assert!(!text.contains("Custom RPC(s)"));
    }

    #[test]
    fn test_custom_rpc() {
        let text = run::<ConfigureChainsTool>(json!({
            "customRpcs": [{
                "chainId": 7777777,
                "name": "Zora Network",
                "rpcUrl": "https://rpc.zora.energy"
            }]
        }));
        assert!(text.contains("✅ 1 Custom RPC(s)"));
        assert!(text.contains("export const zoranetworkChain = defineChain({"));
        assert!(text.contains("[7777777]: http('https://rpc.zora.energy'),"));
        assert!(text.contains("chains: allChains,"));
    }

    #[test]
    fn test_ident_falls_back_to_chain_id() {
        let rpc = CustomRpc {
            chain_id: 42,
            name: "123".into(),
            rpc_url: "https://rpc".into(),
            explorer_url: None,
        };
        assert_eq!(rpc.ident(), "custom42Chain");
    }

    #[test]
    fn test_custom_rpc_requires_url() {
        let result = ConfigureChainsTool::call(
            args(json!({ "customRpcs": [{ "chainId": 1, "name": "x" }] })),
            &context(),
        );
        assert!(matches!(result, Err(ToolError::MalformedArguments { .. })));
    }
}
