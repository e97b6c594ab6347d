//! Transaction code generator.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::super::common::{default_true, success_result};
use super::super::{ToolContext, ToolDefinition};
use crate::domains::tools::{Template, ToolError};

/// Kind of transaction to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionType {
    Single,
    Batch,
    Erc20Transfer,
    NftMint,
    ContractCall,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Batch => "batch",
            Self::Erc20Transfer => "erc20-transfer",
            Self::NftMint => "nft-mint",
            Self::ContractCall => "contract-call",
        }
    }

    fn code(self) -> &'static str {
        match self {
            Self::Single => SINGLE_TX,
            Self::Batch => BATCH_TX,
            Self::Erc20Transfer => ERC20_TX,
            Self::NftMint => NFT_MINT_TX,
            Self::ContractCall => CONTRACT_CALL_TX,
        }
    }
}

/// Parameters for the transaction tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTransactionParams {
    /// Type of transaction to generate.
    pub transaction_type: TransactionType,

    /// Contract address (if applicable).
    #[serde(default)]
    pub contract_address: Option<String>,

    /// Contract ABI JSON (if applicable).
    #[serde(default)]
    pub abi: Option<String>,

    /// Include gas estimation logic.
    #[serde(default = "default_true")]
    pub include_gas_estimation: bool,

    /// Include transaction preview UI.
    #[serde(default = "default_true")]
    pub include_tx_preview: bool,
}

const SINGLE_TX: &str = r#"import { useSendTransaction, useWaitForTransactionReceipt } from 'wagmi';
import { parseEther } from 'viem';

function SendEth() {
  const { sendTransaction, data: hash, isPending } = useSendTransaction();
  const { isLoading: isConfirming, isSuccess } = useWaitForTransactionReceipt({ hash });

  const handleSend = (to: `0x${string}`, amount: string) => {
    sendTransaction({ to, value: parseEther(amount) });
  };

  return (
    <div>
      <button onClick={() => handleSend('{{address}}', '0.01')} disabled={isPending}>
        {isPending ? 'Sending...' : 'Send ETH'}
      </button>
      {hash && <div>Transaction: {hash}</div>}
      {isConfirming && <div>Confirming...</div>}
      {isSuccess && <div>Success!</div>}
    </div>
  );
}"#;

const ERC20_TX: &str = r#"import { useWriteContract, useWaitForTransactionReceipt } from 'wagmi';
import { parseUnits } from 'viem';

const ERC20_ABI = [
  {
    name: 'transfer',
    type: 'function',
    inputs: [
      { name: 'to', type: 'address' },
      { name: 'amount', type: 'uint256' }
    ],
    outputs: [{ name: '', type: 'bool' }],
    stateMutability: 'nonpayable'
  }
];

function ERC20Transfer() {
  const { writeContract, data: hash, isPending } = useWriteContract();
  const { isLoading: isConfirming, isSuccess } = useWaitForTransactionReceipt({ hash });

  const handleTransfer = async (to: string, amount: string) => {
    try {
      await writeContract({
        address: '{{address}}',
        abi: ERC20_ABI,
        functionName: 'transfer',
        args: [to, parseUnits(amount, 18)],
      });
    } catch (error) {
      console.error('Transfer failed:', error);
    }
  };

  return (
    <div>
      <button
        onClick={() => handleTransfer('0x...', '1.0')}
        disabled={isPending}
      >
        {isPending ? 'Sending...' : 'Send Tokens'}
      </button>
      {hash && <div>Transaction: {hash}</div>}
      {isConfirming && <div>Confirming...</div>}
      {isSuccess && <div>Success!</div>}
    </div>
  );
}"#;

const BATCH_TX: &str = r#"import { useSendCalls } from 'wagmi/experimental';
import { parseEther } from 'viem';

function BatchTransactions() {
  const { sendCalls, data: id, isPending } = useSendCalls();

  const handleBatchTransaction = async () => {
    try {
      await sendCalls({
        calls: [
          {
            to: '{{address}}', // First contract
            data: '0x...', // Encoded function call
            value: parseEther('0.1'),
          },
          {
            to: '0x...', // Second contract
            data: '0x...', // Encoded function call
          },
        ],
      });
    } catch (error) {
      console.error('Batch transaction failed:', error);
    }
  };

  return (
    <button onClick={handleBatchTransaction} disabled={isPending}>
      {isPending ? 'Processing Batch...' : 'Send Batch Transaction'}
    </button>
  );
}"#;

const NFT_MINT_TX: &str = r#"import { useWriteContract } from 'wagmi';
import { parseEther } from 'viem';

const NFT_ABI = [
  {
    name: 'mint',
    type: 'function',
    inputs: [
      { name: 'to', type: 'address' },
      { name: 'tokenId', type: 'uint256' }
    ],
    outputs: [],
    stateMutability: 'payable'
  }
];

function NFTMint() {
  const { writeContract, isPending } = useWriteContract();

  const handleMint = async (to: string, tokenId: number) => {
    try {
      await writeContract({
        address: '{{address}}',
        abi: NFT_ABI,
        functionName: 'mint',
        args: [to, BigInt(tokenId)],
        value: parseEther('0.01'), // Mint price
      });
    } catch (error) {
      console.error('Mint failed:', error);
    }
  };

  return (
    <button onClick={() => handleMint('0x...', 1)} disabled={isPending}>
      {isPending ? 'Minting...' : 'Mint NFT'}
    </button>
  );
}"#;

const CONTRACT_CALL_TX: &str = r#"import { useWriteContract } from 'wagmi';

const CONTRACT_ABI = {{abi}};

function GenericTransaction() {
  const { writeContract, isPending } = useWriteContract();

  const handleTransaction = async () => {
    try {
      await writeContract({
        address: '{{address}}',
        abi: CONTRACT_ABI,
        functionName: 'yourFunction',
        args: [/* function arguments */],
      });
    } catch (error) {
      console.error('Transaction failed:', error);
    }
  };

  return (
    <button onClick={handleTransaction} disabled={isPending}>
      {isPending ? 'Processing...' : 'Send Transaction'}
    </button>
  );
}"#;

const REPORT: &str = r#"# {{transactionType}} Transaction Implementation

## Transaction Code:
```typescript
{{code}}
```
{{#if gas}}

## Gas Estimation:
```typescript
import { useEstimateGas } from 'wagmi';

function GasEstimator({ to, data, value }) {
  const { data: gasEstimate, isLoading, error } = useEstimateGas({
    to,
    data,
    value,
  });

  if (isLoading) return <div>Estimating gas...</div>;
  if (error) return <div>Gas estimation failed</div>;

  return (
    <div className="gas-estimate">
      <p>Estimated gas: {gasEstimate?.toString()} units</p>
      <p>Estimated cost: ~{/* Calculate USD cost */} USD</p>
    </div>
  );
}
```
{{/if}}
{{#if preview}}

## Transaction Preview Component:
```tsx
function TransactionPreview({ transaction, onConfirm, onCancel }) {
  return (
    <div className="tx-preview">
      <h3>Confirm Transaction</h3>
      <div className="tx-details">
        <p><strong>To:</strong> {transaction.to}</p>
        <p><strong>Value:</strong> {transaction.value} ETH</p>
        <p><strong>Gas Limit:</strong> {transaction.gasLimit}</p>
        <p><strong>Gas Price:</strong> {transaction.gasPrice} gwei</p>
      </div>
      <div className="tx-actions">
        <button onClick={onConfirm} className="confirm-btn">
          Confirm
        </button>
        <button onClick={onCancel} className="cancel-btn">
          Cancel
        </button>
      </div>
    </div>
  );
}
```
{{/if}}

## Error Handling:
```typescript
const handleTransactionError = (error: any) => {
  if (error.code === 'USER_REJECTED_REQUEST') {
    alert('Transaction cancelled by user');
  } else if (error.code === 'INSUFFICIENT_FUNDS') {
    alert('Insufficient funds for transaction');
  } else if (error.message.includes('gas')) {
    alert('Gas estimation failed. Try adjusting gas limit.');
  } else {
    alert('Transaction failed: ' + error.message);
  }
};
```

## Features Included:
{{#if gas}}✅ Gas estimation{{else}}❌ Gas estimation (not included){{/if}}
{{#if preview}}✅ Transaction preview{{else}}❌ Transaction preview (not included){{/if}}
✅ Error handling
✅ Loading states
✅ Transaction confirmation

## Next Steps:
1. Integrate with your contract ABI
2. Add gas estimation if needed
3. Implement transaction preview UI
4. Test with different wallet providers
5. Add transaction history tracking
"#;

/// Transaction code tool.
pub struct GenerateTransactionTool;

impl ToolDefinition for GenerateTransactionTool {
    const NAME: &'static str = "farcaster_generate_transaction";
    const DESCRIPTION: &'static str = "Generate transaction code for single or batch operations";

    type Params = GenerateTransactionParams;

    #[instrument(skip_all, fields(transaction_type = params.transaction_type.as_str()))]
    fn execute(params: Self::Params, _ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        info!("Generating transaction code");

        let address = params
            .contract_address
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| "0x...".to_string());
        let abi = params
            .abi
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| "[/* Contract ABI */]".to_string());

        let code = Template::new(params.transaction_type.code())
            .var("address", address)
            .var("abi", abi)
            .render()?;

        let text = Template::new(REPORT)
            .var("transactionType", params.transaction_type.as_str())
            .var("code", code)
            .flag("gas", params.include_gas_estimation)
            .flag("preview", params.include_tx_preview)
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
    fn test_erc20_uses_contract_address() {
        let text = run::<GenerateTransactionTool>(json!({
            "transactionType": "erc20-transfer",
            "contractAddress": "0xabc"
        }));
        assert!(text.starts_with("# erc20-transfer Transaction Implementation"));
        assert!(text.contains("address: '0xabc',"));
        assert!(text.contains("✅ Gas estimation"));
    }

    #[test]
    fn test_contract_call_inlines_abi() {
        let text = run::<GenerateTransactionTool>(json!({
            "transactionType": "contract-call",
            "abi": "[{\"name\":\"ping\"}]",
            "includeGasEstimation": false,
            "includeTxPreview": false
        }));
        assert!(text.contains("const CONTRACT_ABI = [{\"name\":\"ping\"}];"));
        assert!(text.contains("address: '0x...',"));
        assert!(!text.contains("## Gas Estimation:"));
        assert!(text.contains("❌ Transaction preview (not included)"));
    }

    #[test]
    fn test_every_type_renders() {
        for kind in ["single", "batch", "erc20-transfer", "nft-mint", "contract-call"] {
            let text = run::<GenerateTransactionTool>(json!({ "transactionType": kind }));
            assert!(text.contains("## Transaction Code:"), "{}", kind);
        }
    }
}
