use alloy::consensus::Transaction;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{Block, BlockId, BlockNumberOrTag};
use async_trait::async_trait;

use connectd_traits::{EvmBlock, EvmBlockTx, EvmRpc, ProviderError};

/// An [`EvmRpc`] implementation backed by Alloy.
///
/// Stateless: every call builds a provider for the given RPC URL, so the
/// same client serves whichever endpoint the network registry selects.
#[derive(Debug, Default, Clone, Copy)]
pub struct EvmClient;

impl EvmClient {
    /// Creates a new client.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EvmRpc for EvmClient {
    async fn block_number(&self, rpc_url: &str) -> Result<u64, ProviderError> {
        let provider = ProviderBuilder::new().connect_http(
            rpc_url
                .parse()
                .map_err(|e| ProviderError::Other(format!("invalid RPC URL: {e}")))?,
        );
        provider
            .get_block_number()
            .await
            .map_err(|e| ProviderError::rpc("eth_blockNumber", e))
    }

    async fn block_with_transactions(
        &self,
        rpc_url: &str,
        number: u64,
    ) -> Result<Option<EvmBlock>, ProviderError> {
        let provider = ProviderBuilder::new().connect_http(
            rpc_url
                .parse()
                .map_err(|e| ProviderError::Other(format!("invalid RPC URL: {e}")))?,
        );
        let block = provider
            .get_block(BlockId::Number(BlockNumberOrTag::Number(number)))
            .full()
            .await
            .map_err(|e| ProviderError::rpc("eth_getBlockByNumber", e))?;
        Ok(block.map(convert_block))
    }
}

fn convert_block(block: Block) -> EvmBlock {
    let number = block.header.number;
    let timestamp = block.header.timestamp;
    let transactions = block
        .transactions
        .into_transactions()
        .map(|tx| EvmBlockTx {
            hash: tx.inner.tx_hash().to_string(),
            from: tx.inner.signer().to_string(),
            to: tx.to().map(|addr| addr.to_string()),
            // saturating narrowing out of U256
            value_wei: u128::try_from(tx.value()).unwrap_or(u128::MAX),
        })
        .collect();
    EvmBlock {
        number,
        timestamp,
        transactions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ETHEREUM_RPC: &str = "https://eth.llamarpc.com";

    #[tokio::test]
    async fn test_invalid_rpc_url() {
        let client = EvmClient::new();
        let err = client.block_number("not a url").await.unwrap_err();
        assert!(matches!(err, ProviderError::Other(_)));
    }

    #[tokio::test]
    #[ignore = "Requires network access"]
    async fn test_block_number_mainnet() {
        let client = EvmClient::new();
        let number = client.block_number(ETHEREUM_RPC).await.unwrap();
        assert!(number > 0);
    }

    #[tokio::test]
    #[ignore = "Requires network access"]
    async fn test_block_with_transactions_mainnet() {
        let client = EvmClient::new();
        let head = client.block_number(ETHEREUM_RPC).await.unwrap();
        let block = client
            .block_with_transactions(ETHEREUM_RPC, head)
            .await
            .unwrap()
            .expect("head block should exist");
        assert_eq!(block.number, head);
        assert!(block.timestamp > 0);
    }
}
