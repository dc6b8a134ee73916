use std::str::FromStr;

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_client::GetConfirmedSignaturesForAddress2Config;
use solana_client::rpc_config::RpcTransactionConfig;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_transaction_status::{EncodedTransaction, UiMessage, UiTransactionEncoding};

use connectd_traits::{ProviderError, SolanaRpc, SolanaTxDetail};

/// A [`SolanaRpc`] implementation backed by the Solana RPC client.
///
/// All queries run at confirmed commitment. Stateless: every call builds a
/// client for the given RPC URL, so the same instance serves whichever
/// endpoint the network registry selects.
#[derive(Debug, Default, Clone, Copy)]
pub struct SolanaClient;

impl SolanaClient {
    /// Creates a new client.
    pub fn new() -> Self {
        Self
    }

    fn client(rpc_url: &str) -> RpcClient {
        RpcClient::new_with_commitment(rpc_url.to_string(), CommitmentConfig::confirmed())
    }
}

#[async_trait]
impl SolanaRpc for SolanaClient {
    async fn lamport_balance(&self, rpc_url: &str, address: &str) -> Result<u64, ProviderError> {
        let pubkey = Pubkey::from_str(address)
            .map_err(|_| ProviderError::InvalidAddress(address.to_string()))?;
        Self::client(rpc_url)
            .get_balance(&pubkey)
            .await
            .map_err(|e| ProviderError::rpc("getBalance", e))
    }

    async fn signatures_for_address(
        &self,
        rpc_url: &str,
        address: &str,
        limit: usize,
    ) -> Result<Vec<String>, ProviderError> {
        let pubkey = Pubkey::from_str(address)
            .map_err(|_| ProviderError::InvalidAddress(address.to_string()))?;
        let config = GetConfirmedSignaturesForAddress2Config {
            limit: Some(limit),
            commitment: Some(CommitmentConfig::confirmed()),
            ..Default::default()
        };
        let statuses = Self::client(rpc_url)
            .get_signatures_for_address_with_config(&pubkey, config)
            .await
            .map_err(|e| ProviderError::rpc("getSignaturesForAddress", e))?;
        Ok(statuses.into_iter().map(|status| status.signature).collect())
    }

    async fn transaction_detail(
        &self,
        rpc_url: &str,
        signature: &str,
    ) -> Result<SolanaTxDetail, ProviderError> {
        let parsed = Signature::from_str(signature)
            .map_err(|_| ProviderError::Other(format!("invalid signature '{signature}'")))?;
        let config = RpcTransactionConfig {
            encoding: Some(UiTransactionEncoding::Json),
            commitment: Some(CommitmentConfig::confirmed()),
            max_supported_transaction_version: Some(0),
        };
        let confirmed = Self::client(rpc_url)
            .get_transaction_with_config(&parsed, config)
            .await
            .map_err(|e| ProviderError::rpc("getTransaction", e))?;

        let meta = confirmed
            .transaction
            .meta
            .ok_or_else(|| ProviderError::Other(format!("transaction {signature} has no meta")))?;
        let account_keys = match confirmed.transaction.transaction {
            EncodedTransaction::Json(tx) => match tx.message {
                UiMessage::Raw(message) => message.account_keys,
                UiMessage::Parsed(message) => {
                    message.account_keys.into_iter().map(|key| key.pubkey).collect()
                }
            },
            _ => Vec::new(),
        };

        Ok(SolanaTxDetail {
            signature: signature.to_string(),
            account_keys,
            pre_balances: meta.pre_balances,
            post_balances: meta.post_balances,
            block_time: confirmed.block_time,
        })
    }
}
