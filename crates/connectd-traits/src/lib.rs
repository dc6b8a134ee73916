//! # connectd Traits
//!
//! Capability traits for the collaborators a wallet session depends on.
//! Browser environments hand pages ambient provider singletons; here they
//! are explicit injected dependencies instead, so hosts wire real adapters
//! and tests substitute fakes.
//!
//! ## Traits
//!
//! - [`EvmWalletProvider`] - an injected EVM wallet (account authorization,
//!   chain queries, chain-switch requests, event stream)
//! - [`SolanaWalletProvider`] - an injected Phantom-style Solana wallet
//! - [`EvmRpc`] - an EVM JSON-RPC client (block height, full blocks)
//! - [`SolanaRpc`] - a Solana RPC client (balances, signatures, details)
//!
//! Real implementations of the RPC traits live in `connectd_evm` and
//! `connectd_solana`; fakes for all four live in `connectd-testing`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use connectd_types::NetworkConfig;

/// Errors raised by provider and RPC implementations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// The user or provider rejected the request (e.g. declined the
    /// authorization prompt).
    #[error("request rejected: {0}")]
    Rejected(String),

    /// An RPC request failed.
    #[error("rpc request failed: {method}: {reason}")]
    Rpc {
        /// RPC method or operation name.
        method: String,
        /// Underlying failure description.
        reason: String,
    },

    /// An address or signature string could not be parsed.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Any other provider failure.
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    /// Shorthand for an [`ProviderError::Rpc`] variant.
    pub fn rpc(method: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        ProviderError::Rpc {
            method: method.into(),
            reason: reason.to_string(),
        }
    }
}

/// Signals emitted by an injected EVM wallet while a session is alive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalletEvent {
    /// The authorized account list changed; may be empty when the user
    /// disconnected the site from the wallet.
    AccountsChanged(Vec<String>),
    /// The active chain changed; carries the hex chain id string injected
    /// providers emit (e.g. `"0x89"`).
    ChainChanged(String),
}

/// An injected EVM-compatible wallet.
#[async_trait]
pub trait EvmWalletProvider: Send + Sync {
    /// Requests account access, prompting the user if not yet authorized.
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError>;

    /// Returns the wallet's active chain id.
    async fn chain_id(&self) -> Result<u64, ProviderError>;

    /// Returns the native balance of `address` in wei.
    async fn native_balance(&self, address: &str) -> Result<u128, ProviderError>;

    /// Asks the wallet to add or switch to the given chain.
    async fn switch_chain(&self, config: &NetworkConfig) -> Result<(), ProviderError>;

    /// Subscribes to account and chain change signals.
    fn events(&self) -> broadcast::Receiver<WalletEvent>;
}

/// An injected Phantom-style Solana wallet.
#[async_trait]
pub trait SolanaWalletProvider: Send + Sync {
    /// Requests a connection and returns the base58 public key.
    async fn connect(&self) -> Result<String, ProviderError>;

    /// Signals the wallet to disconnect.
    async fn disconnect(&self) -> Result<(), ProviderError>;
}

/// A transaction as it appears inside a fetched EVM block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvmBlockTx {
    /// Transaction hash, 0x-prefixed hex.
    pub hash: String,
    /// Sender address.
    pub from: String,
    /// Recipient address; None for contract creation.
    pub to: Option<String>,
    /// Transferred value in wei.
    pub value_wei: u128,
}

/// An EVM block with its full transaction list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvmBlock {
    /// Block number.
    pub number: u64,
    /// Block timestamp, Unix seconds.
    pub timestamp: u64,
    /// Transactions included in the block.
    pub transactions: Vec<EvmBlockTx>,
}

/// An EVM JSON-RPC client.
#[async_trait]
pub trait EvmRpc: Send + Sync {
    /// Returns the current block height.
    async fn block_number(&self, rpc_url: &str) -> Result<u64, ProviderError>;

    /// Fetches a block with its full transaction list; None when the node
    /// does not know the block.
    async fn block_with_transactions(
        &self,
        rpc_url: &str,
        number: u64,
    ) -> Result<Option<EvmBlock>, ProviderError>;
}

/// Decoded detail of a confirmed Solana transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolanaTxDetail {
    /// Base58 transaction signature.
    pub signature: String,
    /// Account keys of the transaction message, in message order.
    pub account_keys: Vec<String>,
    /// Lamport balances before execution, indexed like `account_keys`.
    pub pre_balances: Vec<u64>,
    /// Lamport balances after execution, indexed like `account_keys`.
    pub post_balances: Vec<u64>,
    /// Block time, Unix seconds, when the node reports one.
    pub block_time: Option<i64>,
}

/// A Solana RPC client at confirmed commitment.
#[async_trait]
pub trait SolanaRpc: Send + Sync {
    /// Returns the lamport balance of `address`.
    async fn lamport_balance(&self, rpc_url: &str, address: &str) -> Result<u64, ProviderError>;

    /// Lists up to `limit` recent confirmed transaction signatures for
    /// `address`, newest first.
    async fn signatures_for_address(
        &self,
        rpc_url: &str,
        address: &str,
        limit: usize,
    ) -> Result<Vec<String>, ProviderError>;

    /// Fetches the decoded detail of one confirmed transaction.
    async fn transaction_detail(
        &self,
        rpc_url: &str,
        signature: &str,
    ) -> Result<SolanaTxDetail, ProviderError>;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        EvmBlock, EvmBlockTx, EvmRpc, EvmWalletProvider, ProviderError, SolanaRpc,
        SolanaTxDetail, SolanaWalletProvider, WalletEvent,
    };
}
