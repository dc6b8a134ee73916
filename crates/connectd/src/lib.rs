//! # connectd
//!
//! Multi-chain wallet session SDK. A host application injects wallet and RPC
//! providers; the [`WalletSession`] controller sequences connections into
//! them and exposes one observable state record: the connected account, its
//! chain and native balance, and the account's most recent transactions
//! found by scanning recent blocks.
//!
//! Supported networks: Ethereum, Polygon, and Solana. The EVM pair shares
//! one connection and scan path; Solana has its own.
//!
//! ## Quickstart
//!
//! ```ignore
//! use connectd::prelude::*;
//!
//! # async fn run(
//! #     evm_wallet: std::sync::Arc<dyn EvmWalletProvider>,
//! #     solana_wallet: std::sync::Arc<dyn SolanaWalletProvider>,
//! # ) -> Result<(), SessionError> {
//! let session = WalletSession::builder()
//!     .evm_wallet(evm_wallet)
//!     .solana_wallet(solana_wallet)
//!     .build();
//!
//! session.connect(NetworkType::Ethereum).await?;
//! let state = session.state();
//! println!("connected: {:?} on {:?}", state.account, state.network);
//! for tx in &state.transactions {
//!     println!("{} {} {}", tx.hash, tx.value, tx.timestamp);
//! }
//!
//! session.disconnect();
//! # Ok(())
//! # }
//! ```
//!
//! RPC clients default to the real adapters ([`EvmClient`], [`SolanaClient`])
//! against the endpoints in the network registry; tests swap in the fakes
//! from `connectd-testing`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use connectd_session::{SessionError, WalletSession, WalletSessionBuilder};
pub use connectd_traits::{
    EvmBlock, EvmBlockTx, EvmRpc, EvmWalletProvider, ProviderError, SolanaRpc, SolanaTxDetail,
    SolanaWalletProvider, WalletEvent,
};
pub use connectd_types::{
    Amount, ChainId, NetworkConfig, NetworkType, Transaction, UnknownNetwork, WalletState,
};

pub use connectd_evm::EvmClient;
pub use connectd_solana::SolanaClient;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        ChainId, EvmClient, EvmWalletProvider, NetworkConfig, NetworkType, ProviderError,
        SessionError, SolanaClient, SolanaWalletProvider, Transaction, WalletEvent, WalletSession,
        WalletState,
    };
}
