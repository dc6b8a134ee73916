//! # connectd Session
//!
//! The wallet session controller: one observable state record per session
//! (account, chain, balance, recent transactions, progress flags) and the
//! operations that drive it.
//!
//! ## Quickstart
//!
//! ```ignore
//! use std::sync::Arc;
//! use connectd_session::WalletSession;
//! use connectd_types::NetworkType;
//!
//! # async fn run(evm_wallet: Arc<dyn connectd_traits::EvmWalletProvider>) {
//! let session = WalletSession::builder().evm_wallet(evm_wallet).build();
//! let mut state = session.watch();
//!
//! session.connect(NetworkType::Ethereum).await.unwrap();
//! let connected = session.state();
//! println!("account: {:?}", connected.account);
//! println!("balance: {:?} ETH", connected.balance);
//! # }
//! ```
//!
//! Connection failures surface as [`SessionError`] for the host to report;
//! everything best-effort (chain switch requests, transaction scans, the
//! Solana balance fallback) degrades gracefully and is only logged.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod events;
mod session;

pub use error::SessionError;
pub use session::{WalletSession, WalletSessionBuilder};
