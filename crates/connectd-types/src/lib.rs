//! # connectd Types
//!
//! Shared data model for the connectd wallet session SDK: the supported
//! networks and their static configuration, chain identifiers, native-unit
//! amounts, and the session state record the controller exposes to hosts.
//!
//! Everything here is plain data. The session logic lives in
//! `connectd-session`; the provider capability traits live in
//! `connectd-traits`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod amount;
mod network;
mod state;
mod transaction;

pub use amount::Amount;
pub use network::{
    ChainId, NetworkConfig, NetworkType, UnknownNetwork, ETHEREUM_CHAIN_ID, POLYGON_CHAIN_ID,
    SOLANA_CLUSTER,
};
pub use state::WalletState;
pub use transaction::Transaction;
