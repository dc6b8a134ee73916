//! # connectd EVM
//!
//! Connection and recent-activity scan routines for EVM chains (Ethereum,
//! Polygon), written against the capability traits in `connectd-traits`,
//! plus [`EvmClient`], a real [`connectd_traits::EvmRpc`] implementation
//! backed by [alloy](https://github.com/alloy-rs/alloy).
//!
//! The routines are chain-agnostic within the EVM family: Ethereum and
//! Polygon share the address and transaction shape, so the session layer
//! only varies the network configuration it passes in.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod amount;
mod client;
mod connect;
mod scan;

pub use amount::{format_wei, WEI_DECIMALS};
pub use client::EvmClient;
pub use connect::{connect_injected, EvmConnection};
pub use scan::{scan_recent_blocks, RECENT_BLOCK_WINDOW};
