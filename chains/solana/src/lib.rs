//! # connectd Solana
//!
//! Connection and recent-activity scan routines for Solana, written against
//! the capability traits in `connectd-traits`, plus [`SolanaClient`], a real
//! [`connectd_traits::SolanaRpc`] implementation backed by the Solana RPC
//! client at confirmed commitment.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::arithmetic_side_effects)]

mod amount;
mod client;
mod connect;
mod scan;

pub use amount::{format_lamport_delta, format_lamports, LAMPORT_DECIMALS};
pub use client::SolanaClient;
pub use connect::{connect_injected, SolanaConnection};
pub use scan::{scan_recent_signatures, RECENT_SIGNATURE_LIMIT};
