use serde::{Deserialize, Serialize};

use crate::NetworkType;

/// A transaction discovered by the recent-activity scan.
///
/// Immutable value produced by the scan and consumed by hosts. Hash formats
/// are chain-native: hex for EVM chains, a base58 signature for Solana.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Chain-native transaction identifier.
    pub hash: String,
    /// Sender address.
    pub from: String,
    /// Recipient address; empty for Solana entries lacking a second account key.
    pub to: String,
    /// Value in the network's display unit, already converted from the
    /// smallest denomination.
    pub value: String,
    /// Unix seconds.
    pub timestamp: u64,
    /// Network the transaction was retrieved from.
    pub network: NetworkType,
}
