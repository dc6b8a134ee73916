use serde::{Deserialize, Serialize};

use crate::{ChainId, NetworkType, Transaction};

/// The session state record exposed to hosts.
///
/// Owned exclusively by the session controller and replaced wholesale on
/// each update; hosts only read it. `account == None` implies `balance`,
/// `chain_id`, and `transactions` are cleared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalletState {
    /// Connected account address; None when disconnected.
    pub account: Option<String>,
    /// Active chain identifier; None when disconnected.
    pub chain_id: Option<ChainId>,
    /// Native balance as a decimal string; None until fetched.
    pub balance: Option<String>,
    /// True only while a connect operation is in flight.
    pub is_connecting: bool,
    /// Network of the connected account; meaningful only when connected.
    pub network: Option<NetworkType>,
    /// Most recent transactions, in discovery order.
    pub transactions: Vec<Transaction>,
    /// True only while a transaction scan is in flight.
    pub is_loading_txs: bool,
}

impl WalletState {
    /// The disconnected state: everything cleared, both flags false.
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// True when an account is connected.
    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }
}
