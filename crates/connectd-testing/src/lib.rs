//! # connectd Testing
//!
//! Fake wallet providers and RPC clients implementing the capability traits
//! in `connectd-traits`. Every fake is configured through `with_*` builders
//! before being shared, and exposes interior-mutability knobs for the few
//! behaviors tests change mid-run (block sets, emitted events).

#![forbid(unsafe_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;

use connectd_traits::{
    EvmBlock, EvmBlockTx, EvmRpc, EvmWalletProvider, ProviderError, SolanaRpc, SolanaTxDetail,
    SolanaWalletProvider, WalletEvent,
};
use connectd_types::NetworkConfig;

/// Builds an [`EvmBlock`] for test fixtures.
pub fn block(number: u64, timestamp: u64, transactions: Vec<EvmBlockTx>) -> EvmBlock {
    EvmBlock {
        number,
        timestamp,
        transactions,
    }
}

/// Builds an [`EvmBlockTx`] for test fixtures.
pub fn tx(hash: &str, from: &str, to: Option<&str>, value_wei: u128) -> EvmBlockTx {
    EvmBlockTx {
        hash: hash.to_string(),
        from: from.to_string(),
        to: to.map(str::to_string),
        value_wei,
    }
}

/// Builds a [`SolanaTxDetail`] for test fixtures.
pub fn detail(
    signature: &str,
    account_keys: &[&str],
    pre_balances: &[u64],
    post_balances: &[u64],
    block_time: Option<i64>,
) -> SolanaTxDetail {
    SolanaTxDetail {
        signature: signature.to_string(),
        account_keys: account_keys.iter().map(|k| k.to_string()).collect(),
        pre_balances: pre_balances.to_vec(),
        post_balances: post_balances.to_vec(),
        block_time,
    }
}

// ============================================================================
// Fake EVM wallet
// ============================================================================

/// A fake injected EVM wallet.
pub struct FakeEvmWallet {
    accounts: Vec<String>,
    chain_id: u64,
    default_balance: u128,
    balances: HashMap<String, u128>,
    reject_accounts: Option<String>,
    fail_switch: bool,
    switch_calls: AtomicUsize,
    events: broadcast::Sender<WalletEvent>,
}

impl Default for FakeEvmWallet {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeEvmWallet {
    /// A wallet with no authorized accounts.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            accounts: Vec::new(),
            chain_id: 1,
            default_balance: 0,
            balances: HashMap::new(),
            reject_accounts: None,
            fail_switch: false,
            switch_calls: AtomicUsize::new(0),
            events,
        }
    }

    /// Sets the authorized account list.
    pub fn with_accounts<I, S>(mut self, accounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accounts = accounts.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the active chain id.
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Sets the balance returned for every account.
    pub fn with_balance(mut self, wei: u128) -> Self {
        self.default_balance = wei;
        self
    }

    /// Sets a per-account balance override.
    pub fn with_balance_for(mut self, address: &str, wei: u128) -> Self {
        self.balances.insert(address.to_lowercase(), wei);
        self
    }

    /// Makes `request_accounts` fail with a rejection.
    pub fn reject_accounts(mut self, reason: &str) -> Self {
        self.reject_accounts = Some(reason.to_string());
        self
    }

    /// Makes `switch_chain` fail.
    pub fn fail_switch(mut self) -> Self {
        self.fail_switch = true;
        self
    }

    /// Number of chain-switch requests received so far.
    pub fn switch_requests(&self) -> usize {
        self.switch_calls.load(Ordering::SeqCst)
    }

    /// Emits an accounts-changed signal to subscribers.
    pub fn emit_accounts_changed<I, S>(&self, accounts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let accounts = accounts.into_iter().map(Into::into).collect();
        let _ = self.events.send(WalletEvent::AccountsChanged(accounts));
    }

    /// Emits a chain-changed signal to subscribers.
    pub fn emit_chain_changed(&self, hex_chain_id: &str) {
        let _ = self
            .events
            .send(WalletEvent::ChainChanged(hex_chain_id.to_string()));
    }
}

#[async_trait]
impl EvmWalletProvider for FakeEvmWallet {
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        if let Some(reason) = &self.reject_accounts {
            return Err(ProviderError::Rejected(reason.clone()));
        }
        Ok(self.accounts.clone())
    }

    async fn chain_id(&self) -> Result<u64, ProviderError> {
        Ok(self.chain_id)
    }

    async fn native_balance(&self, address: &str) -> Result<u128, ProviderError> {
        Ok(self
            .balances
            .get(&address.to_lowercase())
            .copied()
            .unwrap_or(self.default_balance))
    }

    async fn switch_chain(&self, config: &NetworkConfig) -> Result<(), ProviderError> {
        self.switch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_switch {
            return Err(ProviderError::Rejected(format!(
                "switch to {} refused",
                config.name
            )));
        }
        Ok(())
    }

    fn events(&self) -> broadcast::Receiver<WalletEvent> {
        self.events.subscribe()
    }
}

// ============================================================================
// Fake Solana wallet
// ============================================================================

/// A fake injected Phantom-style wallet.
pub struct FakeSolanaWallet {
    pubkey: String,
    reject_connect: Option<String>,
    disconnect_calls: AtomicUsize,
}

impl FakeSolanaWallet {
    /// A wallet that connects as `pubkey`.
    pub fn new(pubkey: &str) -> Self {
        Self {
            pubkey: pubkey.to_string(),
            reject_connect: None,
            disconnect_calls: AtomicUsize::new(0),
        }
    }

    /// Makes `connect` fail with a rejection.
    pub fn reject_connect(mut self, reason: &str) -> Self {
        self.reject_connect = Some(reason.to_string());
        self
    }

    /// Number of disconnect signals received so far.
    pub fn disconnects(&self) -> usize {
        self.disconnect_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SolanaWalletProvider for FakeSolanaWallet {
    async fn connect(&self) -> Result<String, ProviderError> {
        if let Some(reason) = &self.reject_connect {
            return Err(ProviderError::Rejected(reason.clone()));
        }
        Ok(self.pubkey.clone())
    }

    async fn disconnect(&self) -> Result<(), ProviderError> {
        self.disconnect_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Fake EVM RPC
// ============================================================================

/// A fake EVM JSON-RPC client serving a configurable block set.
pub struct FakeEvmRpc {
    head: AtomicU64,
    blocks: Mutex<BTreeMap<u64, EvmBlock>>,
    fail_head: AtomicBool,
    fail_block_at: Mutex<Option<u64>>,
    delay: Mutex<Option<Duration>>,
}

impl FakeEvmRpc {
    /// A client whose chain is at `head` with the given blocks known.
    pub fn with_blocks(head: u64, blocks: Vec<EvmBlock>) -> Self {
        Self {
            head: AtomicU64::new(head),
            blocks: Mutex::new(blocks.into_iter().map(|b| (b.number, b)).collect()),
            fail_head: AtomicBool::new(false),
            fail_block_at: Mutex::new(None),
            delay: Mutex::new(None),
        }
    }

    /// A client whose height query always fails.
    pub fn failing_head() -> Self {
        let rpc = Self::with_blocks(0, Vec::new());
        rpc.fail_head.store(true, Ordering::SeqCst);
        rpc
    }

    /// Makes the fetch of one specific block fail.
    pub fn fail_block_at(self, number: u64) -> Self {
        *self.fail_block_at.lock().unwrap() = Some(number);
        self
    }

    /// Delays every request, for exercising slow in-flight scans.
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock().unwrap() = Some(delay);
        self
    }

    /// Replaces the chain head and block set.
    pub fn set_blocks(&self, head: u64, blocks: Vec<EvmBlock>) {
        self.head.store(head, Ordering::SeqCst);
        *self.blocks.lock().unwrap() = blocks.into_iter().map(|b| (b.number, b)).collect();
    }

    async fn pause(&self) {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl EvmRpc for FakeEvmRpc {
    async fn block_number(&self, _rpc_url: &str) -> Result<u64, ProviderError> {
        self.pause().await;
        if self.fail_head.load(Ordering::SeqCst) {
            return Err(ProviderError::rpc("eth_blockNumber", "unreachable"));
        }
        Ok(self.head.load(Ordering::SeqCst))
    }

    async fn block_with_transactions(
        &self,
        _rpc_url: &str,
        number: u64,
    ) -> Result<Option<EvmBlock>, ProviderError> {
        self.pause().await;
        if *self.fail_block_at.lock().unwrap() == Some(number) {
            return Err(ProviderError::rpc("eth_getBlockByNumber", "unreachable"));
        }
        Ok(self.blocks.lock().unwrap().get(&number).cloned())
    }
}

// ============================================================================
// Fake Solana RPC
// ============================================================================

/// A fake Solana RPC client serving configurable signatures and details.
pub struct FakeSolanaRpc {
    balance: u64,
    fail_balance: bool,
    signatures: Vec<String>,
    fail_signatures: bool,
    details: HashMap<String, SolanaTxDetail>,
}

impl Default for FakeSolanaRpc {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeSolanaRpc {
    /// A client with no signatures and a zero balance.
    pub fn new() -> Self {
        Self {
            balance: 0,
            fail_balance: false,
            signatures: Vec::new(),
            fail_signatures: false,
            details: HashMap::new(),
        }
    }

    /// Sets the lamport balance returned for every address.
    pub fn with_balance(mut self, lamports: u64) -> Self {
        self.balance = lamports;
        self
    }

    /// Makes the balance query fail.
    pub fn fail_balance(mut self) -> Self {
        self.fail_balance = true;
        self
    }

    /// Sets the signature listing, newest first.
    pub fn with_signatures<I, S>(mut self, signatures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.signatures = signatures.into_iter().map(Into::into).collect();
        self
    }

    /// Makes the signature listing fail.
    pub fn fail_signatures(mut self) -> Self {
        self.fail_signatures = true;
        self
    }

    /// Registers the detail served for one signature; signatures without a
    /// registered detail fail their detail fetch.
    pub fn with_detail(mut self, detail: SolanaTxDetail) -> Self {
        self.details.insert(detail.signature.clone(), detail);
        self
    }
}

#[async_trait]
impl SolanaRpc for FakeSolanaRpc {
    async fn lamport_balance(&self, _rpc_url: &str, _address: &str) -> Result<u64, ProviderError> {
        if self.fail_balance {
            return Err(ProviderError::rpc("getBalance", "unreachable"));
        }
        Ok(self.balance)
    }

    async fn signatures_for_address(
        &self,
        _rpc_url: &str,
        _address: &str,
        limit: usize,
    ) -> Result<Vec<String>, ProviderError> {
        if self.fail_signatures {
            return Err(ProviderError::rpc("getSignaturesForAddress", "unreachable"));
        }
        Ok(self.signatures.iter().take(limit).cloned().collect())
    }

    async fn transaction_detail(
        &self,
        _rpc_url: &str,
        signature: &str,
    ) -> Result<SolanaTxDetail, ProviderError> {
        self.details
            .get(signature)
            .cloned()
            .ok_or_else(|| ProviderError::rpc("getTransaction", "not found"))
    }
}
