use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use connectd_evm::format_wei;
use connectd_solana::format_lamports;
use connectd_traits::{EvmRpc, EvmWalletProvider, SolanaRpc, SolanaWalletProvider, WalletEvent};
use connectd_types::{ChainId, NetworkConfig, NetworkType, WalletState};

use crate::error::SessionError;
use crate::events;

/// The wallet session controller.
///
/// Owns the mutable [`WalletState`] record and exposes the imperative
/// operations ([`connect`](Self::connect), [`disconnect`](Self::disconnect))
/// plus the passive wallet-event subscriptions. Hosts observe the state
/// through [`watch`](Self::watch) and never mutate it.
///
/// Build with [`WalletSession::builder`] inside a tokio runtime; the wallet
/// providers are injected so tests can substitute fakes.
pub struct WalletSession {
    evm_wallet: Option<Arc<dyn EvmWalletProvider>>,
    solana_wallet: Option<Arc<dyn SolanaWalletProvider>>,
    evm_rpc: Arc<dyn EvmRpc>,
    solana_rpc: Arc<dyn SolanaRpc>,
    state: watch::Sender<WalletState>,
    generation: AtomicU64,
    listener: Mutex<Option<JoinHandle<()>>>,
}

/// Builder for [`WalletSession`].
#[derive(Default)]
pub struct WalletSessionBuilder {
    evm_wallet: Option<Arc<dyn EvmWalletProvider>>,
    solana_wallet: Option<Arc<dyn SolanaWalletProvider>>,
    evm_rpc: Option<Arc<dyn EvmRpc>>,
    solana_rpc: Option<Arc<dyn SolanaRpc>>,
}

impl WalletSessionBuilder {
    /// Injects the EVM wallet provider. Leaving it unset models the absence
    /// of an injected EVM wallet extension.
    pub fn evm_wallet(mut self, provider: Arc<dyn EvmWalletProvider>) -> Self {
        self.evm_wallet = Some(provider);
        self
    }

    /// Injects the Solana wallet provider. Leaving it unset models the
    /// absence of an injected Solana wallet extension.
    pub fn solana_wallet(mut self, provider: Arc<dyn SolanaWalletProvider>) -> Self {
        self.solana_wallet = Some(provider);
        self
    }

    /// Overrides the EVM RPC client used for transaction scans.
    pub fn evm_rpc(mut self, rpc: Arc<dyn EvmRpc>) -> Self {
        self.evm_rpc = Some(rpc);
        self
    }

    /// Overrides the Solana RPC client used for balances and scans.
    pub fn solana_rpc(mut self, rpc: Arc<dyn SolanaRpc>) -> Self {
        self.solana_rpc = Some(rpc);
        self
    }

    /// Builds the session and, when an EVM wallet is present, spawns the
    /// wallet-event listener. Must be called within a tokio runtime.
    pub fn build(self) -> Arc<WalletSession> {
        let (state, _) = watch::channel(WalletState::disconnected());
        let session = Arc::new(WalletSession {
            evm_wallet: self.evm_wallet,
            solana_wallet: self.solana_wallet,
            evm_rpc: self
                .evm_rpc
                .unwrap_or_else(|| Arc::new(connectd_evm::EvmClient::new())),
            solana_rpc: self
                .solana_rpc
                .unwrap_or_else(|| Arc::new(connectd_solana::SolanaClient::new())),
            state,
            generation: AtomicU64::new(0),
            listener: Mutex::new(None),
        });
        if let Some(wallet) = &session.evm_wallet {
            let handle = events::spawn_listener(Arc::downgrade(&session), wallet.events());
            *session.listener.lock().expect("listener lock") = Some(handle);
        }
        session
    }
}

/// Outcome of a network-specific connection routine, normalized into the
/// fields the state record carries.
struct ConnectedAccount {
    account: String,
    chain_id: ChainId,
    balance: String,
}

impl WalletSession {
    /// Starts building a session.
    pub fn builder() -> WalletSessionBuilder {
        WalletSessionBuilder::default()
    }

    /// Returns a snapshot of the current session state.
    pub fn state(&self) -> WalletState {
        self.state.borrow().clone()
    }

    /// Subscribes to session state changes.
    pub fn watch(&self) -> watch::Receiver<WalletState> {
        self.state.subscribe()
    }

    /// The configurations of every network a session can connect to.
    pub fn supported_networks(&self) -> Vec<NetworkConfig> {
        NetworkType::ALL.iter().map(|network| network.config()).collect()
    }

    /// Connects the wallet for `network`.
    ///
    /// Repeated calls while already connected switch networks rather than
    /// fail. On success the account, chain id, balance, and network are
    /// committed together and a recent-transaction scan runs for the new
    /// account; scan failures never affect the connect result. On failure
    /// only the connecting flag is restored and the error is returned for
    /// the host to report.
    pub async fn connect(&self, network: NetworkType) -> Result<(), SessionError> {
        let generation = self.begin_operation();
        self.state.send_modify(|state| state.is_connecting = true);
        tracing::info!(%network, "connecting wallet");

        let result = match network {
            NetworkType::Ethereum | NetworkType::Polygon => self.connect_evm(network).await,
            NetworkType::Solana => self.connect_solana().await,
        };

        match result {
            Ok(connected) => {
                let account = connected.account.clone();
                self.commit(generation, |state| {
                    state.account = Some(connected.account);
                    state.chain_id = Some(connected.chain_id);
                    state.balance = Some(connected.balance);
                    state.network = Some(network);
                    state.is_connecting = false;
                });
                self.run_scan(network, &account, generation).await;
                Ok(())
            }
            Err(err) => {
                self.commit(generation, |state| state.is_connecting = false);
                tracing::warn!(%err, %network, "connect failed");
                Err(err)
            }
        }
    }

    /// Connects by network name, for string-typed host surfaces.
    ///
    /// Unknown names fail with [`SessionError::UnsupportedNetwork`] and
    /// leave the session state untouched.
    pub async fn connect_named(&self, network: &str) -> Result<(), SessionError> {
        match network.parse::<NetworkType>() {
            Ok(network) => self.connect(network).await,
            Err(unknown) => Err(SessionError::UnsupportedNetwork(unknown.0)),
        }
    }

    /// Disconnects the session. Synchronous and infallible.
    ///
    /// Resets the state record to the disconnected default and invalidates
    /// any in-flight connect or scan. A Solana session additionally sends
    /// the provider a best-effort disconnect signal; EVM providers have no
    /// programmatic disconnect and get no call.
    pub fn disconnect(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let was_solana = self.state.borrow().network == Some(NetworkType::Solana);
        if was_solana {
            if let Some(wallet) = self.solana_wallet.clone() {
                match tokio::runtime::Handle::try_current() {
                    Ok(handle) => {
                        handle.spawn(async move {
                            if let Err(err) = wallet.disconnect().await {
                                tracing::debug!(%err, "solana disconnect signal failed");
                            }
                        });
                    }
                    Err(_) => tracing::debug!("no runtime, skipping solana disconnect signal"),
                }
            }
        }
        self.state.send_modify(|state| *state = WalletState::disconnected());
        tracing::info!("wallet disconnected");
    }

    /// Tears down the wallet-event listener. Idempotent; also runs on drop.
    pub fn close(&self) {
        if let Some(handle) = self.listener.lock().expect("listener lock").take() {
            handle.abort();
        }
    }

    // ------------------------------------------------------------------
    // Connection routines
    // ------------------------------------------------------------------

    async fn connect_evm(&self, network: NetworkType) -> Result<ConnectedAccount, SessionError> {
        let wallet = self
            .evm_wallet
            .as_ref()
            .ok_or(SessionError::ProviderUnavailable(network))?;
        let config = network.config();
        if network == NetworkType::Polygon {
            // Best-effort: a refused switch falls through to whatever chain
            // the wallet is on.
            if let Err(err) = wallet.switch_chain(&config).await {
                tracing::warn!(%err, "chain switch request failed, continuing");
            }
        }
        let connection = connectd_evm::connect_injected(wallet.as_ref()).await?;
        Ok(ConnectedAccount {
            account: connection.account,
            chain_id: ChainId::Numeric(connection.chain_id),
            balance: format_wei(connection.balance_wei),
        })
    }

    async fn connect_solana(&self) -> Result<ConnectedAccount, SessionError> {
        let wallet = self
            .solana_wallet
            .as_ref()
            .ok_or(SessionError::ProviderUnavailable(NetworkType::Solana))?;
        let config = NetworkType::Solana.config();
        let connection =
            connectd_solana::connect_injected(wallet.as_ref(), self.solana_rpc.as_ref(), &config.rpc_url)
                .await?;
        Ok(ConnectedAccount {
            account: connection.account,
            chain_id: config.id,
            balance: format_lamports(connection.lamports),
        })
    }

    // ------------------------------------------------------------------
    // Transaction scan
    // ------------------------------------------------------------------

    async fn run_scan(&self, network: NetworkType, account: &str, generation: u64) {
        if !self.commit(generation, |state| state.is_loading_txs = true) {
            return;
        }
        let config = network.config();
        let transactions = match network {
            NetworkType::Ethereum | NetworkType::Polygon => {
                connectd_evm::scan_recent_blocks(
                    self.evm_rpc.as_ref(),
                    &config.rpc_url,
                    account,
                    network,
                )
                .await
            }
            NetworkType::Solana => {
                connectd_solana::scan_recent_signatures(
                    self.solana_rpc.as_ref(),
                    &config.rpc_url,
                    account,
                )
                .await
            }
        };
        let committed = self.commit(generation, |state| {
            state.transactions = transactions;
            state.is_loading_txs = false;
        });
        if !committed {
            tracing::debug!(%network, "discarding stale scan results");
        }
    }

    // ------------------------------------------------------------------
    // Wallet events
    // ------------------------------------------------------------------

    pub(crate) async fn handle_wallet_event(&self, event: WalletEvent) {
        match event {
            WalletEvent::AccountsChanged(accounts) => match accounts.into_iter().next() {
                Some(account) => {
                    tracing::info!(%account, "wallet account changed");
                    self.state
                        .send_modify(|state| state.account = Some(account.clone()));
                    self.refresh_evm_balance(&account).await;
                    // the chain id is not re-read on account switches
                }
                None => {
                    tracing::info!("wallet reported no authorized accounts");
                    self.state.send_modify(|state| state.account = None);
                }
            },
            WalletEvent::ChainChanged(hex) => {
                match u64::from_str_radix(hex.trim_start_matches("0x"), 16) {
                    Ok(chain_id) => {
                        tracing::info!(chain_id, "wallet chain changed");
                        self.state
                            .send_modify(|state| state.chain_id = Some(ChainId::Numeric(chain_id)));
                    }
                    Err(err) => tracing::warn!(%err, raw = %hex, "ignoring unparsable chain id"),
                }
            }
        }
    }

    async fn refresh_evm_balance(&self, account: &str) {
        let Some(wallet) = self.evm_wallet.as_ref() else {
            return;
        };
        match wallet.native_balance(account).await {
            Ok(wei) => self
                .state
                .send_modify(|state| state.balance = Some(format_wei(wei))),
            Err(err) => tracing::warn!(%err, "balance refresh failed"),
        }
    }

    // ------------------------------------------------------------------
    // Generation token
    // ------------------------------------------------------------------

    fn begin_operation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Applies `update` only when `generation` is still the newest
    /// operation, so a slow in-flight connect or scan cannot overwrite the
    /// state a later operation owns.
    fn commit(&self, generation: u64, update: impl FnOnce(&mut WalletState)) -> bool {
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            update(state);
            true
        })
    }
}

impl Drop for WalletSession {
    fn drop(&mut self) {
        self.close();
    }
}
