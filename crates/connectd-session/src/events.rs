use std::sync::Weak;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use connectd_traits::WalletEvent;

use crate::session::WalletSession;

/// Consumes the wallet's event stream for the life of the session.
///
/// The task holds only a weak reference, so dropping the last session handle
/// ends the loop; `WalletSession::close` aborts it explicitly.
pub(crate) fn spawn_listener(
    session: Weak<WalletSession>,
    mut events: broadcast::Receiver<WalletEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    let Some(session) = session.upgrade() else {
                        break;
                    };
                    session.handle_wallet_event(event).await;
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "wallet event stream lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
