use connectd_traits::{ProviderError, SolanaRpc, SolanaWalletProvider};

/// Result of a successful Solana wallet connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolanaConnection {
    /// Base58 public key of the connected account.
    pub account: String,
    /// Lamport balance of the account; zero when the balance read failed.
    pub lamports: u64,
}

/// Connects to an injected Phantom-style wallet.
///
/// Requests a connection for the public key, then reads the lamport balance
/// through the configured RPC endpoint. A failed balance read does not fail
/// the connect; the balance degrades to zero.
pub async fn connect_injected(
    wallet: &dyn SolanaWalletProvider,
    rpc: &dyn SolanaRpc,
    rpc_url: &str,
) -> Result<SolanaConnection, ProviderError> {
    let account = wallet.connect().await?;
    let lamports = match rpc.lamport_balance(rpc_url, &account).await {
        Ok(lamports) => lamports,
        Err(err) => {
            tracing::warn!(%err, %account, "balance query failed, defaulting to zero");
            0
        }
    };
    Ok(SolanaConnection { account, lamports })
}

#[cfg(test)]
mod tests {
    use super::*;
    use connectd_testing::{FakeSolanaRpc, FakeSolanaWallet};

    const PUBKEY: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";

    #[tokio::test]
    async fn test_connect_reads_pubkey_and_balance() {
        let wallet = FakeSolanaWallet::new(PUBKEY);
        let rpc = FakeSolanaRpc::new().with_balance(3_000_000_000);

        let conn = connect_injected(&wallet, &rpc, "http://fake").await.unwrap();
        assert_eq!(conn.account, PUBKEY);
        assert_eq!(conn.lamports, 3_000_000_000);
    }

    #[tokio::test]
    async fn test_balance_failure_degrades_to_zero() {
        let wallet = FakeSolanaWallet::new(PUBKEY);
        let rpc = FakeSolanaRpc::new().fail_balance();

        let conn = connect_injected(&wallet, &rpc, "http://fake").await.unwrap();
        assert_eq!(conn.lamports, 0);
    }

    #[tokio::test]
    async fn test_wallet_rejection_propagates() {
        let wallet = FakeSolanaWallet::new(PUBKEY).reject_connect("user closed popup");
        let rpc = FakeSolanaRpc::new();

        let err = connect_injected(&wallet, &rpc, "http://fake").await.unwrap_err();
        assert!(err.to_string().contains("user closed popup"));
    }
}
