use connectd_traits::{EvmWalletProvider, ProviderError};

/// Result of a successful EVM wallet connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvmConnection {
    /// Authorized account address.
    pub account: String,
    /// Active chain id as reported by the wallet.
    pub chain_id: u64,
    /// Native balance of the account in wei.
    pub balance_wei: u128,
}

/// Connects to an injected EVM wallet.
///
/// Requests account access (prompting the user if needed), then reads the
/// active chain id and the first account's native balance. An empty account
/// list counts as a rejection.
pub async fn connect_injected(
    wallet: &dyn EvmWalletProvider,
) -> Result<EvmConnection, ProviderError> {
    let accounts = wallet.request_accounts().await?;
    let account = accounts
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Rejected("no accounts authorized".to_string()))?;
    let chain_id = wallet.chain_id().await?;
    let balance_wei = wallet.native_balance(&account).await?;
    Ok(EvmConnection {
        account,
        chain_id,
        balance_wei,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use connectd_testing::FakeEvmWallet;

    #[tokio::test]
    async fn test_connect_reads_account_chain_and_balance() {
        let wallet = FakeEvmWallet::new()
            .with_accounts(["0xAbC0000000000000000000000000000000000001"])
            .with_chain_id(1)
            .with_balance(2_500_000_000_000_000_000);

        let conn = connect_injected(&wallet).await.unwrap();
        assert_eq!(conn.account, "0xAbC0000000000000000000000000000000000001");
        assert_eq!(conn.chain_id, 1);
        assert_eq!(conn.balance_wei, 2_500_000_000_000_000_000);
    }

    #[tokio::test]
    async fn test_connect_empty_accounts_is_rejection() {
        let wallet = FakeEvmWallet::new();
        let err = connect_injected(&wallet).await.unwrap_err();
        assert!(matches!(err, ProviderError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_connect_passes_through_user_rejection() {
        let wallet = FakeEvmWallet::new().reject_accounts("user denied access");
        let err = connect_injected(&wallet).await.unwrap_err();
        assert!(err.to_string().contains("user denied access"));
    }
}
