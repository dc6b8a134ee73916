use connectd_traits::SolanaRpc;
use connectd_types::{NetworkType, Transaction};

use crate::amount::format_lamport_delta;

/// How many recent signatures the activity scan fetches.
pub const RECENT_SIGNATURE_LIMIT: usize = 10;

/// Scans the account's most recent confirmed transactions.
///
/// Fetches up to [`RECENT_SIGNATURE_LIMIT`] signatures for `address`, then
/// each transaction's detail. The displayed value is the balance delta of
/// the second account key (post minus pre, in SOL). Entries whose detail
/// fetch fails are dropped; a failed signature listing yields an empty list.
pub async fn scan_recent_signatures(
    rpc: &dyn SolanaRpc,
    rpc_url: &str,
    address: &str,
) -> Vec<Transaction> {
    let signatures = match rpc
        .signatures_for_address(rpc_url, address, RECENT_SIGNATURE_LIMIT)
        .await
    {
        Ok(signatures) => signatures,
        Err(err) => {
            tracing::warn!(%err, %address, "signature listing failed");
            return Vec::new();
        }
    };

    let mut collected = Vec::new();
    for signature in signatures {
        let detail = match rpc.transaction_detail(rpc_url, &signature).await {
            Ok(detail) => detail,
            Err(err) => {
                tracing::debug!(%err, %signature, "transaction detail unavailable, dropping entry");
                continue;
            }
        };
        let delta = match (detail.post_balances.get(1), detail.pre_balances.get(1)) {
            (Some(&post), Some(&pre)) => post as i128 - pre as i128,
            _ => 0,
        };
        collected.push(Transaction {
            hash: detail.signature,
            from: detail.account_keys.first().cloned().unwrap_or_default(),
            to: detail.account_keys.get(1).cloned().unwrap_or_default(),
            value: format_lamport_delta(delta),
            timestamp: detail.block_time.unwrap_or(0).max(0) as u64,
            network: NetworkType::Solana,
        });
    }
    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use connectd_testing::{detail, FakeSolanaRpc};

    const ME: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";
    const PEER: &str = "9aE476sH92Vz7DMPyq5WLPkrKWivxeuTKEFKd2sZZcde";

    #[tokio::test]
    async fn test_scan_maps_details() {
        let rpc = FakeSolanaRpc::new()
            .with_signatures(["sig1", "sig2"])
            .with_detail(detail("sig1", &[ME, PEER], &[5_000_000_000, 0], &[4_000_000_000, 1_000_000_000], Some(1_700_000_000)))
            .with_detail(detail("sig2", &[PEER, ME], &[2_000_000_000, 500_000_000], &[1_500_000_000, 1_000_000_000], Some(1_700_000_050)));

        let txs = scan_recent_signatures(&rpc, "http://fake", ME).await;
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].hash, "sig1");
        assert_eq!(txs[0].from, ME);
        assert_eq!(txs[0].to, PEER);
        assert_eq!(txs[0].value, "1.0");
        assert_eq!(txs[0].timestamp, 1_700_000_000);
        assert_eq!(txs[1].value, "0.5");
        assert!(txs.iter().all(|t| t.network == NetworkType::Solana));
    }

    #[tokio::test]
    async fn test_scan_drops_entries_without_detail() {
        // Five signatures, one detail fetch fails: four entries survive.
        let rpc = FakeSolanaRpc::new()
            .with_signatures(["s1", "s2", "s3", "s4", "s5"])
            .with_detail(detail("s1", &[ME, PEER], &[2, 0], &[1, 1], Some(10)))
            .with_detail(detail("s2", &[ME, PEER], &[2, 0], &[1, 1], Some(20)))
            .with_detail(detail("s4", &[ME, PEER], &[2, 0], &[1, 1], Some(40)))
            .with_detail(detail("s5", &[ME, PEER], &[2, 0], &[1, 1], Some(50)));

        let txs = scan_recent_signatures(&rpc, "http://fake", ME).await;
        assert_eq!(txs.len(), 4);
        assert!(txs.iter().all(|t| t.hash != "s3"));
    }

    #[tokio::test]
    async fn test_scan_single_key_entry_has_empty_recipient() {
        let rpc = FakeSolanaRpc::new()
            .with_signatures(["solo"])
            .with_detail(detail("solo", &[ME], &[1_000], &[900], None));

        let txs = scan_recent_signatures(&rpc, "http://fake", ME).await;
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].to, "");
        assert_eq!(txs[0].value, "0.0");
        assert_eq!(txs[0].timestamp, 0);
    }

    #[tokio::test]
    async fn test_scan_negative_delta_is_signed() {
        let rpc = FakeSolanaRpc::new()
            .with_signatures(["out"])
            .with_detail(detail("out", &[PEER, ME], &[0, 2_000_000_000], &[0, 1_000_000_000], Some(5)));

        let txs = scan_recent_signatures(&rpc, "http://fake", ME).await;
        assert_eq!(txs[0].value, "-1.0");
    }

    #[tokio::test]
    async fn test_scan_listing_failure_yields_empty() {
        let rpc = FakeSolanaRpc::new().fail_signatures();
        let txs = scan_recent_signatures(&rpc, "http://fake", ME).await;
        assert!(txs.is_empty());
    }
}
