use connectd_traits::{EvmBlock, EvmRpc};
use connectd_types::{NetworkType, Transaction};

use crate::amount::format_wei;

/// How many recent blocks the activity scan inspects, head inclusive.
pub const RECENT_BLOCK_WINDOW: u64 = 10;

/// Scans the most recent blocks for transactions touching `address`.
///
/// Walks the [`RECENT_BLOCK_WINDOW`] newest blocks in descending order and
/// keeps every transaction whose sender or recipient equals `address`
/// (case-insensitive). Values are converted from wei to the native unit and
/// each entry is stamped with its block timestamp and `network`.
///
/// Errors never escape: a failed height read yields an empty list, a failed
/// block fetch ends the walk with whatever was collected so far, and a block
/// the node does not know is skipped.
pub async fn scan_recent_blocks(
    rpc: &dyn EvmRpc,
    rpc_url: &str,
    address: &str,
    network: NetworkType,
) -> Vec<Transaction> {
    let head = match rpc.block_number(rpc_url).await {
        Ok(number) => number,
        Err(err) => {
            tracing::warn!(%err, %network, "failed to read block height");
            return Vec::new();
        }
    };

    let mut collected = Vec::new();
    let oldest = head.saturating_sub(RECENT_BLOCK_WINDOW - 1);
    for number in (oldest..=head).rev() {
        let block = match rpc.block_with_transactions(rpc_url, number).await {
            Ok(Some(block)) => block,
            Ok(None) => continue,
            Err(err) => {
                tracing::warn!(%err, number, %network, "block fetch failed");
                break;
            }
        };
        let EvmBlock {
            timestamp,
            transactions,
            ..
        } = block;
        for tx in transactions {
            let from_match = tx.from.eq_ignore_ascii_case(address);
            let to_match = tx
                .to
                .as_deref()
                .is_some_and(|to| to.eq_ignore_ascii_case(address));
            if !from_match && !to_match {
                continue;
            }
            collected.push(Transaction {
                hash: tx.hash,
                from: tx.from,
                to: tx.to.unwrap_or_default(),
                value: format_wei(tx.value_wei),
                timestamp,
                network,
            });
        }
    }
    collected
}
