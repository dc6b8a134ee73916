use connectd_traits::ProviderError;
use connectd_types::NetworkType;

/// Errors surfaced by the primary connect sequence.
///
/// Best-effort secondary operations (chain switch requests, transaction
/// scans, the Solana balance fallback) never produce these; their failures
/// are logged and swallowed.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No injected wallet extension is available for the requested network.
    #[error("no injected wallet provider for {0}")]
    ProviderUnavailable(NetworkType),

    /// The requested network has no connection routine.
    #[error("unsupported network '{0}'")]
    UnsupportedNetwork(String),

    /// A provider-raised error, passed through unmodified (including user
    /// rejections of the authorization prompt).
    #[error(transparent)]
    Provider(#[from] ProviderError),
}
