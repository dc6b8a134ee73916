use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Chain id of Ethereum mainnet.
pub const ETHEREUM_CHAIN_ID: u64 = 1;
/// Chain id of Polygon PoS mainnet.
pub const POLYGON_CHAIN_ID: u64 = 137;
/// Cluster name used as the opaque chain identifier for Solana.
pub const SOLANA_CLUSTER: &str = "mainnet-beta";

/// The networks a session can connect to.
///
/// Closed enum: every variant has a [`NetworkConfig`] and a connection
/// routine, so registry lookups never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// Ethereum mainnet.
    Ethereum,
    /// Polygon PoS mainnet.
    Polygon,
    /// Solana mainnet-beta.
    Solana,
}

impl NetworkType {
    /// All supported networks, in the order hosts should list them.
    pub const ALL: [NetworkType; 3] =
        [NetworkType::Ethereum, NetworkType::Polygon, NetworkType::Solana];

    /// Returns the static configuration for this network.
    pub fn config(&self) -> NetworkConfig {
        match self {
            NetworkType::Ethereum => NetworkConfig::ethereum(),
            NetworkType::Polygon => NetworkConfig::polygon(),
            NetworkType::Solana => NetworkConfig::solana(),
        }
    }

    /// True for chains sharing the EVM address and transaction shape.
    pub fn is_evm(&self) -> bool {
        !matches!(self, NetworkType::Solana)
    }

    /// The lowercase identifier used in string-typed APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkType::Ethereum => "ethereum",
            NetworkType::Polygon => "polygon",
            NetworkType::Solana => "solana",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a network name that has no connection routine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown network '{0}'")]
pub struct UnknownNetwork(pub String);

impl FromStr for NetworkType {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ethereum" => Ok(NetworkType::Ethereum),
            "polygon" => Ok(NetworkType::Polygon),
            "solana" => Ok(NetworkType::Solana),
            _ => Err(UnknownNetwork(s.to_string())),
        }
    }
}

/// A chain identifier as reported by a connected session.
///
/// EVM chains use numeric ids; Solana identifies clusters by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChainId {
    /// Numeric id of an EVM chain (1 for Ethereum, 137 for Polygon).
    Numeric(u64),
    /// Opaque identifier of a non-EVM chain.
    Named(String),
}

impl ChainId {
    /// Returns the numeric id for EVM chains, None otherwise.
    pub fn as_numeric(&self) -> Option<u64> {
        match self {
            ChainId::Numeric(id) => Some(*id),
            ChainId::Named(_) => None,
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainId::Numeric(id) => write!(f, "{id}"),
            ChainId::Named(name) => f.write_str(name),
        }
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        ChainId::Numeric(id)
    }
}

impl From<&str> for ChainId {
    fn from(name: &str) -> Self {
        ChainId::Named(name.to_string())
    }
}

/// Static configuration of a supported network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Chain identifier.
    pub id: ChainId,
    /// Display name.
    pub name: String,
    /// Native currency symbol.
    pub symbol: String,
    /// Decimal places of the native unit (18 for wei, 9 for lamports).
    pub decimals: u8,
    /// Public RPC endpoint used for balance and transaction queries.
    pub rpc_url: String,
    /// Block explorer base URL.
    pub explorer_url: String,
}

impl NetworkConfig {
    /// Ethereum mainnet configuration.
    pub fn ethereum() -> Self {
        NetworkConfig {
            id: ChainId::Numeric(ETHEREUM_CHAIN_ID),
            name: "Ethereum".to_string(),
            symbol: "ETH".to_string(),
            decimals: 18,
            rpc_url: "https://eth.llamarpc.com".to_string(),
            explorer_url: "https://etherscan.io".to_string(),
        }
    }

    /// Polygon PoS mainnet configuration.
    pub fn polygon() -> Self {
        NetworkConfig {
            id: ChainId::Numeric(POLYGON_CHAIN_ID),
            name: "Polygon".to_string(),
            symbol: "MATIC".to_string(),
            decimals: 18,
            rpc_url: "https://polygon-rpc.com".to_string(),
            explorer_url: "https://polygonscan.com".to_string(),
        }
    }

    /// Solana mainnet-beta configuration.
    pub fn solana() -> Self {
        NetworkConfig {
            id: ChainId::Named(SOLANA_CLUSTER.to_string()),
            name: "Solana".to_string(),
            symbol: "SOL".to_string(),
            decimals: 9,
            rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
            explorer_url: "https://explorer.solana.com".to_string(),
        }
    }

    /// Explorer link for a transaction hash or signature.
    pub fn tx_url(&self, hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url, hash)
    }

    /// Explorer link for an account address.
    pub fn address_url(&self, address: &str) -> String {
        format!("{}/address/{}", self.explorer_url, address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Registry Tests
    // ========================================================================

    #[test]
    fn test_ethereum_config() {
        let config = NetworkConfig::ethereum();
        assert_eq!(config.id, ChainId::Numeric(1));
        assert_eq!(config.symbol, "ETH");
        assert_eq!(config.decimals, 18);
        assert!(config.rpc_url.starts_with("https://"));
    }

    #[test]
    fn test_polygon_config() {
        let config = NetworkConfig::polygon();
        assert_eq!(config.id, ChainId::Numeric(137));
        assert_eq!(config.symbol, "MATIC");
        assert_eq!(config.decimals, 18);
    }

    #[test]
    fn test_solana_config() {
        let config = NetworkConfig::solana();
        assert_eq!(config.id, ChainId::Named("mainnet-beta".to_string()));
        assert_eq!(config.symbol, "SOL");
        assert_eq!(config.decimals, 9);
    }

    #[test]
    fn test_registry_lookup_total() {
        for network in NetworkType::ALL {
            let config = network.config();
            assert!(!config.name.is_empty());
            assert!(!config.rpc_url.is_empty());
            assert!(!config.explorer_url.is_empty());
        }
    }

    #[test]
    fn test_explorer_links() {
        let config = NetworkConfig::ethereum();
        assert_eq!(
            config.tx_url("0xabc"),
            "https://etherscan.io/tx/0xabc"
        );
        assert_eq!(
            config.address_url("0xdef"),
            "https://etherscan.io/address/0xdef"
        );
    }

    // ========================================================================
    // NetworkType Tests
    // ========================================================================

    #[test]
    fn test_network_parse_roundtrip() {
        for network in NetworkType::ALL {
            assert_eq!(network.as_str().parse::<NetworkType>(), Ok(network));
        }
    }

    #[test]
    fn test_network_parse_case_insensitive() {
        assert_eq!("Ethereum".parse::<NetworkType>(), Ok(NetworkType::Ethereum));
        assert_eq!("SOLANA".parse::<NetworkType>(), Ok(NetworkType::Solana));
    }

    #[test]
    fn test_network_parse_unknown() {
        let err = "dogecoin".parse::<NetworkType>().unwrap_err();
        assert_eq!(err, UnknownNetwork("dogecoin".to_string()));
        assert!(err.to_string().contains("dogecoin"));
    }

    #[test]
    fn test_is_evm() {
        assert!(NetworkType::Ethereum.is_evm());
        assert!(NetworkType::Polygon.is_evm());
        assert!(!NetworkType::Solana.is_evm());
    }

    // ========================================================================
    // ChainId Tests
    // ========================================================================

    #[test]
    fn test_chain_id_display() {
        assert_eq!(ChainId::Numeric(137).to_string(), "137");
        assert_eq!(ChainId::Named("mainnet-beta".into()).to_string(), "mainnet-beta");
    }

    #[test]
    fn test_chain_id_as_numeric() {
        assert_eq!(ChainId::Numeric(1).as_numeric(), Some(1));
        assert_eq!(ChainId::from("devnet").as_numeric(), None);
    }

    #[test]
    fn test_chain_id_serialization() {
        let numeric = serde_json::to_string(&ChainId::Numeric(137)).unwrap();
        assert_eq!(numeric, "137");
        let named = serde_json::to_string(&ChainId::Named("mainnet-beta".into())).unwrap();
        assert_eq!(named, "\"mainnet-beta\"");
    }
}
