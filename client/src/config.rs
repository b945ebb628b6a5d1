//! Client configuration with TOML file support.

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ballot_types::ChainId;

/// The configuration could not be read or parsed.
#[derive(Debug, Error)]
#[error("invalid configuration: {0}")]
pub struct ConfigError(String);

/// Configuration for the ballot client.
///
/// Can be loaded from a TOML file via [`ClientConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// JSON-RPC endpoint of the wallet-enabled node.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Address of the deployed voting contract.
    #[serde(default = "default_contract_address")]
    pub contract_address: Address,

    /// Chain the contract is deployed on.
    #[serde(default = "default_chain_id")]
    pub chain_id: ChainId,

    /// Display name for candidate A.
    #[serde(default = "default_candidate_a")]
    pub candidate_a: String,

    /// Display name for candidate B.
    #[serde(default = "default_candidate_b")]
    pub candidate_b: String,

    /// How often the provider is polled for account/chain drift, in
    /// milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_rpc_url() -> String {
    "http://127.0.0.1:8545".to_string()
}

fn default_contract_address() -> Address {
    // The ballot deployment this client was built against.
    address!("E4b19EC4991b31466AE30e4EB6203504661FC0e6")
}

fn default_chain_id() -> ChainId {
    ChainId::SEPOLIA
}

fn default_candidate_a() -> String {
    "Candidate A".to_string()
}

fn default_candidate_b() -> String {
    "Candidate B".to_string()
}

fn default_poll_interval_ms() -> u64 {
    5_000
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("ClientConfig is always serializable to TOML")
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            contract_address: default_contract_address(),
            chain_id: default_chain_id(),
            candidate_a: default_candidate_a(),
            candidate_b: default_candidate_b(),
            poll_interval_ms: default_poll_interval_ms(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = ClientConfig::default();
        let toml_str = config.to_toml_string();
        let parsed = ClientConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.rpc_url, config.rpc_url);
        assert_eq!(parsed.contract_address, config.contract_address);
        assert_eq!(parsed.chain_id, config.chain_id);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = ClientConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.rpc_url, "http://127.0.0.1:8545");
        assert_eq!(config.chain_id, ChainId::SEPOLIA);
        assert_eq!(config.candidate_a, "Candidate A");
        assert_eq!(config.poll_interval_ms, 5_000);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            rpc_url = "http://localhost:9545"
            candidate_a = "Long"
            candidate_b = "Kawser"
        "#;
        let config = ClientConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.rpc_url, "http://localhost:9545");
        assert_eq!(config.candidate_a, "Long");
        assert_eq!(config.candidate_b, "Kawser");
        assert_eq!(config.log_level, "info"); // default
    }

    #[test]
    fn contract_address_parses_from_hex_string() {
        let toml = r#"contract_address = "0x0000000000000000000000000000000000000042""#;
        let config = ClientConfig::from_toml_str(toml).expect("should parse");
        let mut expected = [0u8; 20];
        expected[19] = 0x42;
        assert_eq!(config.contract_address, Address::from(expected));
    }

    #[test]
    fn missing_file_returns_config_error() {
        assert!(ClientConfig::from_toml_file("/nonexistent/ballot.toml").is_err());
    }

    #[test]
    fn invalid_address_is_rejected() {
        let toml = r#"contract_address = "not-an-address""#;
        assert!(ClientConfig::from_toml_str(toml).is_err());
    }
}
