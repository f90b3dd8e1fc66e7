// Path: crates/types/src/service_configs.rs

//! Shared configuration structures for the sync engine, transport, and
//! content pipeline. All of these are plain data with serde support so they
//! can be loaded from a TOML or JSON deployment file.

use serde::{Deserialize, Serialize};

/// Configuration for the registry sync engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// First proposal number ever assigned by this registry deployment.
    /// Discovery never probes below it.
    pub start_number: u64,
    /// Last-known upper bound used only when the live counter read fails.
    pub fallback_upper_bound: u64,
    /// How many records to read per batched round trip. Kept small to
    /// respect upstream call-size and gas-simulation limits.
    pub batch_size: usize,
    /// Base inter-batch delay in milliseconds; the delay grows linearly
    /// with the batch index to stay under upstream rate limits.
    pub batch_delay_ms: u64,
    /// Ceiling for the inter-batch delay in milliseconds.
    pub batch_delay_cap_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            start_number: 209,
            fallback_upper_bound: 230,
            batch_size: 5,
            batch_delay_ms: 200,
            batch_delay_cap_ms: 1_000,
        }
    }
}

/// Configuration for the JSON-RPC transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Upstream JSON-RPC endpoints, tried in rotating order.
    pub endpoints: Vec<String>,
    /// How many attempts to make for a transient failure before giving up.
    pub max_retries: usize,
    /// Base retry delay in milliseconds; doubles per attempt.
    pub retry_base_ms: u64,
    /// Ceiling for the retry delay in milliseconds.
    pub retry_cap_ms: u64,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            endpoints: Vec::new(),
            max_retries: 5,
            retry_base_ms: 80,
            retry_cap_ms: 2_000,
            request_timeout_ms: 10_000,
        }
    }
}

/// Configuration for the content store client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Base URL of the IPFS HTTP API (or a pinning service exposing it).
    pub api_url: String,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:5001".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_config_toml_roundtrip() {
        let cfg = SyncConfig::default();
        let s = toml::to_string(&cfg).unwrap();
        let back: SyncConfig = toml::from_str(&s).unwrap();
        assert_eq!(cfg, back);
        assert_eq!(back.batch_size, 5);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let cfg: SyncConfig = toml::from_str("batch_size = 10").unwrap();
        assert_eq!(cfg.batch_size, 10);
        assert_eq!(cfg.start_number, SyncConfig::default().start_number);
    }

    #[test]
    fn test_transport_config_roundtrip() {
        let cfg = TransportConfig {
            endpoints: vec![
                "https://rpc-a.example".to_string(),
                "https://rpc-b.example".to_string(),
            ],
            ..Default::default()
        };
        let s = toml::to_string(&cfg).unwrap();
        let back: TransportConfig = toml::from_str(&s).unwrap();
        assert_eq!(cfg, back);
    }
}
