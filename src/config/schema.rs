//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so an empty file (or no file) is a valid config.

use serde::{Deserialize, Serialize};

/// Root configuration for the transaction history service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Ledger RPC endpoint and fetch settings.
    pub rpc: RpcConfig,

    /// Rate limiting configuration.
    pub rate_limit: RateLimitConfig,

    /// Where result artifacts are written.
    pub storage: StorageConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Commitment level attached to every RPC call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }
}

/// Ledger RPC configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    /// JSON-RPC endpoint URL.
    pub url: String,

    /// Commitment level for probe, listing and resolution calls.
    pub commitment: Commitment,

    /// Bootstrap attempts before the gateway gives up.
    pub connect_attempts: u32,

    /// Fixed delay between bootstrap attempts in milliseconds.
    pub connect_retry_delay_ms: u64,

    /// Maximum number of signatures listed per request.
    pub signature_limit: usize,

    /// Upper bound on in-flight `getTransaction` calls per request.
    pub max_concurrent_resolutions: usize,

    /// Highest transaction version the node may return.
    /// Absent means legacy transactions only.
    pub max_supported_transaction_version: Option<u8>,

    /// Total attempts for a single call when the node answers 429.
    pub rate_limit_retries: u32,

    /// Initial delay after a 429, doubled on every further retry.
    pub rate_limit_backoff_ms: u64,

    /// Per-call HTTP timeout. Absent means calls may wait indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "https://api.mainnet-beta.solana.com".to_string(),
            commitment: Commitment::Confirmed,
            connect_attempts: 3,
            connect_retry_delay_ms: 2000,
            signature_limit: 10,
            max_concurrent_resolutions: 10,
            max_supported_transaction_version: None,
            rate_limit_retries: 5,
            rate_limit_backoff_ms: 500,
            request_timeout_secs: None,
        }
    }
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable rate limiting.
    pub enabled: bool,

    /// Requests allowed per client within one window.
    pub max_requests: u32,

    /// Window length in seconds.
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: 100,
            window_secs: 15 * 60,
        }
    }
}

/// Result artifact storage.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory receiving `<address>_<millis>.json` files.
    pub output_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: "responses".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
