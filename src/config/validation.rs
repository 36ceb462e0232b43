//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (attempts > 0, limits within node bounds)
//! - Check that addresses and URLs parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::{Commitment, ServiceConfig};

/// Largest `limit` the ledger node accepts for signature listing.
pub const MAX_SIGNATURE_LIMIT: usize = 1000;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("rpc.url '{url}' is invalid: {reason}")]
    RpcUrl { url: String, reason: String },

    #[error("rpc.commitment 'processed' is not accepted for signature listing")]
    Commitment,

    #[error("{field} must be at least 1")]
    Zero { field: &'static str },

    #[error("rpc.signature_limit {0} exceeds {max}", max = MAX_SIGNATURE_LIMIT)]
    SignatureLimit(usize),

    #[error("storage.output_dir must not be empty")]
    OutputDir,

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    match url::Url::parse(&config.rpc.url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::RpcUrl {
            url: config.rpc.url.clone(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::RpcUrl {
            url: config.rpc.url.clone(),
            reason: e.to_string(),
        }),
    }

    if config.rpc.commitment == Commitment::Processed {
        errors.push(ValidationError::Commitment);
    }

    if config.rpc.connect_attempts == 0 {
        errors.push(ValidationError::Zero { field: "rpc.connect_attempts" });
    }
    if config.rpc.signature_limit == 0 {
        errors.push(ValidationError::Zero { field: "rpc.signature_limit" });
    } else if config.rpc.signature_limit > MAX_SIGNATURE_LIMIT {
        errors.push(ValidationError::SignatureLimit(config.rpc.signature_limit));
    }
    if config.rpc.max_concurrent_resolutions == 0 {
        errors.push(ValidationError::Zero { field: "rpc.max_concurrent_resolutions" });
    }
    if config.rpc.rate_limit_retries == 0 {
        errors.push(ValidationError::Zero { field: "rpc.rate_limit_retries" });
    }

    if config.rate_limit.enabled {
        if config.rate_limit.max_requests == 0 {
            errors.push(ValidationError::Zero { field: "rate_limit.max_requests" });
        }
        if config.rate_limit.window_secs == 0 {
            errors.push(ValidationError::Zero { field: "rate_limit.window_secs" });
        }
    }

    if config.storage.output_dir.trim().is_empty() {
        errors.push(ValidationError::OutputDir);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
