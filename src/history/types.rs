//! Fetch results and error definitions.

use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::blockchain::types::{GatewayError, InvalidAddress, RpcError};

/// What happened when one signature was resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionOutcome {
    /// The node returned the full record.
    Found(Value),
    /// The node answered but has no record for this signature.
    Missing,
    /// The call failed; the reason is kept for logs and callers.
    Failed(String),
}

impl ResolutionOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            ResolutionOutcome::Found(_) => "found",
            ResolutionOutcome::Missing => "missing",
            ResolutionOutcome::Failed(_) => "failed",
        }
    }
}

/// A signature paired with its resolution outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub signature: String,
    pub outcome: ResolutionOutcome,
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self.outcome, ResolutionOutcome::Found(_))
    }

    /// The record, if one was resolved.
    pub fn record(&self) -> Option<&Value> {
        match &self.outcome {
            ResolutionOutcome::Found(record) => Some(record),
            _ => None,
        }
    }
}

/// Keep only resolved records, in the order of `resolutions`.
pub fn surviving_records(resolutions: &[Resolution]) -> Vec<Value> {
    resolutions.iter().filter_map(|r| r.record().cloned()).collect()
}

/// Result of one successful fetch.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// Artifact file name (no directory).
    pub filename: String,
    /// Full path of the written artifact.
    pub path: PathBuf,
    /// Surviving records; identical to the artifact content.
    pub transactions: Vec<Value>,
    /// Every signature that was listed, with its outcome.
    pub resolutions: Vec<Resolution>,
}

/// Errors that abort a fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    InvalidAddress(#[from] InvalidAddress),

    /// Shared by every request that waited on the same bootstrap.
    #[error(transparent)]
    Connectivity(#[from] Arc<GatewayError>),

    #[error("Signature listing failed: {0}")]
    Listing(#[source] RpcError),

    #[error(transparent)]
    Persistence(#[from] StoreError),
}

impl FetchError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::InvalidAddress(_) => "invalid_address",
            FetchError::Connectivity(_) => "connectivity",
            FetchError::Listing(_) => "listing",
            FetchError::Persistence(_) => "persistence",
        }
    }
}

/// Errors writing a result artifact.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
}
