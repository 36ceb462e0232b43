//! Ledger-specific types and error definitions.

use serde::{Deserialize, Serialize};
use solana_pubkey::Pubkey;
use std::str::FromStr;
use thiserror::Error;

/// The input could not be parsed as an account identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid account address '{input}': {reason}")]
pub struct InvalidAddress {
    pub input: String,
    pub reason: String,
}

impl InvalidAddress {
    fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Parse a base58 account address into a `Pubkey`.
pub fn parse_address(input: &str) -> Result<Pubkey, InvalidAddress> {
    if input.is_empty() {
        return Err(InvalidAddress::new(input, "empty"));
    }
    Pubkey::from_str(input).map_err(|e| InvalidAddress::new(input, e.to_string()))
}

/// One entry of a `getSignaturesForAddress` listing.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureInfo {
    pub signature: String,
    pub slot: u64,
    #[serde(default)]
    pub err: Option<serde_json::Value>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub block_time: Option<i64>,
    #[serde(default)]
    pub confirmation_status: Option<String>,
}

/// Slot context wrapped around some RPC results.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcContext {
    pub slot: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WithContext<T> {
    pub context: RpcContext,
    pub value: T,
}

/// Result of the liveness probe.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestBlockhash {
    pub blockhash: String,
    pub last_valid_block_height: u64,
}

/// Errors that can occur during a single RPC call.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Connection-level failure (DNS, refused, reset, timeout).
    #[error("RPC transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success HTTP status.
    #[error("RPC HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// The node returned a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Server { code: i64, message: String },

    /// The response body was not the expected shape.
    #[error("RPC decode error: {0}")]
    Decode(String),

    /// Neither `result` nor `error` was present for a call that needs a result.
    #[error("RPC response for {0} carried no result")]
    MissingResult(&'static str),
}

/// Result type for RPC operations.
pub type RpcResult<T> = Result<T, RpcError>;

/// Errors from establishing the shared connection.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Invalid RPC URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Could not connect to {url} after {attempts} attempts: {source}")]
    Connectivity {
        url: String,
        attempts: u32,
        #[source]
        source: RpcError,
    },
}
