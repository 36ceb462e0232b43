//! Ledger JSON-RPC client.
//!
//! # Responsibilities
//! - POST JSON-RPC 2.0 requests to the configured endpoint
//! - Query the probe, listing and resolution methods
//! - Back off and retry when the node answers 429
//! - Map transport, HTTP and JSON-RPC failures into `RpcError`

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use solana_pubkey::Pubkey;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::blockchain::types::{
    LatestBlockhash, RpcError, RpcResult, SignatureInfo, WithContext,
};
use crate::config::{Commitment, RpcConfig};
use crate::resilience::calculate_backoff;

/// Longest wait between two 429 retries.
const MAX_RATE_LIMIT_BACKOFF_MS: u64 = 30_000;

/// JSON-RPC error object.
#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// JSON-RPC response envelope.
#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

/// JSON-RPC client for a single ledger endpoint.
pub struct RpcClient {
    http: reqwest::Client,
    url: url::Url,
    commitment: Commitment,
    max_supported_transaction_version: Option<u8>,
    rate_limit_retries: u32,
    rate_limit_backoff_ms: u64,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Build a client from configuration. No network traffic happens here.
    pub fn new(url: url::Url, config: &RpcConfig) -> RpcResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            url,
            commitment: config.commitment,
            max_supported_transaction_version: config.max_supported_transaction_version,
            rate_limit_retries: config.rate_limit_retries.max(1),
            rate_limit_backoff_ms: config.rate_limit_backoff_ms,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Fetch the latest blockhash. Used as the liveness probe.
    pub async fn get_latest_blockhash(&self) -> RpcResult<LatestBlockhash> {
        let params = json!([{ "commitment": self.commitment.as_str() }]);
        let response: WithContext<LatestBlockhash> = self
            .call("getLatestBlockhash", params)
            .await?
            .ok_or(RpcError::MissingResult("getLatestBlockhash"))?;
        Ok(response.value)
    }

    /// List up to `limit` signatures for `address`, newest first.
    pub async fn get_signatures_for_address(
        &self,
        address: &Pubkey,
        limit: usize,
    ) -> RpcResult<Vec<SignatureInfo>> {
        let params = json!([
            address.to_string(),
            { "limit": limit, "commitment": self.commitment.as_str() }
        ]);
        self.call("getSignaturesForAddress", params)
            .await?
            .ok_or(RpcError::MissingResult("getSignaturesForAddress"))
    }

    /// Fetch a full transaction record. `None` means the node does not know it.
    pub async fn get_transaction(&self, signature: &str) -> RpcResult<Option<Value>> {
        let mut options = json!({
            "commitment": self.commitment.as_str(),
            "encoding": "json",
        });
        if let Some(version) = self.max_supported_transaction_version {
            options["maxSupportedTransactionVersion"] = json!(version);
        }
        self.call("getTransaction", json!([signature, options])).await
    }

    /// Issue one JSON-RPC call. A `null` or absent result is returned as `None`.
    async fn call<T: DeserializeOwned>(&self, method: &'static str, params: Value) -> RpcResult<Option<T>> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let mut attempt = 0;
        let response = loop {
            attempt += 1;
            let response = self.http.post(self.url.clone()).json(&body).send().await?;

            if response.status() != reqwest::StatusCode::TOO_MANY_REQUESTS
                || attempt >= self.rate_limit_retries
            {
                break response;
            }

            let delay = calculate_backoff(attempt, self.rate_limit_backoff_ms, MAX_RATE_LIMIT_BACKOFF_MS);
            tracing::warn!(
                method = method,
                attempt = attempt,
                delay_ms = delay.as_millis() as u64,
                "RPC node responded 429 Too Many Requests, retrying"
            );
            tokio::time::sleep(delay).await;
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RpcError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let envelope: RpcResponse<T> = serde_json::from_slice(&bytes)
            .map_err(|e| RpcError::Decode(format!("{}: {}", method, e)))?;

        if let Some(error) = envelope.error {
            return Err(RpcError::Server {
                code: error.code,
                message: error.message,
            });
        }

        Ok(envelope.result)
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("url", &self.url.as_str())
            .field("commitment", &self.commitment)
            .finish()
    }
}
