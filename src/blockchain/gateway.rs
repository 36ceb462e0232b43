//! Shared connection to the ledger node.
//!
//! # Responsibilities
//! - Bootstrap an `RpcClient` on first use and validate it with a liveness probe
//! - Retry the bootstrap a bounded number of times with a fixed delay
//! - Hand out the same client for the rest of the process lifetime
//!
//! # Design Decisions
//! - The handle lives in a `tokio::sync::OnceCell`; once set it is never
//!   probed or refreshed again
//! - An in-flight bootstrap is a `Shared` future, so concurrent first callers
//!   await the same attempt and all see its client or its error
//! - A finished bootstrap is cleared from the slot, so a failure leaves the
//!   gateway empty and the next caller starts over

use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OnceCell};

use crate::blockchain::client::RpcClient;
use crate::blockchain::types::{GatewayError, RpcResult};
use crate::config::RpcConfig;
use crate::observability::metrics;
use crate::resilience::{retry_with_fixed_delay, RetryPolicy};

/// Open a client and probe it, retrying with a fixed delay.
pub async fn connect(config: &RpcConfig) -> Result<RpcClient, GatewayError> {
    let url: url::Url = config.url.parse().map_err(|e: url::ParseError| GatewayError::InvalidUrl {
        url: config.url.clone(),
        reason: e.to_string(),
    })?;

    let policy = RetryPolicy::new(
        config.connect_attempts,
        Duration::from_millis(config.connect_retry_delay_ms),
    );

    let result = retry_with_fixed_delay(policy, "rpc_connect", |attempt| {
        let url = url.clone();
        async move {
            let outcome = open_and_probe(url, config).await;
            metrics::record_connect_attempt(outcome.is_ok());
            if outcome.is_ok() {
                tracing::info!(attempt = attempt, rpc_url = %config.url, "Connected to ledger network");
            }
            outcome
        }
    })
    .await;

    result.map_err(|exhausted| GatewayError::Connectivity {
        url: config.url.clone(),
        attempts: exhausted.attempts,
        source: exhausted.last_error,
    })
}

async fn open_and_probe(url: url::Url, config: &RpcConfig) -> RpcResult<RpcClient> {
    let client = RpcClient::new(url, config)?;
    let probe = client.get_latest_blockhash().await?;
    tracing::debug!(blockhash = %probe.blockhash, "Liveness probe succeeded");
    Ok(client)
}

type Bootstrap = Shared<BoxFuture<'static, Result<Arc<RpcClient>, Arc<GatewayError>>>>;

/// Process-wide, lazily initialised ledger connection.
pub struct Gateway {
    config: Arc<RpcConfig>,
    handle: OnceCell<Arc<RpcClient>>,
    in_flight: Mutex<Option<Bootstrap>>,
}

impl Gateway {
    /// Create an empty gateway. Nothing is contacted until `client()` is called.
    pub fn new(config: RpcConfig) -> Self {
        Self {
            config: Arc::new(config),
            handle: OnceCell::new(),
            in_flight: Mutex::new(None),
        }
    }

    /// Return the shared client, bootstrapping it if this is the first use.
    ///
    /// Callers arriving while a bootstrap runs join it instead of starting
    /// their own.
    pub async fn client(&self) -> Result<Arc<RpcClient>, Arc<GatewayError>> {
        if let Some(client) = self.handle.get() {
            return Ok(client.clone());
        }

        let bootstrap = {
            let mut slot = self.in_flight.lock().await;
            if let Some(client) = self.handle.get() {
                return Ok(client.clone());
            }
            match slot.as_ref() {
                Some(running) => running.clone(),
                None => {
                    let config = self.config.clone();
                    let attempt = async move { connect(&config).await.map(Arc::new).map_err(Arc::new) }
                        .boxed()
                        .shared();
                    *slot = Some(attempt.clone());
                    attempt
                }
            }
        };

        let outcome = bootstrap.clone().await;

        if let Ok(client) = &outcome {
            // Another waiter of the same attempt may have set it first.
            let _ = self.handle.set(client.clone());
        }
        let mut slot = self.in_flight.lock().await;
        if slot.as_ref().is_some_and(|running| running.ptr_eq(&bootstrap)) {
            *slot = None;
        }

        outcome
    }

    /// Whether a bootstrap has already succeeded.
    pub fn is_connected(&self) -> bool {
        self.handle.initialized()
    }

    pub fn config(&self) -> &RpcConfig {
        &self.config
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("rpc_url", &self.config.url)
            .field("connected", &self.is_connected())
            .finish()
    }
}
