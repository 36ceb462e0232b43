//! Transaction history fetcher.
//!
//! # Flow
//! ```text
//! raw address
//!     → parse_address (no network before this succeeds)
//!     → Gateway::client (bootstrap on first use only)
//!     → getSignaturesForAddress (limit)
//!     → getTransaction per signature, bounded concurrency, order kept
//!     → drop Missing / Failed
//!     → ResultStore::persist
//! ```

use futures_util::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;

use crate::blockchain::{parse_address, Gateway, RpcClient, SignatureInfo};
use crate::history::store::ResultStore;
use crate::history::types::{
    surviving_records, FetchError, FetchOutcome, Resolution, ResolutionOutcome,
};
use crate::observability::metrics;

/// Fetches, filters and persists recent transactions for an account.
#[derive(Debug)]
pub struct TransactionFetcher {
    gateway: Arc<Gateway>,
    store: ResultStore,
    signature_limit: usize,
    max_concurrency: usize,
}

impl TransactionFetcher {
    pub fn new(gateway: Arc<Gateway>, store: ResultStore, signature_limit: usize, max_concurrency: usize) -> Self {
        Self {
            gateway,
            store,
            signature_limit,
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn gateway(&self) -> &Arc<Gateway> {
        &self.gateway
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Run the full fetch for `raw_address`.
    pub async fn fetch(&self, raw_address: &str) -> Result<FetchOutcome, FetchError> {
        let start = Instant::now();
        let address = parse_address(raw_address)?;

        let client = self.gateway.client().await?;

        let signatures = client
            .get_signatures_for_address(&address, self.signature_limit)
            .await
            .map_err(FetchError::Listing)?;

        tracing::debug!(address = %address, signatures = signatures.len(), "Signatures listed");

        let resolutions = self.resolve_all(&client, signatures).await;
        let transactions = surviving_records(&resolutions);

        let artifact = self.store.persist(&address, &transactions).await?;

        tracing::info!(
            address = %address,
            listed = resolutions.len(),
            kept = transactions.len(),
            file = %artifact.filename,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Transactions fetched"
        );

        Ok(FetchOutcome {
            filename: artifact.filename,
            path: artifact.path,
            transactions,
            resolutions,
        })
    }

    /// Resolve every signature, at most `max_concurrency` at a time.
    /// The output order matches the input order.
    async fn resolve_all(&self, client: &RpcClient, signatures: Vec<SignatureInfo>) -> Vec<Resolution> {
        stream::iter(signatures)
            .map(|info| resolve_one(client, info.signature))
            .buffered(self.max_concurrency)
            .collect()
            .await
    }
}

async fn resolve_one(client: &RpcClient, signature: String) -> Resolution {
    let outcome = match client.get_transaction(&signature).await {
        Ok(Some(record)) => ResolutionOutcome::Found(record),
        Ok(None) => {
            tracing::warn!(signature = %signature, "Transaction not found");
            ResolutionOutcome::Missing
        }
        Err(e) => {
            tracing::error!(signature = %signature, error = %e, "Error fetching transaction");
            ResolutionOutcome::Failed(e.to_string())
        }
    };
    metrics::record_resolution(outcome.label());
    Resolution { signature, outcome }
}
