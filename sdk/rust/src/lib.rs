//! Typed client for the wallet transaction history service.

use reqwest::{Client, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsResponse {
    pub message: String,
    pub transactions: Vec<serde_json::Value>,
}

impl TransactionsResponse {
    /// File name reported in `message`.
    pub fn filename(&self) -> Option<&str> {
        self.message.strip_prefix("Transactions saved to file: ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub struct HistoryClient {
    client: Client,
    base_url: Url,
}

impl HistoryClient {
    /// Build a client for the service at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(format!("Not a base URL: {}", base_url).into());
        }
        Ok(Self {
            client: Client::builder().no_proxy().build()?,
            base_url,
        })
    }

    /// URL of the history endpoint for `address`, with the address
    /// percent-encoded as a single path segment.
    pub fn transactions_url(&self, address: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("transactions").push(address);
        }
        url
    }

    /// Fetch recent transactions for `address`.
    pub async fn transactions(&self, address: &str) -> Result<TransactionsResponse, Box<dyn std::error::Error>> {
        let resp = self.raw_transactions(address).await?;

        let status = resp.status();
        let text = resp.text().await?;

        if status != StatusCode::OK {
            return Err(format!("Service returned error status {}: {}", status, text).into());
        }

        Ok(serde_json::from_str::<TransactionsResponse>(&text)?)
    }

    /// Issue the request and return the raw response, whatever its status.
    pub async fn raw_transactions(&self, address: &str) -> Result<Response, reqwest::Error> {
        self.client
            .get(self.transactions_url(address))
            .send()
            .await
    }
}
