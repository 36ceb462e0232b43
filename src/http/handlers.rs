//! Request handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use std::time::Instant;

use crate::http::response::{ApiError, TransactionsResponse};
use crate::http::server::AppState;
use crate::observability::metrics;

/// `GET /transactions/{address}`
pub async fn get_transactions(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<TransactionsResponse>, ApiError> {
    let start = Instant::now();
    tracing::debug!(address = %address, "Fetching transactions");

    match state.fetcher.fetch(&address).await {
        Ok(outcome) => {
            metrics::record_request(200, start);
            Ok(Json(TransactionsResponse::new(&outcome.filename, outcome.transactions)))
        }
        Err(e) => {
            metrics::record_request(500, start);
            Err(ApiError(e))
        }
    }
}
