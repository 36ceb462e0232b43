//! Response bodies and error mapping.
//!
//! # Design Decisions
//! - Every fetch failure becomes the same 500 body; the kind is only logged
//! - The success body carries the records exactly as written to disk

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::history::FetchError;

/// Generic error message returned to clients.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Body of a successful `GET /transactions/{address}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsResponse {
    pub message: String,
    pub transactions: Vec<Value>,
}

impl TransactionsResponse {
    pub fn new(filename: &str, transactions: Vec<Value>) -> Self {
        Self {
            message: format!("Transactions saved to file: {}", filename),
            transactions,
        }
    }
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Handler error. Always rendered as a generic 500.
#[derive(Debug)]
pub struct ApiError(pub FetchError);

impl From<FetchError> for ApiError {
    fn from(e: FetchError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(kind = self.0.kind(), error = %self.0, "Error fetching transactions");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: INTERNAL_ERROR_MESSAGE.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::InvalidAddress;

    #[test]
    fn test_success_message() {
        let body = TransactionsResponse::new("abc_1.json", vec![]);
        assert_eq!(body.message, "Transactions saved to file: abc_1.json");
    }

    #[test]
    fn test_every_error_is_500() {
        let err = ApiError(FetchError::InvalidAddress(InvalidAddress {
            input: "x".into(),
            reason: "bad".into(),
        }));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
