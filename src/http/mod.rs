//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID)
//!     → security::rate_limit (per-IP window)
//!     → handlers.rs (GET /transactions/{address})
//!     → response.rs (success body or generic 500)
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::{ErrorBody, TransactionsResponse, INTERNAL_ERROR_MESSAGE};
pub use server::{AppState, HttpServer};
