//! Transaction history subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → fetcher.rs (validate, list, resolve, filter)
//!     → store.rs (write <address>_<millis>.json)
//!     → FetchOutcome back to the handler
//! ```
//!
//! # Design Decisions
//! - A failed or missing resolution is recorded as a tagged outcome and dropped
//!   from the output; it never aborts the request
//! - The records returned are the same vector that was written to disk

pub mod fetcher;
pub mod store;
pub mod types;

pub use fetcher::TransactionFetcher;
pub use store::{ResultStore, StoredArtifact};
pub use types::{FetchError, FetchOutcome, Resolution, ResolutionOutcome, StoreError};
