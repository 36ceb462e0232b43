//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Gateway bootstrap:
//!     → retries.rs (fixed attempts, fixed delay)
//!
//! Individual RPC call answered with 429:
//!     → backoff.rs (exponential delay for throttled calls)
//! ```
//!
//! # Design Decisions
//! - Only the bootstrap is retried; per-signature failures are tolerated, not retried
//! - No circuit breaker: a handle that goes stale after bootstrap is reused as is

pub mod backoff;
pub mod retries;

pub use backoff::calculate_backoff;
pub use retries::{retry_with_fixed_delay, RetriesExhausted, RetryPolicy};
