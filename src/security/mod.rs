//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → rate_limit.rs (per-IP fixed window)
//!     → Pass to handler
//! ```
//!
//! # Design Decisions
//! - Limiter state is in-memory only and starts empty on every restart
//! - Rejected requests are answered before any handler logic runs

pub mod rate_limit;

pub use rate_limit::{rate_limit_middleware, RateLimiterState, RATE_LIMIT_MESSAGE};
