//! Ledger integration subsystem.
//!
//! # Data Flow
//! ```text
//! RpcConfig (URL, commitment, attempts)
//!     → gateway.rs (lazy bootstrap, retry, shared handle)
//!     → client.rs (JSON-RPC calls: probe, list signatures, resolve transaction)
//!     → types.rs (address parsing, SignatureInfo, error types)
//! ```
//!
//! # Constraints
//! - Account identifiers are validated before any RPC call is made
//! - Transaction records are kept as raw JSON, exactly as the node returned them

pub mod client;
pub mod gateway;
pub mod types;

pub use client::RpcClient;
pub use gateway::{connect, Gateway};
pub use types::{parse_address, GatewayError, InvalidAddress, RpcError, SignatureInfo};
