//! Wallet transaction history service library.

pub mod blockchain;
pub mod config;
pub mod history;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod security;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
