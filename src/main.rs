//! Wallet transaction history service.
//!
//! Serves `GET /transactions/{address}`: lists the account's most recent
//! signatures on the ledger, resolves each one to a full transaction record,
//! writes the surviving records to `<output_dir>/<address>_<millis>.json` and
//! returns them.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ http::server ──▶ security::rate_limit ──▶ http::handlers
//!                                                             │
//!                                                             ▼
//!                                                    history::fetcher
//!                                                     │            │
//!                                                     ▼            ▼
//!                                        blockchain::gateway   history::store
//!                                                     │            │
//!                                                     ▼            ▼
//!                                           ledger JSON-RPC    responses/*.json
//! ```

use clap::Parser;
use std::path::PathBuf;

use tx_history::config::{load_config, ServiceConfig};
use tx_history::lifecycle::{signals, startup, Shutdown};
use tx_history::observability::logging;

#[derive(Parser)]
#[command(name = "tx-history")]
#[command(about = "Serve recent wallet transaction history from a ledger RPC node", long_about = None)]
struct Args {
    /// Path to a TOML config file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability.log_level);

    tracing::info!("tx-history v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        rpc_url = %config.rpc.url,
        signature_limit = config.rpc.signature_limit,
        rate_limit_enabled = config.rate_limit.enabled,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    signals::spawn_ctrl_c_handler(shutdown.clone());

    startup::run(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
