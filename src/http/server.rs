//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID, rate limit)
//! - Build the shared gateway, store and fetcher
//! - Serve on a listener until the shutdown signal fires

use axum::{middleware, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::blockchain::Gateway;
use crate::config::ServiceConfig;
use crate::history::{ResultStore, TransactionFetcher};
use crate::http::handlers;
use crate::http::request::{MakeRequestUuidV4, X_REQUEST_ID};
use crate::security::rate_limit::{self, RateLimiterState};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<TransactionFetcher>,
}

/// HTTP server for the transaction history service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    rate_limiter: Option<Arc<RateLimiterState>>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// No network traffic happens here; the ledger connection is opened by
    /// the first request.
    pub fn new(config: ServiceConfig) -> Self {
        let gateway = Arc::new(Gateway::new(config.rpc.clone()));
        let store = ResultStore::new(&config.storage.output_dir);
        let fetcher = Arc::new(TransactionFetcher::new(
            gateway,
            store,
            config.rpc.signature_limit,
            config.rpc.max_concurrent_resolutions,
        ));

        let rate_limiter = config
            .rate_limit
            .enabled
            .then(|| Arc::new(RateLimiterState::from_config(&config.rate_limit)));

        let state = AppState { fetcher };
        let router = Self::build_router(state, rate_limiter.clone());

        Self {
            router,
            config,
            rate_limiter,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState, rate_limiter: Option<Arc<RateLimiterState>>) -> Router {
        let mut router = Router::new()
            .route("/transactions/{address}", get(handlers::get_transactions))
            .with_state(state);

        if let Some(limiter) = rate_limiter {
            router = router.layer(middleware::from_fn_with_state(
                limiter,
                rate_limit::rate_limit_middleware,
            ));
        }

        router.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
        )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            rpc_url = %self.config.rpc.url,
            output_dir = %self.config.storage.output_dir,
            "HTTP server starting"
        );

        if let Some(limiter) = self.rate_limiter.clone() {
            tokio::spawn(rate_limit::run_pruner(limiter, shutdown.resubscribe()));
        }

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        let mut shutdown = shutdown;
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
