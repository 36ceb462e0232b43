//! Shared utilities for integration testing.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use tx_history::config::ServiceConfig;
use tx_history::{HttpServer, Shutdown};

/// A well-formed account address.
#[allow(dead_code)]
pub const WALLET: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// What the mock node answers for one call.
#[allow(dead_code)]
pub enum RpcReply {
    Result(Value),
    Error(i64, String),
    Status(u16),
    Delayed(Duration, Box<RpcReply>),
}

type Handler = dyn Fn(&str, &Value) -> RpcReply + Send + Sync;

#[derive(Clone)]
struct MockState {
    handler: Arc<Handler>,
    calls: Arc<Mutex<Vec<(String, Value)>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

/// A running mock JSON-RPC node.
pub struct MockRpc {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<(String, Value)>>>,
    max_in_flight: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockRpc {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of calls received for `method`.
    pub fn calls(&self, method: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|(m, _)| m == method).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Params of every call received for `method`, in arrival order.
    pub fn params(&self, method: &str) -> Vec<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, p)| p.clone())
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

fn render(id: Value, reply: RpcReply) -> Response {
    match reply {
        RpcReply::Result(result) => {
            Json(json!({ "jsonrpc": "2.0", "id": id, "result": result })).into_response()
        }
        RpcReply::Error(code, message) => Json(json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": code, "message": message }
        }))
        .into_response(),
        RpcReply::Status(code) => StatusCode::from_u16(code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
        // Delays are unwrapped before rendering.
        RpcReply::Delayed(_, inner) => render(id, *inner),
    }
}

async fn rpc(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    let method = body["method"].as_str().unwrap_or_default().to_string();
    let params = body["params"].clone();
    state.calls.lock().unwrap().push((method.clone(), params.clone()));

    let current = state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    state.max_in_flight.fetch_max(current, Ordering::SeqCst);

    let mut reply = (state.handler)(&method, &params);
    while let RpcReply::Delayed(delay, inner) = reply {
        tokio::time::sleep(delay).await;
        reply = *inner;
    }

    state.in_flight.fetch_sub(1, Ordering::SeqCst);
    render(body["id"].clone(), reply)
}

/// Start a mock node whose answers come from `handler`.
pub async fn start_mock_rpc<F>(handler: F) -> MockRpc
where
    F: Fn(&str, &Value) -> RpcReply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let state = MockState {
        handler: Arc::new(handler),
        calls: Arc::new(Mutex::new(Vec::new())),
        in_flight: Arc::new(AtomicUsize::new(0)),
        max_in_flight: Arc::new(AtomicUsize::new(0)),
    };
    let mock = MockRpc {
        addr,
        calls: state.calls.clone(),
        max_in_flight: state.max_in_flight.clone(),
    };

    let app = Router::new().route("/", post(rpc)).with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    mock
}

/// Standard probe answer.
#[allow(dead_code)]
pub fn blockhash() -> Value {
    json!({
        "context": { "slot": 1 },
        "value": { "blockhash": "EkSnNWid2cvwEVnVx9aBqawnmiCNiDgp3gUdkDPTKN1N", "lastValidBlockHeight": 100 }
    })
}

/// Listing entry for `signature`.
#[allow(dead_code)]
pub fn signature_entry(signature: &str, slot: u64) -> Value {
    json!({
        "signature": signature,
        "slot": slot,
        "err": null,
        "memo": null,
        "blockTime": 1_700_000_000 + slot,
        "confirmationStatus": "finalized"
    })
}

/// A transaction record for `signature`.
#[allow(dead_code)]
pub fn transaction_record(signature: &str, slot: u64) -> Value {
    json!({
        "slot": slot,
        "blockTime": 1_700_000_000 + slot,
        "meta": { "err": null, "fee": 5000 },
        "transaction": { "signatures": [signature] }
    })
}

/// Config pointing at `rpc_url` and writing into `output_dir`, with short delays.
#[allow(dead_code)]
pub fn test_config(rpc_url: &str, output_dir: &Path) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.rpc.url = rpc_url.to_string();
    config.rpc.connect_retry_delay_ms = 50;
    config.rpc.rate_limit_backoff_ms = 10;
    config.storage.output_dir = output_dir.to_string_lossy().into_owned();
    config
}

/// Start the service on an ephemeral port.
pub async fn spawn_service(config: ServiceConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// JSON files currently in `dir` (empty when the directory does not exist).
#[allow(dead_code)]
pub fn written_files(dir: &Path) -> Vec<std::path::PathBuf> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().map(|x| x == "json").unwrap_or(false))
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// HTTP client that never goes through a proxy.
#[allow(dead_code)]
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
