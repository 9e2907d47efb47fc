//! Fake static-file host for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Every path answers with whatever was registered for it via
//! [`FakeDatasetServer::serve`] or [`FakeDatasetServer::fail`]; unknown paths
//! answer 404. Requests are counted per path so tests can assert that a
//! dataset is fetched exactly once.
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn demo() {
//! use common::fake_dataset_server::FakeDatasetServer;
//!
//! let server = FakeDatasetServer::start().await.unwrap();
//! server.serve("/duty/students.json", "[]").await;
//! let url = server.url("/duty/students.json");
//! # }
//! ```

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[derive(Default)]
struct HostState {
    routes: HashMap<String, (StatusCode, String)>,
    hits: HashMap<String, usize>,
}

/// Handle to the running fake host.
pub struct FakeDatasetServer {
    addr: SocketAddr,
    state: Arc<Mutex<HostState>>,
}

impl FakeDatasetServer {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(HostState::default()));

        let app = Router::new().fallback(serve_path).with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Base URL with a trailing slash, e.g. `http://127.0.0.1:PORT/`.
    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Absolute URL of `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Answer `path` with 200 and `body`.
    pub async fn serve(&self, path: &str, body: &str) {
        self.respond(path, StatusCode::OK, body).await;
    }

    /// Answer `path` with `status` and an empty body.
    pub async fn fail(&self, path: &str, status: u16) {
        let status = StatusCode::from_u16(status).expect("valid status code");
        self.respond(path, status, "").await;
    }

    /// Number of requests received for `path`.
    pub async fn hits(&self, path: &str) -> usize {
        self.state.lock().await.hits.get(path).copied().unwrap_or(0)
    }

    async fn respond(&self, path: &str, status: StatusCode, body: &str) {
        self.state
            .lock()
            .await
            .routes
            .insert(path.to_string(), (status, body.to_string()));
    }
}

async fn serve_path(State(state): State<Arc<Mutex<HostState>>>, uri: Uri) -> impl IntoResponse {
    let mut state = state.lock().await;
    let path = uri.path().to_string();
    *state.hits.entry(path.clone()).or_default() += 1;
    match state.routes.get(&path) {
        Some((status, body)) => (*status, body.clone()),
        None => (StatusCode::NOT_FOUND, String::new()),
    }
}
