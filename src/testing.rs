//! In-process fake backend for gateway tests.
//!
//! An axum server bound to an ephemeral localhost port. Routes are matched
//! on `"<METHOD> <path>"` (query string ignored); every request is recorded
//! with its arrival time so tests can assert on headers, bodies and order.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::Response;
use axum::Router;
use serde_json::Value;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::store::CredentialStore;

#[derive(Debug, Clone)]
pub struct Reply {
    status: u16,
    body: String,
    delay: Duration,
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Self::raw(status, &body.to_string())
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Received {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
    pub at: Instant,
}

impl Received {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Default)]
struct MockState {
    routes: Mutex<HashMap<String, Reply>>,
    received: Mutex<Vec<Received>>,
}

pub struct MockServer {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockServer {
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn on(&self, method: &str, path: &str, reply: Reply) {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert(format!("{} {}", method, path), reply);
    }

    pub fn received(&self) -> Vec<Received> {
        self.state.received.lock().unwrap().clone()
    }

    pub fn received_paths(&self) -> Vec<String> {
        self.received()
            .into_iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    pub fn client(&self, store: Arc<CredentialStore>) -> ApiClient {
        ApiClient::new(&ClientConfig::new(&self.base_url), store)
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    state.received.lock().unwrap().push(Received {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        headers,
        body: body.to_vec(),
        at: Instant::now(),
    });

    let reply = state
        .routes
        .lock()
        .unwrap()
        .get(&format!("{} {}", method, path))
        .cloned()
        .unwrap_or_else(|| Reply::json(404, serde_json::json!({"message": "Not found"})));

    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }

    Response::builder()
        .status(StatusCode::from_u16(reply.status).unwrap())
        .header("content-type", "application/json")
        .body(Body::from(reply.body))
        .unwrap()
}
