//! In-process mock of the admin backend
//!
//! Routes are registered as `"METHOD path"` (path relative to `/api`) with a
//! canned status and JSON body. Every request is recorded so tests can
//! assert on headers, query strings and bodies.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub cache_control: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct MockState {
    routes: Mutex<HashMap<String, (StatusCode, Value)>>,
    requests: Mutex<Vec<Recorded>>,
}

pub struct MockBackend {
    state: Arc<MockState>,
    base_url: String,
}

impl MockBackend {
    /// Bind an ephemeral local port and serve until the runtime shuts down
    pub async fn start() -> std::io::Result<Self> {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Mock backend stopped");
            }
        });
        tracing::debug!(%addr, "Mock backend listening");
        Ok(Self {
            state,
            base_url: format!("http://{addr}/api"),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn route(&self, method: Method, path: &str, status: StatusCode, body: Value) {
        self.state
            .routes
            .lock()
            .insert(format!("{method} /api/{path}"), (status, body));
    }

    /// Register a `200 OK` route
    pub fn ok(&self, method: Method, path: &str, body: Value) {
        self.route(method, path, StatusCode::OK, body);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().clone()
    }

    pub fn hits(&self, method: Method, path: &str) -> usize {
        let full = format!("/api/{path}");
        self.state
            .requests
            .lock()
            .iter()
            .filter(|r| r.method == method && r.path == full)
            .count()
    }

    pub fn last(&self, method: Method, path: &str) -> Option<Recorded> {
        let full = format!("/api/{path}");
        self.state
            .requests
            .lock()
            .iter()
            .rev()
            .find(|r| r.method == method && r.path == full)
            .cloned()
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.requests.lock().push(Recorded {
        method: method.clone(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header("authorization"),
        cache_control: header("cache-control"),
        body: serde_json::from_slice(&body).ok(),
    });

    let key = format!("{method} {}", uri.path());
    match state.routes.lock().get(&key).cloned() {
        Some((status, value)) => (status, Json(value)).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "Route not found" }))).into_response(),
    }
}
