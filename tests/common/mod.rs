//! In-process backend double for integration tests.
//!
//! Starts a real axum server on a random port, records every request the
//! SDK sends, and answers from a queue of canned responses keyed by
//! `(method, path)`. Queued responses play in order; the last one repeats,
//! which is what reload-after-action tests want.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::{Json, Router};
use serde_json::{json, Value};

use gescom_sdk::HttpTransport;

#[derive(Clone, Debug)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone)]
struct CannedResponse {
    status: u16,
    body: Value,
}

#[derive(Default)]
struct MockState {
    calls: Vec<RecordedCall>,
    responses: HashMap<(String, String), VecDeque<CannedResponse>>,
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockBackend {
    base_url: String,
    state: Shared,
}

impl MockBackend {
    pub async fn start() -> Self {
        init_tracing();
        let state: Shared = Arc::default();
        let app = Router::new()
            .fallback(answer)
            .with_state(Arc::clone(&state));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock backend");
        });
        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn transport(&self) -> HttpTransport {
        HttpTransport::from_base_url(&self.base_url).expect("transport for mock backend")
    }

    /// Queue a response for `(method, path)`. Call again to extend the sequence.
    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        let mut state = self.state.lock().expect("mock state");
        state
            .responses
            .entry((method.to_uppercase(), path.to_string()))
            .or_default()
            .push_back(CannedResponse { status, body });
    }

    pub fn respond_ok(&self, method: &str, path: &str, body: Value) {
        self.respond(method, path, 200, body);
    }

    pub fn respond_error(&self, method: &str, path: &str, status: u16, message: &str) {
        self.respond(method, path, status, json!({ "message": message }));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().expect("mock state").calls.clone()
    }

    pub fn calls_to(&self, method: &str, path: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == method && call.path == path)
            .collect()
    }

    pub fn call_count(&self, method: &str, path: &str) -> usize {
        self.calls_to(method, path).len()
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gescom_sdk=debug")),
        )
        .with_test_writer()
        .try_init()
        .ok();
}

async fn answer(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let path = uri.path().to_string();
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let parsed_body = if body.is_empty() {
        None
    } else {
        serde_json::from_slice(&body).ok()
    };

    let mut state = state.lock().expect("mock state");
    state.calls.push(RecordedCall {
        method: method.to_string(),
        path: path.clone(),
        content_type,
        body: parsed_body,
    });

    let canned = state
        .responses
        .get_mut(&(method.to_string(), path))
        .and_then(|queue| {
            if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            }
        });

    match canned {
        Some(response) => {
            let status =
                StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(response.body))
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("no canned response for {method} {uri}") })),
        ),
    }
}
