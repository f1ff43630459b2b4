//! Mock upstream assistant API for integration tests
//!
//! Implements the endpoints the gateway calls, with canned responses,
//! scripted run-status sequences, and request capture for assertions.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// Behavior switches for failure-path tests
#[derive(Debug, Default, Clone)]
pub struct Behavior {
    /// Answer the file listing with a non-JSON 500
    pub fail_files: bool,
    /// Return a thread listing with no threads
    pub empty_thread_list: bool,
    /// Return an empty message collection on reply fetch
    pub empty_reply: bool,
    /// Never answer the file listing (for cancellation tests)
    pub hang_files: bool,
}

/// One request as seen by the mock
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub openai_beta: Option<String>,
    pub body: Option<Value>,
}

struct MockState {
    behavior: Behavior,
    files_count: AtomicU32,
    run_status_count: AtomicU32,
    /// Statuses returned by successive run-status polls; the last repeats
    statuses: Mutex<VecDeque<String>>,
    captured: Mutex<Vec<CapturedRequest>>,
}

/// Mock assistant backend that returns predictable responses
pub struct MockAssistant {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

impl MockAssistant {
    /// Start with defaults: one thread, a run that completes on the third
    /// poll, one assistant reply
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(Behavior::default(), &["queued", "in_progress", "completed"]).await
    }

    /// Start with explicit behavior and a scripted run-status sequence
    pub async fn start_with(behavior: Behavior, statuses: &[&str]) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            behavior,
            files_count: AtomicU32::new(0),
            run_status_count: AtomicU32::new(0),
            statuses: Mutex::new(statuses.iter().map(|s| (*s).to_owned()).collect()),
            captured: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/files", routing::get(handle_list_files))
            .route("/v1/threads", routing::get(handle_list_threads))
            .route(
                "/v1/threads/{thread_id}/messages",
                routing::get(handle_list_messages).post(handle_create_message),
            )
            .route("/v1/threads/{thread_id}/runs", routing::post(handle_create_run))
            .route(
                "/v1/threads/{thread_id}/runs/{run_id}",
                routing::get(handle_run_status),
            )
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the upstream
    ///
    /// Includes `/v1` since the connector appends paths like `/files`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of file listing requests received
    pub fn files_count(&self) -> u32 {
        self.state.files_count.load(Ordering::Relaxed)
    }

    /// Number of run-status polls received
    pub fn run_status_count(&self) -> u32 {
        self.state.run_status_count.load(Ordering::Relaxed)
    }

    /// Every request received so far, in order
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.state.captured.lock().unwrap().clone()
    }
}

impl Drop for MockAssistant {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn capture(state: &MockState, method: &str, path: String, headers: &HeaderMap, body: Option<Value>) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };

    state.captured.lock().unwrap().push(CapturedRequest {
        method: method.to_owned(),
        path,
        authorization: header("authorization"),
        openai_beta: header("openai-beta"),
        body,
    });
}

async fn handle_list_files(State(state): State<Arc<MockState>>, headers: HeaderMap) -> axum::response::Response {
    state.files_count.fetch_add(1, Ordering::Relaxed);
    capture(&state, "GET", "/v1/files".to_owned(), &headers, None);

    if state.behavior.hang_files {
        tokio::time::sleep(std::time::Duration::from_secs(60)).await;
    }

    if state.behavior.fail_files {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }

    Json(json!({
        "object": "list",
        "has_more": false,
        "data": [
            {"id": "file-1", "object": "file", "purpose": "assistants", "filename": "a", "bytes": 120, "created_at": 1, "status": "processed"},
            {"id": "file-2", "object": "file", "purpose": "assistants", "filename": "b", "bytes": 240, "created_at": 2, "status": "processed"},
        ],
    }))
    .into_response()
}

async fn handle_list_threads(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Json<Value> {
    capture(&state, "GET", "/v1/threads".to_owned(), &headers, None);

    if state.behavior.empty_thread_list {
        return Json(json!({"object": "list", "data": [], "first_id": "", "last_id": "", "has_more": false}));
    }

    Json(json!({
        "object": "list",
        "data": [{"id": "thread_abc", "object": "thread", "created_at": 1}],
        "first_id": "thread_abc",
        "last_id": "thread_abc",
        "has_more": false,
    }))
}

async fn handle_create_message(
    State(state): State<Arc<MockState>>,
    Path(thread_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    capture(
        &state,
        "POST",
        format!("/v1/threads/{thread_id}/messages"),
        &headers,
        Some(body),
    );

    Json(json!({
        "id": "msg_inbound",
        "object": "thread.message",
        "thread_id": thread_id,
        "role": "user",
    }))
}

async fn handle_create_run(
    State(state): State<Arc<MockState>>,
    Path(thread_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    capture(
        &state,
        "POST",
        format!("/v1/threads/{thread_id}/runs"),
        &headers,
        Some(body),
    );

    Json(json!({
        "id": "run_1",
        "object": "thread.run",
        "thread_id": thread_id,
        "status": "queued",
    }))
}

async fn handle_run_status(
    State(state): State<Arc<MockState>>,
    Path((thread_id, run_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Json<Value> {
    state.run_status_count.fetch_add(1, Ordering::Relaxed);
    capture(
        &state,
        "GET",
        format!("/v1/threads/{thread_id}/runs/{run_id}"),
        &headers,
        None,
    );

    let status = {
        let mut statuses = state.statuses.lock().unwrap();
        if statuses.len() > 1 {
            statuses.pop_front().unwrap()
        } else {
            statuses.front().cloned().unwrap_or_else(|| "completed".to_owned())
        }
    };

    Json(json!({
        "id": run_id,
        "object": "thread.run",
        "thread_id": thread_id,
        "status": status,
    }))
}

async fn handle_list_messages(
    State(state): State<Arc<MockState>>,
    Path(thread_id): Path<String>,
    headers: HeaderMap,
) -> Json<Value> {
    capture(
        &state,
        "GET",
        format!("/v1/threads/{thread_id}/messages"),
        &headers,
        None,
    );

    if state.behavior.empty_reply {
        return Json(json!({"object": "list", "data": [], "has_more": false}));
    }

    Json(json!({
        "object": "list",
        "data": [
            {
                "id": "msg_reply",
                "object": "thread.message",
                "thread_id": thread_id,
                "role": "assistant",
                "content": [{"type": "text", "text": {"value": "Hello from mock assistant", "annotations": []}}],
            },
            {
                "id": "msg_inbound",
                "object": "thread.message",
                "thread_id": thread_id,
                "role": "user",
            },
        ],
        "first_id": "msg_reply",
        "last_id": "msg_inbound",
        "has_more": false,
    }))
}
