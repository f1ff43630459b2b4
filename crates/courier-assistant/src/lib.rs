//! Assistant relay crate for Courier
//!
//! Provides the outbound connector to the remote assistant API, the file
//! listing and prompt orchestration operations, and the axum endpoints
//! that expose them to inbound clients.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod connector;
pub mod error;
pub mod files;
mod http_client;
pub mod prompt;
mod request;
pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Json, Response};
use axum::{Router, routing};
use courier_config::AssistantConfig;

pub use connector::{Connector, HttpConnector, RequestOptions};
pub use error::{AssistantError, Result};
pub use files::{FileLister, FileService};
pub use prompt::{PollPolicy, PromptOrchestrator, PromptService};
pub use types::{File, Message, Run, Thread};

use request::{ExtractJson, PromptRequest};

/// Shared handler state holding the assistant operations
#[derive(Clone)]
pub struct AssistantState {
    files: Arc<dyn FileLister>,
    prompts: Arc<dyn PromptOrchestrator>,
}

impl AssistantState {
    pub fn new(files: Arc<dyn FileLister>, prompts: Arc<dyn PromptOrchestrator>) -> Self {
        Self { files, prompts }
    }
}

/// Build the assistant operations from configuration
pub fn build_state(config: &AssistantConfig) -> anyhow::Result<AssistantState> {
    let connector: Arc<dyn Connector> = Arc::new(HttpConnector::new(config)?);

    let files = Arc::new(FileService::new(Arc::clone(&connector)));
    let prompts = Arc::new(PromptService::new(
        connector,
        config.assistant_id.clone(),
        PollPolicy::from_config(config),
    ));

    Ok(AssistantState::new(files, prompts))
}

/// Create the endpoint router for the assistant API
pub fn endpoint_router() -> Router<AssistantState> {
    Router::new()
        .route("/api/v1/files", routing::get(list_files))
        .route("/api/v1/prompt", routing::post(send_prompt))
}

/// Handle `GET /api/v1/files`
async fn list_files(State(state): State<AssistantState>) -> Response {
    match state.files.list_files().await {
        Ok(files) => Json(files).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Handle `POST /api/v1/prompt`
async fn send_prompt(
    State(state): State<AssistantState>,
    ExtractJson(request): ExtractJson<PromptRequest>,
) -> Response {
    match state.prompts.send_prompt(&request.message).await {
        Ok(message) => Json(message).into_response(),
        Err(e) => e.into_response(),
    }
}
