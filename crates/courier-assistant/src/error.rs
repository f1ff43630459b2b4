use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AssistantError>;

/// Errors from the outbound connector and the orchestration steps
///
/// Transport and decode failures are surfaced unchanged; the remaining
/// variants mark a step whose response was structurally absent even though
/// the call itself succeeded.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Network failure reaching the remote service
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body could not be parsed into the expected shape
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Thread listing returned no usable thread id
    #[error("failed to create new thread")]
    CreateThread,

    /// Message creation returned no message
    #[error("failed to create new message")]
    CreateMessage,

    /// Run creation returned no run
    #[error("failed to run thread")]
    RunThread,

    /// A status poll returned no run
    #[error("failed to run status thread")]
    RunStatus,

    /// Reply fetch returned no message collection
    #[error("failed to get prompt response")]
    GetReply,

    /// Reply fetch succeeded but the message collection was empty
    #[error("prompt response contained no messages")]
    EmptyReply,

    /// The run never reached a terminal status within the polling bound
    #[error("run did not complete within {attempts} status polls")]
    RunTimeout { attempts: u32 },
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorDetails,
}

#[derive(Debug, Serialize)]
struct ErrorDetails {
    message: String,
    r#type: String,
}

impl IntoResponse for AssistantError {
    /// Every downstream failure maps to a generic internal error
    ///
    /// The full error is logged server-side; nothing about the failed step
    /// or the upstream response leaks to the caller.
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "assistant operation failed");

        let body = ErrorResponse {
            error: ErrorDetails {
                message: "internal server error".to_string(),
                r#type: "internal_error".to_string(),
            },
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
