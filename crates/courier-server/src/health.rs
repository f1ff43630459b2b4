use axum::response::IntoResponse;
use http::StatusCode;

/// Liveness probe: the process is up and serving
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
