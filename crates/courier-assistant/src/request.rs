use axum::body::Body;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Inbound prompt request body
#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    pub message: String,
}

/// Extractor for JSON request bodies
///
/// Rejects non-JSON content types and oversized bodies before parsing;
/// a body that fails to parse is a client error, never an internal one.
pub struct ExtractJson<T>(pub T);

/// Body limit for inbound requests (64 KiB; prompt payloads are small)
const BODY_LIMIT_BYTES: usize = 64 * 1024;

static APPLICATION_JSON: http::HeaderValue = http::HeaderValue::from_static("application/json");

impl<S, T: DeserializeOwned> axum::extract::FromRequest<S> for ExtractJson<T>
where
    S: Send + Sync,
{
    type Rejection = axum::response::Response;

    async fn from_request(request: http::Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        use axum::response::IntoResponse;

        let (parts, body) = request.into_parts();

        if parts
            .headers
            .get(http::header::CONTENT_TYPE)
            .is_none_or(|value| value != APPLICATION_JSON)
        {
            return Err((
                axum::http::StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "unsupported Content-Type, expected: 'Content-Type: application/json'",
            )
                .into_response());
        }

        let bytes = axum::body::to_bytes(body, BODY_LIMIT_BYTES).await.map_err(|err| {
            if std::error::Error::source(&err)
                .is_some_and(|source| source.is::<http_body_util::LengthLimitError>())
            {
                (
                    axum::http::StatusCode::PAYLOAD_TOO_LARGE,
                    format!("request body is too large, limit is {BODY_LIMIT_BYTES} bytes"),
                )
            } else {
                (
                    axum::http::StatusCode::BAD_REQUEST,
                    format!("failed to read request body: {err}"),
                )
            }
            .into_response()
        })?;

        match serde_json::from_slice::<T>(&bytes) {
            Ok(payload) => Ok(Self(payload)),
            Err(e) => Err((
                axum::http::StatusCode::BAD_REQUEST,
                format!("failed to parse request body: {e}"),
            )
                .into_response()),
        }
    }
}
