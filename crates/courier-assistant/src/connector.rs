//! Outbound HTTP connector for the remote assistant API

use async_trait::async_trait;
use courier_config::AssistantConfig;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::Result;
use crate::http_client::http_client;

/// Default remote API base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Opt-in header required by the assistants sub-API
pub static HEADER_OPENAI_BETA: HeaderName = HeaderName::from_static("openai-beta");
pub static ASSISTANTS_V1: HeaderValue = HeaderValue::from_static("assistants=v1");

/// Parameters for a single outbound request
///
/// Transient, constructed per call and consumed by [`Connector::send`].
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub headers: Vec<(HeaderName, HeaderValue)>,
}

impl RequestOptions {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.push((name, value));
        self
    }
}

/// The sole outbound-HTTP seam through which Courier talks to the remote
/// service
///
/// A trait so operations can be exercised against a scripted double
/// without a network.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Issue one request and return the decoded JSON body
    ///
    /// Transport failures surface unchanged; there is no retry or backoff.
    async fn send(&self, options: RequestOptions) -> Result<Value>;
}

/// Send a request and decode the response into the caller's target shape
pub async fn send_as<T: DeserializeOwned>(
    connector: &dyn Connector,
    options: RequestOptions,
) -> Result<T> {
    let body = connector.send(options).await?;
    Ok(serde_json::from_value(body)?)
}

/// Production connector backed by the shared reqwest client
pub struct HttpConnector {
    client: Client,
    base_url: Url,
    headers: HeaderMap,
}

impl HttpConnector {
    /// Create from assistant configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the API key cannot be carried in an
    /// `Authorization` header.
    pub fn new(config: &AssistantConfig) -> anyhow::Result<Self> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| Url::parse(DEFAULT_BASE_URL).expect("valid default URL"));

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key.expose_secret()))
            .map_err(|_| anyhow::anyhow!("assistant API key contains invalid header characters"))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(http::header::AUTHORIZATION, bearer);

        Ok(Self {
            client: http_client(),
            base_url,
            headers,
        })
    }

    fn request_url(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}{path}")
    }

    /// Static headers first, per-call headers second, so a per-call header
    /// with the same name wins
    fn merged_headers(&self, extra: &[(HeaderName, HeaderValue)]) -> HeaderMap {
        let mut merged = self.headers.clone();
        for (name, value) in extra {
            merged.insert(name.clone(), value.clone());
        }
        merged
    }
}

#[async_trait]
impl Connector for HttpConnector {
    async fn send(&self, options: RequestOptions) -> Result<Value> {
        let url = self.request_url(&options.path);
        tracing::debug!(method = %options.method, %url, "outbound request");

        let mut builder = self
            .client
            .request(options.method, &url)
            .headers(self.merged_headers(&options.headers));

        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        // The remote encodes failures in the response body; each operation
        // detects a structurally absent response itself, so the status line
        // is not inspected here.
        let response = builder.send().await?;
        let body = response.bytes().await?;

        Ok(serde_json::from_slice(&body)?)
    }
}
