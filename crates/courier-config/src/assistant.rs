use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Configuration for the upstream assistant API
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssistantConfig {
    /// Base URL override (defaults to the public OpenAI v1 endpoint)
    #[serde(default)]
    pub base_url: Option<Url>,
    /// API key sent as a bearer token on every outbound call
    pub api_key: SecretString,
    /// Identifier of the remote assistant that processes runs
    pub assistant_id: String,
    /// Delay between run-status polls
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Maximum number of run-status polls before giving up
    #[serde(default = "default_poll_max_attempts")]
    pub poll_max_attempts: u32,
}

#[allow(clippy::missing_const_for_fn)]
fn default_poll_interval_ms() -> u64 {
    500
}

// 120 polls at the default interval bounds a run at one minute
#[allow(clippy::missing_const_for_fn)]
fn default_poll_max_attempts() -> u32 {
    120
}
