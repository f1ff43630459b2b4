#![allow(clippy::must_use_candidate)]

pub mod assistant;
mod env;
pub mod health;
mod loader;
pub mod server;

use serde::Deserialize;

pub use assistant::AssistantConfig;
pub use health::HealthConfig;
pub use server::ServerConfig;

/// Top-level Courier configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream assistant API configuration
    pub assistant: AssistantConfig,
}
