use std::path::Path;

use secrecy::ExposeSecret;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded = crate::env::expand_env(&raw)
            .map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self =
            toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if required assistant settings are missing or the
    /// polling policy is degenerate
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.assistant.api_key.expose_secret().is_empty() {
            anyhow::bail!("assistant.api_key must not be empty");
        }

        if self.assistant.assistant_id.is_empty() {
            anyhow::bail!("assistant.assistant_id must not be empty");
        }

        if self.assistant.poll_interval_ms == 0 {
            anyhow::bail!("assistant.poll_interval_ms must be greater than 0");
        }

        if self.assistant.poll_max_attempts == 0 {
            anyhow::bail!("assistant.poll_max_attempts must be greater than 0");
        }

        Ok(())
    }
}
