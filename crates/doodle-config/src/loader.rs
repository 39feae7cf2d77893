use std::path::Path;

use secrecy::SecretString;

use crate::Config;

/// Environment variable holding the provider key when no config file is used
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

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

        Self::parse(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Default configuration with the provider key taken from `OPENAI_API_KEY`
    ///
    /// The variable is read once here. A missing key is not an error yet:
    /// it surfaces when the first image is generated.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.imagegen.api_key = std::env::var(API_KEY_ENV).ok().map(SecretString::from);
        config
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if limits are zero or the timeout cannot be parsed
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_server()?;
        self.validate_imaging()?;
        self.imagegen.timeout_duration()?;
        Ok(())
    }

    fn validate_server(&self) -> anyhow::Result<()> {
        if self.server.body_limit == 0 {
            anyhow::bail!("server.body_limit must be greater than 0");
        }

        if self.server.health.enabled && !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        Ok(())
    }

    fn validate_imaging(&self) -> anyhow::Result<()> {
        if self.imaging.target_size == 0 {
            anyhow::bail!("imaging.target_size must be greater than 0");
        }

        if self.imaging.max_encoded_bytes == 0 {
            anyhow::bail!("imaging.max_encoded_bytes must be greater than 0");
        }

        Ok(())
    }
}
