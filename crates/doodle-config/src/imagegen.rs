use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

/// Image generation provider configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageGenConfig {
    /// Provider type
    #[serde(default)]
    pub provider: ImageGenProviderType,
    /// API key; checked when the first image is generated
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Model identifier, provider default when unset
    #[serde(default)]
    pub model: Option<String>,
    /// Requested output size
    #[serde(default = "default_size")]
    pub size: String,
    /// Upper bound on a single provider call (e.g. "60s", "2m")
    #[serde(default = "default_timeout")]
    pub timeout: String,
}

impl Default for ImageGenConfig {
    fn default() -> Self {
        Self {
            provider: ImageGenProviderType::default(),
            api_key: None,
            base_url: None,
            model: None,
            size: default_size(),
            timeout: default_timeout(),
        }
    }
}

impl ImageGenConfig {
    /// Parse the configured timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the duration string is malformed or zero
    pub fn timeout_duration(&self) -> anyhow::Result<Duration> {
        let timeout = duration_str::parse(&self.timeout)
            .map_err(|e| anyhow::anyhow!("invalid imagegen timeout '{}': {e}", self.timeout))?;

        if timeout.is_zero() {
            anyhow::bail!("imagegen timeout must be greater than zero");
        }

        Ok(timeout)
    }

    /// The API key, if one is set and non-empty
    pub fn api_key(&self) -> Option<&SecretString> {
        self.api_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())
    }
}

/// Supported image generation providers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageGenProviderType {
    /// `OpenAI` image edits
    #[default]
    Openai,
}

fn default_size() -> String {
    "1024x1024".to_string()
}

fn default_timeout() -> String {
    "60s".to_string()
}
