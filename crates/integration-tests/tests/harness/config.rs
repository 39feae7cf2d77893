//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use doodle_config::{Config, CorsConfig, HealthConfig, ServerConfig};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                ..Config::default()
            },
        }
    }

    /// Point the provider at a mock backend with a test key
    pub fn with_openai_provider(mut self, base_url: &str) -> Self {
        self.config.imagegen.api_key = Some(SecretString::from("test-key"));
        self.config.imagegen.base_url = Some(base_url.parse().expect("valid URL"));
        self
    }

    /// Point the provider at a mock backend without any key
    pub fn without_api_key(mut self, base_url: &str) -> Self {
        self.config.imagegen.api_key = None;
        self.config.imagegen.base_url = Some(base_url.parse().expect("valid URL"));
        self
    }

    /// Set the provider request timeout (e.g. "1s")
    pub fn with_timeout(mut self, timeout: &str) -> Self {
        self.config.imagegen.timeout = timeout.to_owned();
        self
    }

    /// Set the request body limit in bytes
    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.config.server.body_limit = limit;
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = config;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
