use serde::Deserialize;

/// Health check endpoint configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_path")]
    pub path: String,
    /// Reported in the `service` field
    #[serde(default = "default_service")]
    pub service: String,
    /// Reported in the `message` field
    #[serde(default = "default_message")]
    pub message: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_path(),
            service: default_service(),
            message: default_message(),
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_enabled() -> bool {
    true
}

fn default_path() -> String {
    "/api/health".to_string()
}

fn default_service() -> String {
    "doodle-api".to_string()
}

fn default_message() -> String {
    "Doodle API is running".to_string()
}
