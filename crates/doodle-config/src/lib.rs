#![allow(clippy::must_use_candidate)]

pub mod cors;
mod env;
pub mod health;
pub mod imagegen;
pub mod imaging;
mod loader;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use cors::*;
pub use health::*;
pub use imagegen::*;
pub use imaging::*;
pub use loader::API_KEY_ENV;
pub use server::*;
pub use telemetry::{LogFormat, TelemetryConfig};

/// Top-level Doodle configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upload normalization limits
    #[serde(default)]
    pub imaging: ImagingConfig,
    /// Image generation provider
    #[serde(default)]
    pub imagegen: ImageGenConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
