#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod prompt;
mod provider;
mod request;
mod server;
mod types;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};
use doodle_imaging::PipelineError;

pub use error::{ApiError, ImageGenError, Result};
pub use prompt::build_prompt;
pub use provider::ImageGenProvider;
pub use request::{ExtractGenerate, GeneratePayload};
pub use server::{ImageGenServerBuilder, Server};
pub use types::{GenerateRequest, GenerateResponse, GenerationRequest, GenerationResult};

/// Build the image generation server from configuration
///
/// # Errors
///
/// Returns an error if the server fails to initialize
pub fn build_server(config: &doodle_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        ImageGenServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize image generation server: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for image generation
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/api/generate", post(generate))
}

/// Decode, normalize, and forward one doodle
async fn generate(
    State(server): State<Arc<Server>>,
    ExtractGenerate(payload): ExtractGenerate,
) -> std::result::Result<Json<GenerateResponse>, ApiError> {
    let GeneratePayload {
        image_data,
        prompt_hint,
    } = payload;
    let options = server.normalize_options();

    tracing::debug!(input_len = image_data.len(), "decoding and normalizing image");

    let image = tokio::task::spawn_blocking(move || doodle_imaging::process(&image_data, &options))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "image processing task failed");
            ApiError::Internal
        })?
        .map_err(|e| {
            if matches!(&e, PipelineError::Validation(v) if v.is_too_large()) {
                tracing::warn!(error = %e, "rejecting oversized image");
            } else {
                tracing::warn!(error = %e, "rejecting image");
            }
            ApiError::from(e)
        })?;

    tracing::debug!(prompt_hint = ?prompt_hint, "calling generation provider");

    let result = server
        .generate(&GenerationRequest { image, prompt_hint })
        .await
        .map_err(|e| {
            if e.is_config() {
                tracing::error!(error = %e, "image generation is not configured");
            } else if e.is_timeout() {
                tracing::warn!(error = %e, "image generation provider timed out");
            } else {
                tracing::error!(error = %e, "image generation failed");
            }
            ApiError::from(e)
        })?;

    tracing::info!("image generation complete");

    Ok(Json(GenerateResponse { image_url: result.url }))
}
