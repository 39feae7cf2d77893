use std::time::Duration;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use doodle_imaging::PipelineError;
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImageGenError>;

/// Failures while asking the provider for an image
#[derive(Debug, Error)]
pub enum ImageGenError {
    /// Provider is not usable as configured (e.g. no API key)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Provider did not answer within the configured timeout
    #[error("Request to image generation provider timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// Provider rejected the credential
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Provider API returned an error
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Response was not in the expected shape, or held no image
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

impl ImageGenError {
    /// Whether this is an operator misconfiguration rather than a provider failure
    pub fn is_config(&self) -> bool {
        matches!(self, Self::ConfigError(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// Errors returned by `/api/generate`, one per failure stage
#[derive(Debug, Error)]
pub enum ApiError {
    /// `imageData` absent, null, or the body is not a JSON object
    #[error("Image data is missing")]
    MissingImageData,

    /// `imageData` present but not a string
    #[error("Invalid image data: image data must be a base64 string")]
    ImageDataNotText,

    /// Decoding or validation failed
    #[error("Invalid image data: {0}")]
    InvalidImage(#[from] PipelineError),

    /// Some other field is malformed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Body exceeded the server limit
    #[error("Request body too large")]
    BodyTooLarge,

    /// Provider call failed, including configuration and timeouts
    #[error("Failed to generate image: {0}")]
    Generation(#[from] ImageGenError),

    /// Internal failure; details stay in the logs
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingImageData | Self::ImageDataNotText | Self::InvalidImage(_) | Self::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Generation(_) | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// `{"error": "..."}`
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse { error: self.to_string() };

        (status, Json(body)).into_response()
    }
}
