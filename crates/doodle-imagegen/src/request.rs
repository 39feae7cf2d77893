use axum::{
    body::{Body, Bytes},
    extract::FromRequest,
    http::StatusCode,
};
use serde_json::Value;

use crate::{error::ApiError, types::GenerateRequest};

/// Validated `/api/generate` payload
#[derive(Debug)]
pub struct GeneratePayload {
    pub image_data: String,
    pub prompt_hint: Option<String>,
}

impl TryFrom<GenerateRequest> for GeneratePayload {
    type Error = ApiError;

    fn try_from(request: GenerateRequest) -> Result<Self, Self::Error> {
        let image_data = match request.image_data {
            None | Some(Value::Null) => return Err(ApiError::MissingImageData),
            Some(Value::String(data)) => data,
            Some(_) => return Err(ApiError::ImageDataNotText),
        };

        let prompt_hint = match request.prompt_hint {
            None | Some(Value::Null) => None,
            Some(Value::String(hint)) => Some(hint),
            Some(_) => return Err(ApiError::InvalidRequest("promptHint must be a string".to_string())),
        };

        Ok(Self {
            image_data,
            prompt_hint,
        })
    }
}

/// Extractor that reads the JSON body and applies [`GeneratePayload`] rules
///
/// Bodies that are not a JSON object are treated as carrying no image data.
pub struct ExtractGenerate(pub GeneratePayload);

impl<S> FromRequest<S> for ExtractGenerate
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: axum::http::Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(request, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::BodyTooLarge
            } else {
                tracing::warn!(error = %rejection, "failed to read request body");
                ApiError::MissingImageData
            }
        })?;

        let request = serde_json::from_slice::<GenerateRequest>(&bytes).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "request body is not a JSON object");
            GenerateRequest::default()
        });

        tracing::info!(
            has_image_data = request.image_data.is_some(),
            has_prompt_hint = request.prompt_hint.is_some(),
            "received generate request"
        );

        Ok(Self(GeneratePayload::try_from(request)?))
    }
}
