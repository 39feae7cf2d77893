use std::time::Duration;

use async_trait::async_trait;
use doodle_imaging::ProcessedImage;
use reqwest::{
    Client,
    multipart::{Form, Part},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::ImageGenProvider;
use crate::{
    error::{ImageGenError, Result},
    types::GenerationResult,
};

/// Default `OpenAI` API base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Longest provider error text passed back to clients
const MAX_ERROR_MESSAGE_LEN: usize = 300;

/// `OpenAI` image edit provider
pub(crate) struct OpenAiImageGenProvider {
    name: String,
    client: Client,
    api_key: Option<SecretString>,
    base_url: String,
    model: Option<String>,
    size: String,
    timeout: Duration,
}

impl OpenAiImageGenProvider {
    /// Create a new `OpenAI` image edit provider
    ///
    /// A missing key is accepted here and reported on the first request.
    pub fn new(
        api_key: Option<SecretString>,
        base_url: Option<String>,
        model: Option<String>,
        size: String,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| ImageGenError::ConfigError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            name: "openai".to_string(),
            client,
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model,
            size,
            timeout,
        })
    }

    fn transport_error(&self, error: reqwest::Error) -> ImageGenError {
        if error.is_timeout() {
            ImageGenError::Timeout(self.timeout)
        } else {
            ImageGenError::ConnectionError(format!(
                "failed to reach image generation provider: {}",
                error.without_url()
            ))
        }
    }
}

/// Wire format for the `OpenAI` image response
#[derive(Deserialize)]
struct OpenAiImageResponse {
    #[serde(default)]
    data: Vec<OpenAiImageData>,
}

#[derive(Deserialize)]
struct OpenAiImageData {
    url: Option<String>,
}

/// Wire format for `OpenAI` error bodies
#[derive(Deserialize)]
struct OpenAiErrorBody {
    error: OpenAiErrorDetails,
}

#[derive(Deserialize)]
struct OpenAiErrorDetails {
    message: String,
}

/// Pull a human readable message out of a provider error body
fn provider_message(body: &str) -> String {
    let message = serde_json::from_str::<OpenAiErrorBody>(body)
        .map_or_else(|_| body.trim().to_string(), |parsed| parsed.error.message);

    if message.is_empty() {
        return "Unknown error".to_string();
    }

    if message.chars().count() > MAX_ERROR_MESSAGE_LEN {
        let truncated: String = message.chars().take(MAX_ERROR_MESSAGE_LEN).collect();
        return format!("{truncated}...");
    }

    message
}

#[async_trait]
impl ImageGenProvider for OpenAiImageGenProvider {
    async fn generate(&self, image: &ProcessedImage, prompt: &str) -> Result<GenerationResult> {
        let Some(api_key) = self.api_key.as_ref() else {
            tracing::error!(provider = %self.name, "no API key configured");
            return Err(ImageGenError::ConfigError(format!(
                "no API key configured for image generation provider '{}'",
                self.name
            )));
        };

        let url = format!("{}/images/edits", self.base_url.trim_end_matches('/'));

        let image_part = Part::bytes(image.as_bytes().to_vec())
            .file_name("doodle.png")
            .mime_str("image/png")
            .map_err(|e| ImageGenError::ConfigError(format!("invalid image content type: {e}")))?;

        let mut form = Form::new()
            .part("image", image_part)
            .text("prompt", prompt.to_string())
            .text("n", "1")
            .text("size", self.size.clone())
            .text("response_format", "url");

        if let Some(model) = &self.model {
            form = form.text("model", model.clone());
        }

        tracing::info!(
            provider = %self.name,
            image_bytes = image.len(),
            prompt,
            "sending image edit request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(provider = %self.name, error = %e, "image edit request failed");
                self.transport_error(e)
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                tracing::warn!(provider = %self.name, error = %e, "failed to read error response body");
                String::new()
            });
            let message = provider_message(&body);

            tracing::error!(
                provider = %self.name,
                status = %status,
                message = %message,
                "image edit API error"
            );

            return Err(match status.as_u16() {
                401 | 403 => ImageGenError::AuthenticationFailed(message),
                code => ImageGenError::ProviderApiError { status: code, message },
            });
        }

        let wire_response: OpenAiImageResponse = response.json().await.map_err(|e| {
            tracing::error!(provider = %self.name, error = %e, "failed to parse image edit response");
            if e.is_timeout() {
                ImageGenError::Timeout(self.timeout)
            } else {
                ImageGenError::MalformedResponse(format!("response body could not be parsed: {}", e.without_url()))
            }
        })?;

        let url = wire_response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| ImageGenError::MalformedResponse("no images returned".to_string()))?
            .url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ImageGenError::MalformedResponse("image result has no URL".to_string()))?;

        tracing::info!(provider = %self.name, %url, "image generated");

        Ok(GenerationResult { url })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
