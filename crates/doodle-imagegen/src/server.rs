use doodle_config::{Config, ImageGenProviderType};
use doodle_imaging::{NormalizeOptions, TargetSize};

use crate::{
    error::{ImageGenError, Result},
    provider::{ImageGenProvider, openai::OpenAiImageGenProvider},
    types::{GenerationRequest, GenerationResult},
};

/// Request-independent state for `/api/generate`
///
/// Holds the provider and the normalization limits; nothing in here changes
/// after construction.
pub struct Server {
    provider: Box<dyn ImageGenProvider>,
    normalize: NormalizeOptions,
}

impl Server {
    /// Assemble a server around an already constructed provider
    pub fn new(provider: Box<dyn ImageGenProvider>, normalize: NormalizeOptions) -> Self {
        Self { provider, normalize }
    }

    /// Normalization limits applied to uploads
    pub fn normalize_options(&self) -> NormalizeOptions {
        self.normalize
    }

    /// Send the normalized image and its prompt to the provider
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let prompt = request.prompt();

        tracing::debug!(provider = self.provider.name(), "dispatching generation request");

        self.provider.generate(&request.image, &prompt).await
    }
}

/// Builder for constructing the image generation server from configuration
pub struct ImageGenServerBuilder<'a> {
    config: &'a Config,
}

impl<'a> ImageGenServerBuilder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> Result<Server> {
        let imagegen = &self.config.imagegen;

        let timeout = imagegen
            .timeout_duration()
            .map_err(|e| ImageGenError::ConfigError(e.to_string()))?;

        let provider: Box<dyn ImageGenProvider> = match imagegen.provider {
            ImageGenProviderType::Openai => Box::new(OpenAiImageGenProvider::new(
                imagegen.api_key().cloned(),
                imagegen.base_url.as_ref().map(ToString::to_string),
                imagegen.model.clone(),
                imagegen.size.clone(),
                timeout,
            )?),
        };

        if imagegen.api_key().is_none() {
            tracing::warn!(
                provider = provider.name(),
                "no API key configured; generation requests will fail until one is provided"
            );
        }

        let normalize = NormalizeOptions {
            target: TargetSize::square(self.config.imaging.target_size),
            max_encoded_bytes: self.config.imaging.max_encoded_bytes,
        };

        tracing::debug!(
            provider = provider.name(),
            target_size = self.config.imaging.target_size,
            ?timeout,
            "image generation server initialized"
        );

        Ok(Server::new(provider, normalize))
    }
}
