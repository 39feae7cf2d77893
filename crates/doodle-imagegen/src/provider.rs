pub(crate) mod openai;

use async_trait::async_trait;
use doodle_imaging::ProcessedImage;

use crate::{error::Result, types::GenerationResult};

/// An image edit backend: normalized doodle plus prompt in, image URL out
#[async_trait]
pub trait ImageGenProvider: Send + Sync {
    /// Generate one image from `image` guided by `prompt`
    async fn generate(&self, image: &ProcessedImage, prompt: &str) -> Result<GenerationResult>;

    /// Get the provider name
    fn name(&self) -> &str;
}
