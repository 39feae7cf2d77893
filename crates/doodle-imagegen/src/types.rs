use doodle_imaging::ProcessedImage;
use serde::{Deserialize, Serialize};

use crate::prompt::build_prompt;

/// Body of `POST /api/generate`
///
/// Fields are kept as raw JSON so that absent, null and wrongly typed values
/// can each be mapped to a precise error.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    /// Base64 image, bare or as a data URL
    #[serde(rename = "imageData", default)]
    pub image_data: Option<serde_json::Value>,
    /// Short description of the subject (e.g. "cat")
    #[serde(rename = "promptHint", default)]
    pub prompt_hint: Option<serde_json::Value>,
}

/// Successful `POST /api/generate` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// Normalized image plus the optional hint, scoped to one request
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub image: ProcessedImage,
    pub prompt_hint: Option<String>,
}

impl GenerationRequest {
    /// Prompt sent alongside the image
    pub fn prompt(&self) -> String {
        build_prompt(self.prompt_hint.as_deref())
    }
}

/// Location of the generated image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub url: String,
}
