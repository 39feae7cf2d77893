use thiserror::Error;

/// Failure to turn an input string into image bytes
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Nothing to decode
    #[error("image data is empty")]
    Empty,

    /// Input starts with `data:` but is not an image data URL
    #[error("invalid data URL format")]
    InvalidDataUrl,

    /// Payload contains characters outside the base64 alphabet
    #[error("invalid base64 string: contains characters outside the base64 alphabet")]
    InvalidCharacters,

    /// The base64 decoder rejected the payload
    #[error("invalid base64 string: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Payload decoded to zero bytes
    #[error("decoded image is empty")]
    EmptyPayload,
}

/// Failure to validate or normalize decoded image bytes
#[derive(Debug, Error)]
pub enum ValidationError {
    /// No bytes were supplied
    #[error("empty image data")]
    Empty,

    /// Bytes are not a supported raster image
    #[error("unsupported or corrupt image: {0}")]
    InvalidImage(String),

    /// Canonical PNG encoding exceeds the size cap
    #[error("image too large: {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },

    /// Resize target has a zero dimension
    #[error("invalid target size {width}x{height}")]
    InvalidTarget { width: u32, height: u32 },

    /// PNG encoding of an in-memory image failed
    #[error("failed to encode image: {0}")]
    Encode(String),
}

impl ValidationError {
    /// Whether this error is the size-cap violation
    pub fn is_too_large(&self) -> bool {
        matches!(self, Self::TooLarge { .. })
    }
}

/// Any failure between receiving the raw string and holding a processed image
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
