use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::{
    error::ValidationError,
    resize::{TargetSize, resize_and_pad},
};

/// Upper bound for the canonical PNG encoding (4 MiB)
pub const DEFAULT_MAX_ENCODED_BYTES: usize = 4 * 1024 * 1024;

/// Limits applied while normalizing an uploaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Exact output size
    pub target: TargetSize,
    /// Maximum size of the pre-resize PNG encoding
    pub max_encoded_bytes: usize,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            target: TargetSize::default(),
            max_encoded_bytes: DEFAULT_MAX_ENCODED_BYTES,
        }
    }
}

/// Normalized PNG ready to send to a generation provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedImage {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl ProcessedImage {
    /// Encoded PNG bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Parse raw bytes as an image and convert it to RGBA
pub fn open_canonical(bytes: &[u8]) -> Result<RgbaImage, ValidationError> {
    if bytes.is_empty() {
        return Err(ValidationError::Empty);
    }

    let image = image::load_from_memory(bytes).map_err(|e| ValidationError::InvalidImage(e.to_string()))?;

    Ok(image.into_rgba8())
}

/// Encode an RGBA image as PNG
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ValidationError> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| ValidationError::Encode(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Validate raw image bytes and produce the padded PNG sent downstream
///
/// The size cap applies to the canonical RGBA encoding before resizing, so
/// a small JPEG of a huge noisy photo can still be rejected.
pub fn validate_and_normalize(bytes: &[u8], options: &NormalizeOptions) -> Result<ProcessedImage, ValidationError> {
    let canonical = open_canonical(bytes)?;

    let encoded_len = encode_png(&canonical)?.len();
    if encoded_len > options.max_encoded_bytes {
        tracing::warn!(
            size = encoded_len,
            limit = options.max_encoded_bytes,
            "rejecting oversized image"
        );
        return Err(ValidationError::TooLarge {
            size: encoded_len,
            limit: options.max_encoded_bytes,
        });
    }

    let padded = resize_and_pad(&canonical, options.target)?;
    let bytes = encode_png(&padded)?;

    tracing::debug!(
        source_width = canonical.width(),
        source_height = canonical.height(),
        output_bytes = bytes.len(),
        "normalized image"
    );

    Ok(ProcessedImage {
        bytes,
        width: padded.width(),
        height: padded.height(),
    })
}
