//! Decoding, validation and normalization of uploaded doodles
//!
//! Turns a base64 string (bare or data URL) into a PNG of a fixed square
//! size, transparent-padded, ready for an image edit API.

#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod decode;
mod error;
mod normalize;
mod resize;

pub use decode::decode;
pub use error::{DecodeError, PipelineError, ValidationError};
pub use normalize::{
    DEFAULT_MAX_ENCODED_BYTES, NormalizeOptions, ProcessedImage, encode_png, open_canonical, validate_and_normalize,
};
pub use resize::{Placement, TargetSize, placement, resize_and_pad};

/// Decode and normalize an uploaded image string in one step
pub fn process(input: &str, options: &NormalizeOptions) -> Result<ProcessedImage, PipelineError> {
    let bytes = decode(input)?;
    let processed = validate_and_normalize(&bytes, options)?;
    Ok(processed)
}
