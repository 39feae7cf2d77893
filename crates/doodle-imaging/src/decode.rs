use std::sync::OnceLock;

use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use regex::Regex;

use crate::error::DecodeError;

/// Standard alphabet, padding optional, trailing bits tolerated
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

fn data_url_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^data:image/[^;]+;base64,(.+)").expect("must be valid regex"))
}

fn alphabet_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9+/=]+$").expect("must be valid regex"))
}

/// Decode a base64 image string into raw bytes
///
/// Accepts either bare base64 or a `data:image/<subtype>;base64,<payload>`
/// URL. Missing `=` padding is restored before decoding.
pub fn decode(input: &str) -> Result<Vec<u8>, DecodeError> {
    if input.is_empty() {
        return Err(DecodeError::Empty);
    }

    let payload = if input.starts_with("data:") {
        data_url_pattern()
            .captures(input)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str())
            .ok_or(DecodeError::InvalidDataUrl)?
    } else {
        input
    };

    let mut padded = String::with_capacity(payload.len() + 3);
    padded.push_str(payload);
    while padded.len() % 4 != 0 {
        padded.push('=');
    }

    if !alphabet_pattern().is_match(&padded) {
        return Err(DecodeError::InvalidCharacters);
    }

    let bytes = LENIENT.decode(padded.as_bytes())?;

    if bytes.is_empty() {
        return Err(DecodeError::EmptyPayload);
    }

    tracing::debug!(decoded_bytes = bytes.len(), "decoded image payload");

    Ok(bytes)
}
