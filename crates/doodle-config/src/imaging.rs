use serde::Deserialize;

/// Normalization limits for uploaded doodles
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImagingConfig {
    /// Side of the square PNG sent to the provider
    #[serde(default = "default_target_size")]
    pub target_size: u32,
    /// Cap on the canonical PNG encoding, in bytes
    #[serde(default = "default_max_encoded_bytes")]
    pub max_encoded_bytes: usize,
}

impl Default for ImagingConfig {
    fn default() -> Self {
        Self {
            target_size: default_target_size(),
            max_encoded_bytes: default_max_encoded_bytes(),
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_target_size() -> u32 {
    1024
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_encoded_bytes() -> usize {
    4 * 1024 * 1024
}
