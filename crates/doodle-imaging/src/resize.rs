use image::{Rgba, RgbaImage, imageops};

use crate::error::ValidationError;

/// Canvas fill for the padded area: white, fully transparent
const PADDING: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Exact output dimensions for [`resize_and_pad`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    /// Square target of `side` pixels
    pub const fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

impl Default for TargetSize {
    fn default() -> Self {
        Self::square(1024)
    }
}

/// Where the scaled image lands on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

/// Compute the scaled size and centered offset of a `width`x`height` image
///
/// The scale factor is the smaller of the two axis ratios, new dimensions are
/// truncated, and each is kept at a minimum of one pixel.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn placement(width: u32, height: u32, target: TargetSize) -> Result<Placement, ValidationError> {
    if target.width == 0 || target.height == 0 {
        return Err(ValidationError::InvalidTarget {
            width: target.width,
            height: target.height,
        });
    }

    if width == 0 || height == 0 {
        return Err(ValidationError::InvalidImage(format!("image has no pixels ({width}x{height})")));
    }

    let width_ratio = f64::from(target.width) / f64::from(width);
    let height_ratio = f64::from(target.height) / f64::from(height);
    let scale = width_ratio.min(height_ratio);

    let new_width = ((f64::from(width) * scale) as u32).clamp(1, target.width);
    let new_height = ((f64::from(height) * scale) as u32).clamp(1, target.height);

    Ok(Placement {
        width: new_width,
        height: new_height,
        x: (target.width - new_width) / 2,
        y: (target.height - new_height) / 2,
    })
}

/// Scale `image` to fit inside `target` and center it on a transparent canvas
///
/// The source is left untouched. Returns an image of exactly the target size.
pub fn resize_and_pad(image: &RgbaImage, target: TargetSize) -> Result<RgbaImage, ValidationError> {
    let place = placement(image.width(), image.height(), target)?;

    tracing::trace!(
        source_width = image.width(),
        source_height = image.height(),
        width = place.width,
        height = place.height,
        x = place.x,
        y = place.y,
        "resizing image onto canvas"
    );

    let resized = if (place.width, place.height) == image.dimensions() {
        image.clone()
    } else {
        imageops::resize(image, place.width, place.height, imageops::FilterType::Lanczos3)
    };

    let mut canvas = RgbaImage::from_pixel(target.width, target.height, PADDING);
    imageops::replace(&mut canvas, &resized, i64::from(place.x), i64::from(place.y));

    Ok(canvas)
}
