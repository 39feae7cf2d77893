//! Sample uploads encoded the way the browser canvas sends them

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{ImageFormat, Rgba, RgbaImage};
use rand::{Rng as _, SeedableRng as _, rngs::StdRng};

fn png_bytes(image: &RgbaImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Wrap PNG bytes in a `data:image/png;base64,` URL
pub fn data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// Solid red square, the smallest realistic doodle
pub fn red_square(size: u32) -> String {
    data_url(&png_bytes(&RgbaImage::from_pixel(size, size, Rgba([255, 0, 0, 255]))))
}

/// Random pixels at the target size; PNG cannot compress these below the raw size
pub fn noise(size: u32) -> String {
    let mut rng = StdRng::seed_from_u64(7);
    let image = RgbaImage::from_fn(size, size, |_, _| Rgba(rng.random()));
    data_url(&png_bytes(&image))
}
