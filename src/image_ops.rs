use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, GenericImageView, ImageEncoder};

use crate::error::ConvertError;

/// Target dimensions for fitting `(width, height)` inside a square of side
/// `max`, preserving aspect ratio. Never scales up; never returns zero.
pub fn fit_dimensions(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width, height);
    }
    let ratio = f64::from(max) / f64::from(width.max(height));
    let w = ((f64::from(width) * ratio).round() as u32).max(1);
    let h = ((f64::from(height) * ratio).round() as u32).max(1);
    (w, h)
}

/// Shrink `img` so its larger side is at most `max`, keeping the aspect
/// ratio locked. Images that already fit are returned unchanged.
pub fn resize_to_fit(img: DynamicImage, max: u32) -> DynamicImage {
    let (width, height) = img.dimensions();
    let (w, h) = fit_dimensions(width, height, max);
    if (w, h) == (width, height) {
        return img;
    }
    img.resize_exact(w, h, FilterType::Lanczos3)
}

/// Encode `img` as lossless WebP, overwriting `dest` if it already exists.
pub fn write_webp(img: &DynamicImage, dest: &Path) -> Result<(), ConvertError> {
    let file = File::create(dest)
        .map_err(|e| ConvertError::Encode(format!("{}: {}", dest.display(), e)))?;
    let rgba = img.to_rgba8();
    WebPEncoder::new_lossless(BufWriter::new(file))
        .encode(
            rgba.as_raw(),
            rgba.width(),
            rgba.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| ConvertError::Encode(format!("{}: {}", dest.display(), e)))
}

/// Write the intermediate resize artifact with the PNG encoder's best
/// compression.
pub fn write_resized_png(img: &DynamicImage, dest: &Path) -> Result<(), ConvertError> {
    let file = File::create(dest)
        .map_err(|e| ConvertError::Encode(format!("{}: {}", dest.display(), e)))?;
    let rgba = img.to_rgba8();
    PngEncoder::new_with_quality(
        BufWriter::new(file),
        CompressionType::Best,
        PngFilterType::Adaptive,
    )
    .write_image(
        rgba.as_raw(),
        rgba.width(),
        rgba.height(),
        ExtendedColorType::Rgba8,
    )
    .map_err(|e| ConvertError::Encode(format!("{}: {}", dest.display(), e)))
}
