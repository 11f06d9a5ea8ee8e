//! Image loading and saving for the command-line tool.

use std::path::Path;

use lggc_core::image::GradingImage;

/// Load an image from disk and convert to the internal `GradingImage` format.
///
/// Supports common formats via the `image` crate (PNG, JPEG, TIFF, ...).
/// Pixels keep their encoded values; 8-bit level `b` becomes `b / 255`.
pub fn load_image(path: &Path) -> Result<GradingImage, ImageLoadError> {
    let img = image::open(path).map_err(ImageLoadError::Decode)?;
    let image = GradingImage::from_dynamic(&img);
    tracing::info!(
        "loaded {} ({}x{}, {})",
        path.display(),
        image.width,
        image.height,
        image.source_bit_depth
    );
    Ok(image)
}

/// Save a graded image, choosing the format from the file extension.
pub fn save_image(image: &GradingImage, path: &Path) -> Result<(), ImageLoadError> {
    let out = image.to_dynamic().ok_or(ImageLoadError::InvalidBuffer)?;
    // JPEG has no alpha channel.
    let out = match image::ImageFormat::from_path(path) {
        Ok(image::ImageFormat::Jpeg) => image::DynamicImage::ImageRgb8(out.to_rgb8()),
        _ => out,
    };
    out.save(path).map_err(ImageLoadError::Encode)?;
    tracing::info!("wrote {}", path.display());
    Ok(())
}

/// Errors that can occur while reading or writing images.
#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),
    #[error("failed to encode image: {0}")]
    Encode(image::ImageError),
    #[error("image buffer does not match its dimensions")]
    InvalidBuffer,
}
