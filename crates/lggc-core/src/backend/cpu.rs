//! CPU implementation of the curve filter.

use crate::backend::texture::CurveTexture;
use crate::backend::{BackendError, CurveBackend};
use crate::grading::transfer::TransferTables;
use crate::image::GradingImage;

/// Default largest accepted image side, matching common GPU texture limits.
pub const DEFAULT_MAX_TEXTURE_SIZE: u32 = 8192;

/// Applies transfer tables to an in-memory copy of the source image.
#[derive(Debug)]
pub struct CpuCurveBackend {
    max_texture_size: u32,
    source: Option<GradingImage>,
}

impl CpuCurveBackend {
    /// Create a backend that accepts images up to `max_texture_size` on
    /// either side. A limit of zero leaves no room for any texture.
    pub fn new(max_texture_size: u32) -> Result<Self, BackendError> {
        if max_texture_size == 0 {
            return Err(BackendError::Unavailable {
                backend: "cpu",
                reason: "maximum texture size is zero".to_string(),
            });
        }
        Ok(Self {
            max_texture_size,
            source: None,
        })
    }

    /// Largest accepted image side.
    pub fn max_texture_size(&self) -> u32 {
        self.max_texture_size
    }
}

impl CurveBackend for CpuCurveBackend {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn upload(&mut self, image: &GradingImage) -> Result<(), BackendError> {
        if image.width > self.max_texture_size || image.height > self.max_texture_size {
            return Err(BackendError::TextureTooLarge {
                width: image.width,
                height: image.height,
                max: self.max_texture_size,
            });
        }
        if !image.is_consistent() {
            return Err(BackendError::InvalidImage {
                expected: image.pixel_count(),
                actual: image.pixels.len(),
            });
        }
        tracing::debug!("cpu texture uploaded: {}x{}", image.width, image.height);
        self.source = Some(image.clone());
        Ok(())
    }

    fn apply_curves(&mut self, tables: &TransferTables) -> Result<GradingImage, BackendError> {
        let source = self.source.as_ref().ok_or(BackendError::NoTexture)?;
        let texture = CurveTexture::from_tables(tables);
        let pixels = source.pixels.iter().map(|&px| texture.sample(px)).collect();
        Ok(GradingImage {
            width: source.width,
            height: source.height,
            pixels,
            source_bit_depth: source.source_bit_depth,
        })
    }
}
