//! Image representation for the grading pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

use image::{DynamicImage, ImageBuffer, Rgba};

/// Supported bit depths for source images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BitDepth {
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer.
    U16,
    /// 32-bit floating point.
    F32,
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8 => write!(f, "8-bit"),
            Self::U16 => write!(f, "16-bit"),
            Self::F32 => write!(f, "32-bit float"),
        }
    }
}

impl From<image::ColorType> for BitDepth {
    fn from(color: image::ColorType) -> Self {
        match color {
            image::ColorType::L16
            | image::ColorType::La16
            | image::ColorType::Rgb16
            | image::ColorType::Rgba16 => Self::U16,
            image::ColorType::Rgb32F | image::ColorType::Rgba32F => Self::F32,
            _ => Self::U8,
        }
    }
}

/// Internal image representation. Always stored as RGBA f32 in the source's
/// encoded (display) space, with 8-bit level `b` stored as `b / 255`.
#[derive(Debug, Clone, PartialEq)]
pub struct GradingImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data in RGBA f32 format, row-major.
    pub pixels: Vec<[f32; 4]>,
    /// Original bit depth of the source image.
    pub source_bit_depth: BitDepth,
}

impl GradingImage {
    /// A `width × height` image filled with `color`.
    pub fn filled(width: u32, height: u32, color: [f32; 4]) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; (width as usize) * (height as usize)],
            source_bit_depth: BitDepth::F32,
        }
    }

    /// Convert a decoded image, remembering its bit depth for export.
    pub fn from_dynamic(img: &DynamicImage) -> Self {
        let rgba = img.to_rgba32f();
        let (width, height) = rgba.dimensions();
        let pixels = rgba.pixels().map(|p| p.0).collect();

        Self {
            width,
            height,
            pixels,
            source_bit_depth: BitDepth::from(img.color()),
        }
    }

    /// Number of pixels the dimensions describe.
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Whether `pixels` matches the stated dimensions.
    pub fn is_consistent(&self) -> bool {
        self.pixels.len() == self.pixel_count()
    }

    /// Convert back to a `DynamicImage` at the source bit depth.
    ///
    /// Returns `None` if the pixel buffer does not match the dimensions.
    pub fn to_dynamic(&self) -> Option<DynamicImage> {
        match self.source_bit_depth {
            BitDepth::U8 => {
                let raw: Vec<u8> = self
                    .pixels
                    .iter()
                    .flat_map(|p| p.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
                    .collect();
                ImageBuffer::<Rgba<u8>, _>::from_raw(self.width, self.height, raw)
                    .map(DynamicImage::ImageRgba8)
            }
            BitDepth::U16 => {
                let raw: Vec<u16> = self
                    .pixels
                    .iter()
                    .flat_map(|p| p.map(|c| (c.clamp(0.0, 1.0) * 65535.0).round() as u16))
                    .collect();
                ImageBuffer::<Rgba<u16>, _>::from_raw(self.width, self.height, raw)
                    .map(DynamicImage::ImageRgba16)
            }
            BitDepth::F32 => {
                let raw: Vec<f32> = self.pixels.iter().flat_map(|p| *p).collect();
                ImageBuffer::<Rgba<f32>, _>::from_raw(self.width, self.height, raw)
                    .map(DynamicImage::ImageRgba32F)
            }
        }
    }
}
