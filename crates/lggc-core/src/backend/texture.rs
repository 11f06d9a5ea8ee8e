//! The 256×1 lookup strip a filter backend samples.
//!
//! Texel `i` holds the red, green and blue table outputs for level `i`, with
//! alpha fixed at 1. Sampling uses linear filtering across texel centers, the
//! same lookup a GPU performs on a linearly filtered 256-wide texture.

use crate::grading::params::Channel;
use crate::grading::transfer::{TABLE_SIZE, TransferTables};

const MAX_LEVEL: f32 = (TABLE_SIZE - 1) as f32;

/// Packed per-channel lookup curves.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveTexture {
    texels: Vec<[f32; 4]>,
}

impl CurveTexture {
    /// Pack three tables into one RGBA strip.
    pub fn from_tables(tables: &TransferTables) -> Self {
        let texels = tables
            .red
            .entries()
            .iter()
            .zip(tables.green.entries())
            .zip(tables.blue.entries())
            .map(|((r, g), b)| [r.output, g.output, b.output, 1.0])
            .collect();
        Self { texels }
    }

    /// Texels in level order.
    pub fn texels(&self) -> &[[f32; 4]] {
        &self.texels
    }

    /// Raw f32 texel bytes, ready for an `Rgba32Float` upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texels)
    }

    /// Quantized RGBA8 texels.
    pub fn to_rgba8(&self) -> Vec<[u8; 4]> {
        self.texels
            .iter()
            .map(|t| t.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
            .collect()
    }

    /// The strip as a 256×1 image, for export and inspection.
    pub fn to_image(&self) -> image::RgbaImage {
        let texels = self.to_rgba8();
        image::RgbaImage::from_fn(TABLE_SIZE as u32, 1, |x, _| image::Rgba(texels[x as usize]))
    }

    /// Look up one channel at a continuous value. Out-of-range inputs clamp
    /// to the ends of the strip; NaN reads level 0.
    pub fn sample_channel(&self, channel: Channel, value: f32) -> f32 {
        let pos = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0) * MAX_LEVEL
        };
        let lo = pos.floor() as usize;
        let hi = (lo + 1).min(TABLE_SIZE - 1);
        let t = pos - lo as f32;
        let a = self.texels[lo][channel.index()];
        let b = self.texels[hi][channel.index()];
        a + (b - a) * t
    }

    /// Filter an RGBA pixel. Alpha passes through.
    pub fn sample(&self, px: [f32; 4]) -> [f32; 4] {
        [
            self.sample_channel(Channel::Red, px[0]),
            self.sample_channel(Channel::Green, px[1]),
            self.sample_channel(Channel::Blue, px[2]),
            px[3],
        ]
    }
}
