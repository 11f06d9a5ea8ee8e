//! Image-filter backends that apply transfer tables to a loaded image.
//!
//! A backend owns the "texture" — its own copy of the source image in
//! whatever form it needs — and re-applies a fresh set of tables to it on
//! every parameter change. The CPU backend is always available; other
//! backends plug in through [`CurveBackend`].

pub mod cpu;
pub mod texture;

pub use cpu::CpuCurveBackend;
pub use texture::CurveTexture;

use crate::grading::transfer::TransferTables;
use crate::image::GradingImage;

/// Errors that prevent a backend from loading or filtering an image.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("{backend} backend is unavailable: {reason}")]
    Unavailable {
        backend: &'static str,
        reason: String,
    },
    #[error("image {width}x{height} exceeds the maximum texture size of {max}")]
    TextureTooLarge { width: u32, height: u32, max: u32 },
    #[error("image buffer holds {actual} pixels, expected {expected}")]
    InvalidImage { expected: usize, actual: usize },
    #[error("no image has been uploaded")]
    NoTexture,
}

/// Applies per-channel lookup curves to an uploaded image.
pub trait CurveBackend {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Create the backend's texture from `image`, replacing any previous one.
    fn upload(&mut self, image: &GradingImage) -> Result<(), BackendError>;

    /// Filter the uploaded texture through `tables`, returning the graded image.
    fn apply_curves(&mut self, tables: &TransferTables) -> Result<GradingImage, BackendError>;
}
