//! LGGC Core — lift/gamma/gain/contrast grading math.
//!
//! Turns twelve grading parameters into three 256-entry per-channel transfer
//! tables, plots those tables as curves, and applies them to images through
//! a pluggable [`backend::CurveBackend`]. No GPU or UI dependencies.

pub mod backend;
pub mod error;
pub mod grading;
pub mod image;
pub mod plot;
pub mod session;

// Re-exports for convenience.
pub use crate::backend::{BackendError, CpuCurveBackend, CurveBackend, CurveTexture};
pub use crate::error::GradeError;
pub use crate::grading::controls::{Control, ControlPanel};
pub use crate::grading::params::{Channel, ChannelParameters, GradeParameters, ParameterKind};
pub use crate::grading::transfer::{TransferEntry, TransferTable, TransferTables, build_tables};
pub use crate::image::{BitDepth, GradingImage};
pub use crate::plot::{CurveCanvas, CurvePoint, plot_curve};
pub use crate::session::{GradingSession, SessionError};
