//! Error types for parameter validation.

use crate::grading::params::{Channel, ParameterKind};

/// Errors raised while turning grading parameters into transfer tables.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GradeError {
    /// An effective (global + offset) parameter is not usable.
    #[error("invalid {parameter} for {channel} channel: {value} ({reason})")]
    InvalidParameter {
        channel: Channel,
        parameter: ParameterKind,
        value: f32,
        reason: &'static str,
    },
}
