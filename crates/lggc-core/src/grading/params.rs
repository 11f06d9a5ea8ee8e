//! Grading parameters: one global set plus per-channel offsets.
//!
//! `GradeParameters` is the single source of truth for a grade. Every control
//! writes here; the transfer table builder reads the full struct.
//!
//! # Composition
//! For each channel `c` in `{R, G, B}` and each parameter `p`:
//! ```text
//!   effective[c].p = global.p + offset[c].p
//! ```
//! Global values shift all three channels together; channel offsets fine-tune
//! one channel relative to the global setting.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GradeError;

/// Identifies one of the three graded color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Human-readable label for log lines and error messages.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }

    /// Index into RGB(A) pixel arrays.
    pub const fn index(&self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }

    /// All channels in pixel order.
    pub fn all() -> &'static [Self] {
        const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];
        &ALL
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifies one of the four per-channel grading parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterKind {
    Lift,
    Gamma,
    Gain,
    Contrast,
}

impl ParameterKind {
    /// Display name, as used on control labels.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Lift => "Lift",
            Self::Gamma => "Gamma",
            Self::Gain => "Gain",
            Self::Contrast => "Contrast",
        }
    }

    /// All parameters in control order.
    pub fn all() -> &'static [Self] {
        const ALL: [ParameterKind; 4] = [
            ParameterKind::Lift,
            ParameterKind::Gamma,
            ParameterKind::Gain,
            ParameterKind::Contrast,
        ];
        &ALL
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lift, gamma, gain and contrast for a single channel.
///
/// Used both for absolute values (the global set, the effective per-channel
/// set) and for per-channel offsets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelParameters {
    /// Shadow lift, weighted by `(1 − input)`. Neutral: 0.
    pub lift: f32,
    /// Inverse-power midtone exponent. Must be > 0 once composed. Neutral: 1.
    pub gamma: f32,
    /// Multiplier applied before the gamma curve. Neutral: 1.
    pub gain: f32,
    /// Blend weight towards the smoothstep curve, expected in `[0, 1]`. Neutral: 0.
    pub contrast: f32,
}

impl ChannelParameters {
    /// The identity grade: every table maps input to itself.
    pub const NEUTRAL: Self = Self {
        lift: 0.0,
        gamma: 1.0,
        gain: 1.0,
        contrast: 0.0,
    };

    /// An offset set that leaves the global values untouched.
    pub const ZERO: Self = Self {
        lift: 0.0,
        gamma: 0.0,
        gain: 0.0,
        contrast: 0.0,
    };

    /// Elementwise sum of `self` and `offset`.
    pub fn offset_by(&self, offset: &ChannelParameters) -> Self {
        Self {
            lift: self.lift + offset.lift,
            gamma: self.gamma + offset.gamma,
            gain: self.gain + offset.gain,
            contrast: self.contrast + offset.contrast,
        }
    }

    /// Read one parameter by kind.
    pub fn get(&self, kind: ParameterKind) -> f32 {
        match kind {
            ParameterKind::Lift => self.lift,
            ParameterKind::Gamma => self.gamma,
            ParameterKind::Gain => self.gain,
            ParameterKind::Contrast => self.contrast,
        }
    }

    /// Write one parameter by kind.
    pub fn set(&mut self, kind: ParameterKind, value: f32) {
        match kind {
            ParameterKind::Lift => self.lift = value,
            ParameterKind::Gamma => self.gamma = value,
            ParameterKind::Gain => self.gain = value,
            ParameterKind::Contrast => self.contrast = value,
        }
    }

    /// Check that these values can drive a transfer table for `channel`.
    ///
    /// Every parameter must be finite and gamma must be strictly positive,
    /// since the table applies `1 / gamma` as an exponent.
    pub fn validate(&self, channel: Channel) -> Result<(), GradeError> {
        for &parameter in ParameterKind::all() {
            let value = self.get(parameter);
            if !value.is_finite() {
                return Err(GradeError::InvalidParameter {
                    channel,
                    parameter,
                    value,
                    reason: "not a finite number",
                });
            }
        }
        if self.gamma <= 0.0 {
            return Err(GradeError::InvalidParameter {
                channel,
                parameter: ParameterKind::Gamma,
                value: self.gamma,
                reason: "gamma must be greater than zero",
            });
        }
        Ok(())
    }
}

impl Default for ChannelParameters {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// The full grade: global values plus per-channel offsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeParameters {
    /// Absolute values shared by all channels.
    pub global: ChannelParameters,
    /// Red channel offsets, added to `global`.
    #[serde(default = "zero_offsets")]
    pub red: ChannelParameters,
    /// Green channel offsets, added to `global`.
    #[serde(default = "zero_offsets")]
    pub green: ChannelParameters,
    /// Blue channel offsets, added to `global`.
    #[serde(default = "zero_offsets")]
    pub blue: ChannelParameters,
}

fn zero_offsets() -> ChannelParameters {
    ChannelParameters::ZERO
}

impl GradeParameters {
    /// Offsets set for `channel`.
    pub fn offsets(&self, channel: Channel) -> &ChannelParameters {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }

    /// Mutable offsets set for `channel`.
    pub fn offsets_mut(&mut self, channel: Channel) -> &mut ChannelParameters {
        match channel {
            Channel::Red => &mut self.red,
            Channel::Green => &mut self.green,
            Channel::Blue => &mut self.blue,
        }
    }

    /// Effective parameters for one channel: `global + offsets(channel)`.
    pub fn effective(&self, channel: Channel) -> ChannelParameters {
        self.global.offset_by(self.offsets(channel))
    }

    /// Effective parameters for red, green and blue, in that order.
    pub fn effective_all(&self) -> [ChannelParameters; 3] {
        [
            self.effective(Channel::Red),
            self.effective(Channel::Green),
            self.effective(Channel::Blue),
        ]
    }

    /// Parse a preset from JSON. Missing channel offsets default to zero.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize as pretty-printed JSON for preset files.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for GradeParameters {
    /// Produces an identity (no-op) grade — image passes through unchanged.
    fn default() -> Self {
        Self {
            global: ChannelParameters::NEUTRAL,
            red: ChannelParameters::ZERO,
            green: ChannelParameters::ZERO,
            blue: ChannelParameters::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_is_global_plus_offset() {
        let params = GradeParameters {
            global: ChannelParameters {
                lift: 0.1,
                gamma: 1.2,
                gain: 0.9,
                contrast: 0.3,
            },
            red: ChannelParameters {
                lift: 0.05,
                gamma: -0.2,
                gain: 0.1,
                contrast: 0.0,
            },
            ..Default::default()
        };

        let red = params.effective(Channel::Red);
        assert_eq!(red.lift, 0.1 + 0.05);
        assert_eq!(red.gamma, 1.2 + -0.2);
        assert_eq!(red.gain, 0.9 + 0.1);
        assert_eq!(red.contrast, 0.3);

        // Untouched channels see the global values.
        assert_eq!(params.effective(Channel::Blue), params.global);
    }

    #[test]
    fn test_validate_rejects_zero_gamma() {
        let params = ChannelParameters {
            gamma: 0.0,
            ..ChannelParameters::NEUTRAL
        };
        let err = params.validate(Channel::Green).unwrap_err();
        assert!(matches!(
            err,
            GradeError::InvalidParameter {
                channel: Channel::Green,
                parameter: ParameterKind::Gamma,
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let params = ChannelParameters {
            lift: f32::NAN,
            ..ChannelParameters::NEUTRAL
        };
        let err = params.validate(Channel::Red).unwrap_err();
        assert!(matches!(
            err,
            GradeError::InvalidParameter {
                parameter: ParameterKind::Lift,
                ..
            }
        ));
    }

    #[test]
    fn test_validate_accepts_neutral() {
        assert!(ChannelParameters::NEUTRAL.validate(Channel::Blue).is_ok());
    }

    #[test]
    fn test_preset_json_defaults_missing_offsets() {
        let json = r#"{ "global": { "lift": 0.0, "gamma": 2.0, "gain": 1.0, "contrast": 0.5 } }"#;
        let params = GradeParameters::from_json(json).unwrap();
        assert_eq!(params.global.gamma, 2.0);
        assert_eq!(params.red, ChannelParameters::ZERO);
        assert_eq!(params.effective(Channel::Green).contrast, 0.5);
    }

    #[test]
    fn test_preset_json_rejects_garbage() {
        assert!(GradeParameters::from_json("{ \"global\": 3 }").is_err());
    }
}
