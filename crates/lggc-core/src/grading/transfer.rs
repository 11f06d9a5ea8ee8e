//! Lift/gamma/gain/contrast transfer tables.
//!
//! Bakes the effective parameters of each channel into a 256-entry lookup
//! table mapping an 8-bit input level to an output intensity in `[0, 1]`.
//!
//! # Formula
//! For each level `b` in `0..256`:
//! ```text
//!   in  = b / 255
//!   v   = gain × (in + lift × (1 − in))
//!   out = clamp(pow(max(v, 0), 1 / gamma), 0, 1)
//!   out = clamp(out × (1 − contrast) + contrast × smoothstep(out), 0, 1)
//! ```
//!
//! ```text
//!   Input ──→ +Lift×(1−in) ──→ ×Gain ──→ max(0) ──→ ^(1/Gamma) ──→ clamp ──→ mix(smoothstep, Contrast) ──→ Output
//! ```

use serde::{Deserialize, Serialize};

use crate::error::GradeError;
use crate::grading::params::{Channel, ChannelParameters, GradeParameters};

/// Number of entries in every transfer table (one per 8-bit level).
pub const TABLE_SIZE: usize = 256;

/// Largest input level, used to normalize indices to `[0, 1]`.
const MAX_LEVEL: f32 = (TABLE_SIZE - 1) as f32;

/// Power with a non-negative base.
///
/// Negative bases are replaced by zero, so fractional exponents never
/// produce NaN.
pub fn safe_pow(base: f32, exponent: f32) -> f32 {
    if base < 0.0 {
        return 0.0_f32.powf(exponent);
    }
    base.powf(exponent)
}

/// Cubic ease curve `3x² − 2x³`.
pub fn smoothstep(x: f32) -> f32 {
    3.0 * x * x - 2.0 * x * x * x
}

/// Evaluate the grade for a single normalized input.
///
/// Callers are expected to have validated `params`; see
/// [`ChannelParameters::validate`].
pub fn transfer(input: f32, params: &ChannelParameters) -> f32 {
    let v = params.gain * (input + params.lift * (1.0 - input));
    let out = safe_pow(v, 1.0 / params.gamma).clamp(0.0, 1.0);
    let blended = out * (1.0 - params.contrast) + params.contrast * smoothstep(out);
    blended.clamp(0.0, 1.0)
}

/// One sample of a transfer table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransferEntry {
    /// Normalized input level, `b / 255`.
    pub input: f32,
    /// Graded output in `[0, 1]`.
    pub output: f32,
}

/// A 256-entry lookup curve for one channel. Index = 8-bit input level.
///
/// Immutable once built; a parameter change rebuilds the whole table.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferTable {
    entries: Box<[TransferEntry; TABLE_SIZE]>,
}

impl TransferTable {
    /// Bake `params` into a table.
    ///
    /// Fails if any parameter is non-finite or gamma is not positive.
    pub fn build(channel: Channel, params: &ChannelParameters) -> Result<Self, GradeError> {
        params.validate(channel)?;

        let mut entries = Box::new(
            [TransferEntry {
                input: 0.0,
                output: 0.0,
            }; TABLE_SIZE],
        );
        for (b, entry) in entries.iter_mut().enumerate() {
            let input = b as f32 / MAX_LEVEL;
            *entry = TransferEntry {
                input,
                output: transfer(input, params),
            };
        }
        Ok(Self { entries })
    }

    /// The identity table, `(b/255, b/255)` for every level.
    pub fn identity() -> Self {
        let mut entries = Box::new(
            [TransferEntry {
                input: 0.0,
                output: 0.0,
            }; TABLE_SIZE],
        );
        for (b, entry) in entries.iter_mut().enumerate() {
            let v = b as f32 / MAX_LEVEL;
            *entry = TransferEntry {
                input: v,
                output: v,
            };
        }
        Self { entries }
    }

    /// All entries in input order.
    pub fn entries(&self) -> &[TransferEntry; TABLE_SIZE] {
        &self.entries
    }

    /// Output value for an 8-bit level.
    pub fn output(&self, level: u8) -> f32 {
        self.entries[level as usize].output
    }

    /// Table outputs as a plain 1D LUT.
    pub fn outputs(&self) -> Vec<f32> {
        self.entries.iter().map(|e| e.output).collect()
    }
}

/// Transfer tables for red, green and blue.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferTables {
    pub red: TransferTable,
    pub green: TransferTable,
    pub blue: TransferTable,
}

impl TransferTables {
    /// Tables that leave every channel unchanged.
    pub fn identity() -> Self {
        Self {
            red: TransferTable::identity(),
            green: TransferTable::identity(),
            blue: TransferTable::identity(),
        }
    }

    /// Compose global and per-channel offsets, then bake all three tables.
    pub fn from_parameters(params: &GradeParameters) -> Result<Self, GradeError> {
        let [red, green, blue] = params.effective_all();
        build_tables(&red, &green, &blue)
    }

    /// Table for `channel`.
    pub fn get(&self, channel: Channel) -> &TransferTable {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }
}

/// Bake one table per channel from already-composed effective parameters.
///
/// Channels are independent: each table reads only its own parameters. All
/// three are validated before any output is returned.
pub fn build_tables(
    red: &ChannelParameters,
    green: &ChannelParameters,
    blue: &ChannelParameters,
) -> Result<TransferTables, GradeError> {
    let tables = TransferTables {
        red: TransferTable::build(Channel::Red, red)?,
        green: TransferTable::build(Channel::Green, green)?,
        blue: TransferTable::build(Channel::Blue, blue)?,
    };
    tracing::debug!(
        "transfer tables rebuilt: r={:?} g={:?} b={:?}",
        red,
        green,
        blue
    );
    Ok(tables)
}
