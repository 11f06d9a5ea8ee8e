//! Transfer table → polyline geometry.
//!
//! Each table is drawn inside a surface with a fixed margin on every side.
//! For sample `i` of a table with output `o[i]`:
//! ```text
//!   usable_w = width  − 2 × MARGIN
//!   usable_h = height − 2 × MARGIN
//!   x = MARGIN + usable_w × i / 255
//!   y = MARGIN + usable_h − usable_h × o[i]
//! ```
//! Screen y grows downwards, so higher outputs sit higher on the surface.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::grading::params::Channel;
use crate::grading::transfer::{TABLE_SIZE, TransferTable, TransferTables};

/// Blank border kept around the plot, in pixels.
pub const MARGIN: f32 = 5.0;

/// One plotted sample, in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f32,
    pub y: f32,
}

impl From<CurvePoint> for Vec2 {
    fn from(p: CurvePoint) -> Self {
        Vec2::new(p.x, p.y)
    }
}

/// Plot one table into a `width × height` surface.
///
/// Returns 256 points in input order, to be joined as an open polyline.
pub fn plot_curve(table: &TransferTable, width: f32, height: f32) -> Vec<CurvePoint> {
    let usable_w = width - 2.0 * MARGIN;
    let usable_h = height - 2.0 * MARGIN;
    let last = (TABLE_SIZE - 1) as f32;

    table
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| CurvePoint {
            x: MARGIN + usable_w * (i as f32 / last),
            y: MARGIN + usable_h - usable_h * entry.output,
        })
        .collect()
}

/// Stroke colour that identifies a channel on the curve display.
pub fn channel_color(channel: Channel) -> [f32; 4] {
    const LEVEL: f32 = 128.0 / 255.0;
    match channel {
        Channel::Red => [LEVEL, 0.0, 0.0, 1.0],
        Channel::Green => [0.0, LEVEL, 0.0, 1.0],
        Channel::Blue => [0.0, 0.0, LEVEL, 1.0],
    }
}

/// Polylines for all three channels on a common surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePlot {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    pub red: Vec<CurvePoint>,
    pub green: Vec<CurvePoint>,
    pub blue: Vec<CurvePoint>,
}

impl CurvePlot {
    /// Plot every table of `tables` into a `width × height` surface.
    pub fn new(tables: &TransferTables, width: u32, height: u32) -> Self {
        let (w, h) = (width as f32, height as f32);
        Self {
            width,
            height,
            red: plot_curve(&tables.red, w, h),
            green: plot_curve(&tables.green, w, h),
            blue: plot_curve(&tables.blue, w, h),
        }
    }

    /// Points for `channel`.
    pub fn points(&self, channel: Channel) -> &[CurvePoint] {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::params::ChannelParameters;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_plot_has_one_point_per_entry_spanning_margins() {
        let table = TransferTable::identity();
        for (w, h) in [(256.0, 128.0), (20.0, 20.0), (1000.0, 37.0)] {
            let points = plot_curve(&table, w, h);
            assert_eq!(points.len(), 256);
            assert!((points[0].x - MARGIN).abs() < EPSILON);
            assert!((points[255].x - (w - MARGIN)).abs() < EPSILON);
            assert!(points.windows(2).all(|p| p[1].x > p[0].x));
        }
    }

    #[test]
    fn test_identity_curve_runs_bottom_left_to_top_right() {
        let points = plot_curve(&TransferTable::identity(), 110.0, 60.0);
        assert!((points[0].y - 55.0).abs() < EPSILON);
        assert!((points[255].y - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_higher_output_plots_higher() {
        let params = ChannelParameters {
            lift: 0.1,
            gamma: 1.7,
            gain: 1.2,
            contrast: 0.4,
        };
        let table = TransferTable::build(Channel::Red, &params).unwrap();
        let points = plot_curve(&table, 300.0, 200.0);
        let entries = table.entries();
        for i in 0..256 {
            for j in 0..256 {
                if entries[j].output > entries[i].output {
                    assert!(points[j].y <= points[i].y);
                }
            }
        }
    }

    #[test]
    fn test_curve_plot_keeps_channels_apart() {
        let mut tables = TransferTables::identity();
        tables.red = TransferTable::build(
            Channel::Red,
            &ChannelParameters {
                lift: 0.5,
                ..ChannelParameters::NEUTRAL
            },
        )
        .unwrap();
        let plot = CurvePlot::new(&tables, 200, 100);
        assert_eq!(plot.points(Channel::Green), plot.points(Channel::Blue));
        assert!(plot.points(Channel::Red)[0].y < plot.points(Channel::Green)[0].y);
        assert_ne!(channel_color(Channel::Red), channel_color(Channel::Blue));
    }
}
