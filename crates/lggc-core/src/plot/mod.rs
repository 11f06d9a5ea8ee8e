//! Curve display — polyline geometry for the transfer tables and a small
//! software surface to draw them on.

pub mod canvas;
pub mod curve;

pub use canvas::CurveCanvas;
pub use curve::{CurvePlot, CurvePoint, plot_curve};
