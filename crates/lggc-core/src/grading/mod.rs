//! Grading tools — parameters, slider controls, and transfer tables.

pub mod controls;
pub mod params;
pub mod transfer;
