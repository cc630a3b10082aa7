//! Motion vocabulary
//!
//! Axis and travel-direction types shared by the endstop monitor and the
//! measurement layer.

pub mod axis;

pub use axis::{Axis, Direction, AXIS_COUNT};
