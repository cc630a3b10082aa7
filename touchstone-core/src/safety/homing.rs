//! Homed-axis bookkeeping

use crate::motion::{Axis, AXIS_COUNT};

/// Which axes currently have a trusted reference position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HomingState {
    homed: [bool; AXIS_COUNT],
}

impl HomingState {
    /// Nothing homed
    pub const fn new() -> Self {
        Self {
            homed: [false; AXIS_COUNT],
        }
    }

    /// Record a completed homing of `axis`
    pub fn mark_homed(&mut self, axis: Axis) {
        self.homed[axis.index()] = true;
    }

    /// Check if `axis` has a trusted reference
    pub fn is_homed(&self, axis: Axis) -> bool {
        self.homed[axis.index()]
    }

    /// Check if every axis is homed
    pub fn all_homed(&self) -> bool {
        self.homed.iter().all(|&h| h)
    }

    /// Forget the reference of one axis
    pub fn invalidate(&mut self, axis: Axis) {
        self.homed[axis.index()] = false;
    }

    /// Forget every reference, forcing a re-home
    pub fn invalidate_all(&mut self) {
        self.homed = [false; AXIS_COUNT];
    }
}
