//! Step-to-position conversion

use crate::motion::{Axis, AXIS_COUNT};

/// Converts raw step counts into physical positions
///
/// Skew, backlash and scaling corrections belong to the implementation. The
/// monitor calls this only when recording a hit, so it must be pure and
/// bounded.
pub trait Compensation {
    /// Physical position of `steps` on `axis`
    fn steps_to_position(&self, axis: Axis, steps: i32) -> f64;
}

impl<F> Compensation for F
where
    F: Fn(Axis, i32) -> f64,
{
    fn steps_to_position(&self, axis: Axis, steps: i32) -> f64 {
        self(axis, steps)
    }
}

/// Plain per-axis scaling with no correction terms
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinearScale {
    /// Steps per unit of travel, indexed by [`Axis::index`]
    pub steps_per_unit: [f64; AXIS_COUNT],
}

impl LinearScale {
    /// Same scale on every axis
    pub const fn uniform(steps_per_unit: f64) -> Self {
        Self {
            steps_per_unit: [steps_per_unit; AXIS_COUNT],
        }
    }

    /// Length of one step on `axis`
    pub fn step_distance(&self, axis: Axis) -> f64 {
        1.0 / self.steps_per_unit[axis.index()]
    }
}

impl Compensation for LinearScale {
    fn steps_to_position(&self, axis: Axis, steps: i32) -> f64 {
        steps as f64 / self.steps_per_unit[axis.index()]
    }
}
