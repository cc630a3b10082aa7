//! Motion layer interface
//!
//! Abstracts the planner and step-pulse driver. Implementations call
//! [`EndstopMonitor::on_step`](crate::endstop::EndstopMonitor::on_step) once
//! per physical step and abort the move the moment it reports triggered.

use core::fmt;

use crate::motion::{Axis, Direction};

/// How a bounded move toward a switch ended
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveEnd {
    /// An endstop on the approached side triggered and stopped the move
    Triggered {
        /// Axis position where motion stopped
        position: f64,
    },
    /// The travel bound ran out first
    Exhausted {
        /// Axis position at the end of travel
        position: f64,
    },
}

impl MoveEnd {
    /// Axis position where the move ended
    pub fn position(&self) -> f64 {
        match self {
            MoveEnd::Triggered { position } | MoveEnd::Exhausted { position } => *position,
        }
    }

    /// Check if an endstop stopped the move
    pub fn is_triggered(&self) -> bool {
        matches!(self, MoveEnd::Triggered { .. })
    }
}

/// Failures reported by the motion layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionFault {
    /// A plain move was stopped by an endstop
    Blocked,
    /// Motor stall detected
    StallDetected,
    /// Stepper driver reported a fault
    DriverFault,
}

impl fmt::Display for MotionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionFault::Blocked => f.write_str("move blocked by endstop"),
            MotionFault::StallDetected => f.write_str("motor stall"),
            MotionFault::DriverFault => f.write_str("stepper driver fault"),
        }
    }
}

/// Blocking motion primitives used by touch measurements
///
/// Every call blocks the main context until motion completes. While waiting,
/// implementations keep the system's periodic stay-alive work running.
pub trait Mover {
    /// Move along `axis` in `direction` until an endstop on that side triggers
    /// or `max_travel` is used up
    fn move_until_triggered(
        &mut self,
        axis: Axis,
        direction: Direction,
        speed: f64,
        max_travel: f64,
    ) -> Result<MoveEnd, MotionFault>;

    /// Relative move by a signed `distance`; returns the final position
    fn move_by(&mut self, axis: Axis, distance: f64, speed: f64) -> Result<f64, MotionFault>;

    /// Current compensated position
    fn current_position(&self, axis: Axis) -> f64;

    /// Current raw step counter
    fn raw_step_position(&self, axis: Axis) -> i32;

    /// Smallest commandable distance on `axis` (one step)
    fn step_distance(&self, axis: Axis) -> f64;
}

impl<M: Mover + ?Sized> Mover for &mut M {
    fn move_until_triggered(
        &mut self,
        axis: Axis,
        direction: Direction,
        speed: f64,
        max_travel: f64,
    ) -> Result<MoveEnd, MotionFault> {
        (**self).move_until_triggered(axis, direction, speed, max_travel)
    }

    fn move_by(&mut self, axis: Axis, distance: f64, speed: f64) -> Result<f64, MotionFault> {
        (**self).move_by(axis, distance, speed)
    }

    fn current_position(&self, axis: Axis) -> f64 {
        (**self).current_position(axis)
    }

    fn raw_step_position(&self, axis: Axis) -> i32 {
        (**self).raw_step_position(axis)
    }

    fn step_distance(&self, axis: Axis) -> f64 {
        (**self).step_distance(axis)
    }
}
