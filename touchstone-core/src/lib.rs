//! Board-agnostic endstop and touch-measurement core
//!
//! This crate turns bouncy limit-switch signals into trustworthy
//! triggered/not-triggered facts and turns repeated touches against those
//! switches into sub-step position measurements:
//!
//! - Switch identities and per-switch debounce filters
//! - Endstop monitor driven once per step from the step-pulse interrupt
//! - Trigger event log for deferred reporting
//! - Scoped enable/disable guards for calibration workflows
//! - Touch, multi-touch and multi-multi-touch measurements
//! - Precision-preserving averaging and stability checks
//! - Unexpected-hit supervision and homing invalidation
//!
//! The planner, pulse generation, pin access and unit compensation are
//! collaborators reached through the traits in [`traits`].

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

mod fmt;

pub mod config;
pub mod endstop;
pub mod measure;
pub mod motion;
pub mod safety;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use endstop::{
    DebounceFilter, DisableGuard, EnableGuard, EndstopError, EndstopMonitor, SwitchId,
    SwitchKind, TriggerEvent, TriggerEventLog,
};
pub use measure::{MultiMultiTouchResult, MultiTouchResult, TouchError, TouchProbe, TouchResult};
pub use motion::{Axis, Direction};
pub use safety::{surface_unexpected_hits, with_recovery, HitSink, HomingState};
