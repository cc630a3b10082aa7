//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::endstop::DEFAULT_TRIGGER_THRESHOLD;

/// Largest touch count a single multi-touch may request
pub const MAX_TOUCHES: usize = 50;

/// Largest sample count a multi-multi-touch may request
pub const MAX_SAMPLES: usize = 30;

/// Agreement needed between repeated release measurements
pub const STABILITY_DELTA: f64 = 0.000625 + f64::EPSILON;

/// Endstop monitor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonitorConfig {
    /// Consecutive contact steps before a switch counts as triggered
    pub debounce_threshold: u8,
}

impl MonitorConfig {
    /// Reference configuration
    pub const fn new() -> Self {
        Self {
            debounce_threshold: DEFAULT_TRIGGER_THRESHOLD,
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Trailing-window convergence criterion
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StabilityWindow {
    /// Most recent samples examined
    pub window: usize,
    /// Samples in the window that must agree with the newest one
    pub min_matches: usize,
    /// Largest distance from the newest sample that still agrees
    pub max_delta: f64,
}

impl StabilityWindow {
    /// Criterion for individual touches within a multi-touch
    pub const fn touches() -> Self {
        Self {
            window: 6,
            min_matches: 4,
            max_delta: STABILITY_DELTA,
        }
    }

    /// Criterion for multi-touch results within a multi-multi-touch
    pub const fn samples() -> Self {
        Self {
            window: 4,
            min_matches: 3,
            max_delta: STABILITY_DELTA,
        }
    }
}

/// Touch measurement configuration
///
/// Distances are in machine units (mm).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TouchConfig {
    /// Approach bound for the first touch of a multi-touch
    pub first_touch_travel: f64,
    /// Retract bound while scanning for release
    pub release_travel: f64,
    /// Raw reads per release-scan increment
    pub release_votes: u8,
    /// Slack added to the re-touch bound after the first touch
    pub retouch_margin: f64,
    /// Early-exit criterion across touches
    pub touch_stability: StabilityWindow,
    /// Early-exit criterion across multi-touch results
    pub sample_stability: StabilityWindow,
}

impl TouchConfig {
    /// Reference configuration
    pub const fn new() -> Self {
        Self {
            first_touch_travel: 10.0,
            release_travel: 1.0,
            release_votes: 20,
            retouch_margin: 0.03,
            touch_stability: StabilityWindow::touches(),
            sample_stability: StabilityWindow::samples(),
        }
    }
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self::new()
    }
}
