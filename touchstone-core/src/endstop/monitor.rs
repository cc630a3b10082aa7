//! Endstop monitor
//!
//! Sole owner of every debounce filter and of the trigger event log. The
//! step-pulse interrupt calls [`EndstopMonitor::on_step`] once per step; the
//! main context queries, toggles and acknowledges through the same object.
//!
//! All state sits behind a critical-section mutex whose only access path is a
//! short closure, so nothing reachable while the state is held can block.
//!
//! # Direction mapping
//!
//! Travel along an axis only consults the switches on the side being
//! approached. Switches on the side being departed are reset every step so a
//! contact that is still settling after release cannot stop travel the other
//! way.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::Vec;

use super::debounce::DebounceFilter;
use super::error::EndstopError;
use super::log::{TriggerEvent, TriggerEventLog, DEFAULT_LOG_CAPACITY};
use super::switch::SwitchId;
use crate::config::MonitorConfig;
use crate::motion::{Axis, Direction};
use crate::traits::{Compensation, SwitchSensor};

/// Hits the monitor's log can hold before dropping
pub const LOG_CAPACITY: usize = DEFAULT_LOG_CAPACITY;

/// Progress of travel toward one side of an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ApproachState {
    /// No contact samples accumulated
    Idle,
    /// Contact seen but not yet debounced
    Approaching,
    /// At least one switch on this side is triggered
    Triggered,
}

/// Point-in-time view of one switch for status dumps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchStatus {
    /// Switch described
    pub switch: SwitchId,
    /// Live raw reading at snapshot time
    pub raw_contact: bool,
    /// Debounced verdict (false while ignored)
    pub triggered: bool,
    /// Verdict suppressed
    pub ignored: bool,
    /// Consecutive contact samples seen by the filter
    pub consecutive_high: u8,
}

struct MonitorState<const N: usize> {
    filters: [DebounceFilter; N],
    /// Last verdict per slot, for edge detection
    latched: [bool; N],
    log: TriggerEventLog<LOG_CAPACITY>,
}

/// Owner of all endstop filter state
pub struct EndstopMonitor<const N: usize> {
    switches: [SwitchId; N],
    state: Mutex<CriticalSectionRawMutex, RefCell<MonitorState<N>>>,
}

impl<const N: usize> EndstopMonitor<N> {
    /// Create a monitor for a fixed set of switches
    ///
    /// `const` so the monitor can live in a `static` shared with the step
    /// interrupt.
    pub const fn new(switches: [SwitchId; N], config: MonitorConfig) -> Self {
        Self {
            switches,
            state: Mutex::new(RefCell::new(MonitorState {
                filters: [DebounceFilter::with_threshold(config.debounce_threshold); N],
                latched: [false; N],
                log: TriggerEventLog::new(),
            })),
        }
    }

    /// Configured switches, in slot order
    pub fn switches(&self) -> &[SwitchId; N] {
        &self.switches
    }

    /// Check if `switch` is part of the configured set
    pub fn contains(&self, switch: SwitchId) -> bool {
        self.switches.contains(&switch)
    }

    /// Look up a configured switch by name
    pub fn switch_named(&self, name: &str) -> Option<SwitchId> {
        self.switches.iter().copied().find(|s| s.name == name)
    }

    fn with<R>(&self, f: impl FnOnce(&mut MonitorState<N>) -> R) -> R {
        self.state.lock(|cell| f(&mut cell.borrow_mut()))
    }

    fn slot(&self, switch: SwitchId) -> Result<usize, EndstopError> {
        match self.switches.iter().position(|s| *s == switch) {
            Some(slot) => Ok(slot),
            None => {
                warn!("unrecognized endstop switch {}", switch);
                Err(EndstopError::UnrecognizedSwitch)
            }
        }
    }

    /// Suppress (or stop suppressing) a switch's verdict
    pub fn ignore(&self, switch: SwitchId, ignored: bool) {
        if let Ok(slot) = self.slot(switch) {
            self.with(|s| s.filters[slot].ignore(ignored));
        }
    }

    /// Set the ignore flag and return its previous value in one critical section
    ///
    /// Returns `None` for a switch outside the configured set.
    pub fn swap_ignore(&self, switch: SwitchId, ignored: bool) -> Option<bool> {
        let slot = self.slot(switch).ok()?;
        Some(self.with(|s| {
            let previous = s.filters[slot].is_ignored();
            s.filters[slot].ignore(ignored);
            previous
        }))
    }

    /// Check if a switch's verdict is suppressed
    pub fn ignoring(&self, switch: SwitchId) -> bool {
        match self.slot(switch) {
            Ok(slot) => self.with(|s| s.filters[slot].is_ignored()),
            Err(_) => false,
        }
    }

    /// Debounced verdict for one switch
    ///
    /// A switch outside the configured set reads as triggered: stopping
    /// spuriously beats missing a real limit.
    pub fn is_triggered(&self, switch: SwitchId) -> bool {
        match self.slot(switch) {
            Ok(slot) => self.with(|s| s.filters[slot].triggered()),
            Err(_) => true,
        }
    }

    /// Check if anything blocks travel along `axis` in `direction`
    pub fn is_triggered_toward(&self, axis: Axis, direction: Direction) -> bool {
        self.with(|s| {
            self.switches
                .iter()
                .zip(s.filters.iter())
                .any(|(switch, filter)| switch.blocks(axis, direction) && filter.triggered())
        })
    }

    /// Per-step entry point for the step-pulse interrupt
    ///
    /// Resets the filters on the side being departed, feeds the raw levels of
    /// the side being approached and returns whether that side is triggered.
    /// A filter entering the triggered state logs one [`TriggerEvent`] at the
    /// compensated position of `raw_steps`.
    ///
    /// `compensation` must be a pure, bounded computation.
    pub fn on_step<S, C>(
        &self,
        axis: Axis,
        direction: Direction,
        raw_steps: i32,
        sensor: &S,
        compensation: &C,
    ) -> bool
    where
        S: SwitchSensor + ?Sized,
        C: Compensation + ?Sized,
    {
        let mut levels = [false; N];
        for (level, switch) in levels.iter_mut().zip(self.switches.iter()) {
            if switch.blocks(axis, direction) {
                *level = sensor.is_contact(*switch);
            }
        }

        let (triggered, rising) = self.with(|s| {
            let mut triggered = false;
            let mut rising = [false; N];
            for (slot, switch) in self.switches.iter().enumerate() {
                if switch.blocks(axis, direction) {
                    let filter = &mut s.filters[slot];
                    filter.add_sample(levels[slot]);
                    let now = filter.triggered();
                    rising[slot] = now && !s.latched[slot];
                    // Latch survives an ignore toggle; only an open sample clears it
                    if now {
                        s.latched[slot] = true;
                    } else if filter.count() == 0 {
                        s.latched[slot] = false;
                    }
                    triggered |= now;
                } else if switch.recedes(axis, direction) {
                    s.filters[slot].reset();
                    s.latched[slot] = false;
                }
            }
            (triggered, rising)
        });

        if rising.iter().any(|&r| r) {
            let position = compensation.steps_to_position(axis, raw_steps);
            self.with(|s| {
                for (slot, &rose) in rising.iter().enumerate() {
                    if rose {
                        s.log.push(self.switches[slot], position);
                    }
                }
            });
        }

        triggered
    }

    /// State of travel toward one side of an axis
    pub fn approach_state(&self, axis: Axis, direction: Direction) -> ApproachState {
        self.with(|s| {
            let mut state = ApproachState::Idle;
            for (switch, filter) in self.switches.iter().zip(s.filters.iter()) {
                if !switch.blocks(axis, direction) {
                    continue;
                }
                if filter.triggered() {
                    return ApproachState::Triggered;
                }
                if filter.count() > 0 {
                    state = ApproachState::Approaching;
                }
            }
            state
        })
    }

    /// Clear one switch's sample run
    pub fn reset(&self, switch: SwitchId) {
        if let Ok(slot) = self.slot(switch) {
            self.with(|s| {
                s.filters[slot].reset();
                s.latched[slot] = false;
            });
        }
    }

    /// Clear every switch's sample run
    pub fn reset_all(&self) {
        self.with(|s| {
            s.filters.iter_mut().for_each(DebounceFilter::reset);
            s.latched = [false; N];
        });
    }

    /// Pop the oldest hit if it belongs to `switch`
    pub fn acknowledge(&self, switch: SwitchId) -> Result<TriggerEvent, EndstopError> {
        self.with(|s| s.log.acknowledge(switch))
    }

    /// Oldest unreported hit
    pub fn front_hit(&self) -> Option<TriggerEvent> {
        self.with(|s| s.log.front())
    }

    /// Check if any hit is waiting to be reported
    pub fn has_unreported_hits(&self) -> bool {
        self.with(|s| s.log.has_unreported_hits())
    }

    /// Number of hits lost to a full log
    pub fn dropped_hits(&self) -> u32 {
        self.with(|s| s.log.dropped())
    }

    /// Visit every pending hit, oldest first
    ///
    /// Main context only. The log is copied out before `report` runs, so the
    /// callback may call back into the monitor (typically to
    /// [`acknowledge`](Self::acknowledge)). Hits it does not acknowledge stay
    /// pending.
    pub fn report_hits<F>(&self, mut report: F)
    where
        F: FnMut(&TriggerEvent),
    {
        let pending = self.with(|s| s.log.pending());
        for event in pending.iter() {
            report(event);
        }
    }

    /// Raw and debounced state of every switch
    pub fn snapshot<S: SwitchSensor + ?Sized>(&self, sensor: &S) -> Vec<SwitchStatus, N> {
        let filters = self.with(|s| s.filters);
        self.switches
            .iter()
            .zip(filters.iter())
            .map(|(switch, filter)| SwitchStatus {
                switch: *switch,
                raw_contact: sensor.is_contact(*switch),
                triggered: filter.triggered(),
                ignored: filter.is_ignored(),
                consecutive_high: filter.count(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fmt::capture;
    use crate::testing::{
        unit_scale, ManualSensor, TOOL_CONTACT, X_MAX, X_MIN, XY_BACK, Y_MIN, Z_TOP,
    };

    fn monitor() -> EndstopMonitor<6> {
        EndstopMonitor::new(
            [X_MIN, X_MAX, Y_MIN, XY_BACK, Z_TOP, TOOL_CONTACT],
            MonitorConfig::default(),
        )
    }

    fn step(m: &EndstopMonitor<6>, sensor: &ManualSensor, axis: Axis, dir: Direction, at: i32) -> bool {
        m.on_step(axis, dir, at, sensor, &unit_scale())
    }

    #[test]
    fn test_trigger_after_two_contact_steps() {
        let m = monitor();
        let sensor = ManualSensor::new();
        sensor.set(X_MAX, true);

        assert!(!step(&m, &sensor, Axis::X, Direction::Positive, 1));
        assert!(step(&m, &sensor, Axis::X, Direction::Positive, 2));
        assert!(m.is_triggered(X_MAX));
        assert!(m.is_triggered_toward(Axis::X, Direction::Positive));
        assert!(!m.is_triggered_toward(Axis::X, Direction::Negative));
    }

    #[test]
    fn test_rising_edge_logged_once() {
        let m = monitor();
        let sensor = ManualSensor::new();
        sensor.set(X_MAX, true);

        for at in 0..10 {
            step(&m, &sensor, Axis::X, Direction::Positive, at);
        }

        let hit = m.acknowledge(X_MAX).ok();
        assert_eq!(hit.map(|e| e.position), Some(1.0));
        assert!(!m.has_unreported_hits());
    }

    #[test]
    fn test_departing_side_is_reset() {
        let m = monitor();
        let sensor = ManualSensor::new();
        sensor.set(X_MAX, true);
        step(&m, &sensor, Axis::X, Direction::Positive, 1);
        step(&m, &sensor, Axis::X, Direction::Positive, 2);
        assert!(m.is_triggered(X_MAX));

        // Still in contact while backing off: must not block the retreat
        assert!(!step(&m, &sensor, Axis::X, Direction::Negative, 1));
        assert!(!m.is_triggered(X_MAX));
        assert_eq!(m.approach_state(Axis::X, Direction::Positive), ApproachState::Idle);
    }

    #[test]
    fn test_auxiliary_and_limit_share_a_side() {
        let m = monitor();
        let sensor = ManualSensor::new();
        sensor.set(XY_BACK, true);

        step(&m, &sensor, Axis::Y, Direction::Positive, 1);
        assert_eq!(
            m.approach_state(Axis::Y, Direction::Positive),
            ApproachState::Approaching
        );
        assert!(step(&m, &sensor, Axis::Y, Direction::Positive, 2));
        assert_eq!(
            m.approach_state(Axis::Y, Direction::Positive),
            ApproachState::Triggered
        );
        // Negative travel on Y consults y-min only
        assert!(!m.is_triggered_toward(Axis::Y, Direction::Negative));
    }

    #[test]
    fn test_other_axes_untouched() {
        let m = monitor();
        let sensor = ManualSensor::new();
        sensor.set(Z_TOP, true);
        m.on_step(Axis::Z, Direction::Positive, 0, &sensor, &unit_scale());
        m.on_step(Axis::Z, Direction::Positive, 1, &sensor, &unit_scale());

        step(&m, &sensor, Axis::X, Direction::Negative, 0);
        assert!(m.is_triggered(Z_TOP));
    }

    #[test]
    fn test_ignored_switch_does_not_stop_travel() {
        let m = monitor();
        let sensor = ManualSensor::new();
        sensor.set(TOOL_CONTACT, true);
        m.ignore(TOOL_CONTACT, true);

        for at in 0..5 {
            assert!(!m.on_step(Axis::Z, Direction::Negative, -at, &sensor, &unit_scale()));
        }
        assert!(!m.has_unreported_hits());

        // History survives: releasing the ignore reports it on the next step
        m.ignore(TOOL_CONTACT, false);
        assert!(m.is_triggered(TOOL_CONTACT));
        assert!(m.on_step(Axis::Z, Direction::Negative, -5, &sensor, &unit_scale()));
        assert!(m.acknowledge(TOOL_CONTACT).is_ok());
    }

    #[test]
    fn test_ignore_toggle_does_not_log_twice() {
        let m = monitor();
        let sensor = ManualSensor::new();
        sensor.set(X_MAX, true);
        step(&m, &sensor, Axis::X, Direction::Positive, 1);
        step(&m, &sensor, Axis::X, Direction::Positive, 2);

        m.ignore(X_MAX, true);
        assert!(!step(&m, &sensor, Axis::X, Direction::Positive, 3));
        m.ignore(X_MAX, false);
        assert!(step(&m, &sensor, Axis::X, Direction::Positive, 4));

        assert_eq!(m.acknowledge(X_MAX).map(|e| e.position), Ok(2.0));
        assert!(!m.has_unreported_hits());

        // An open sample re-arms the edge
        sensor.set(X_MAX, false);
        step(&m, &sensor, Axis::X, Direction::Positive, 5);
        sensor.set(X_MAX, true);
        step(&m, &sensor, Axis::X, Direction::Positive, 6);
        step(&m, &sensor, Axis::X, Direction::Positive, 7);
        assert_eq!(m.acknowledge(X_MAX).map(|e| e.position), Ok(7.0));
    }

    #[test]
    fn test_unknown_switch_is_triggered_with_one_diagnostic() {
        let m = monitor();
        let stray = SwitchId::auxiliary("stray", Axis::X, Direction::Positive);

        capture::take();
        assert!(m.is_triggered(stray));
        let lines = capture::take();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("stray"));
    }

    #[test]
    fn test_swap_ignore_reports_previous() {
        let m = monitor();
        assert_eq!(m.swap_ignore(X_MIN, true), Some(false));
        assert_eq!(m.swap_ignore(X_MIN, true), Some(true));
        assert!(m.ignoring(X_MIN));

        let stray = SwitchId::auxiliary("stray", Axis::X, Direction::Positive);
        assert_eq!(m.swap_ignore(stray, true), None);
    }

    #[test]
    fn test_report_hits_allows_acknowledge_in_callback() {
        let m = monitor();
        let sensor = ManualSensor::new();
        sensor.set(X_MIN, true);
        sensor.set(Z_TOP, true);
        for at in 0..2 {
            step(&m, &sensor, Axis::X, Direction::Negative, -at);
            m.on_step(Axis::Z, Direction::Positive, at, &sensor, &unit_scale());
        }

        let mut names = std::vec::Vec::new();
        m.report_hits(|event| {
            names.push(event.switch.name);
            if event.switch == X_MIN {
                assert!(m.acknowledge(event.switch).is_ok());
            }
        });

        assert_eq!(names, ["x-min", "z-top"]);
        assert_eq!(m.front_hit().map(|e| e.switch), Some(Z_TOP));
    }

    #[test]
    fn test_log_overflow_counts_drops() {
        let m = monitor();
        let sensor = ManualSensor::new();
        sensor.set(X_MAX, true);

        capture::take();
        for round in 0..(LOG_CAPACITY as i32 + 1) {
            step(&m, &sensor, Axis::X, Direction::Positive, round);
            step(&m, &sensor, Axis::X, Direction::Positive, round);
            m.reset(X_MAX);
        }

        assert_eq!(m.dropped_hits(), 1);
        assert_eq!(capture::take().len(), 1);
    }

    #[test]
    fn test_snapshot_and_reset_all() {
        let m = monitor();
        let sensor = ManualSensor::new();
        sensor.set(X_MIN, true);
        step(&m, &sensor, Axis::X, Direction::Negative, 0);
        step(&m, &sensor, Axis::X, Direction::Negative, -1);
        m.ignore(TOOL_CONTACT, true);

        let snap = m.snapshot(&sensor);
        assert_eq!(snap.len(), 6);
        assert!(snap[0].raw_contact && snap[0].triggered);
        assert!(!snap[1].raw_contact && !snap[1].triggered);
        assert!(snap[5].ignored);

        m.reset_all();
        assert!(!m.is_triggered(X_MIN));
        assert!(m.ignoring(TOOL_CONTACT));
    }

    #[test]
    fn test_switch_named() {
        let m = monitor();
        assert_eq!(m.switch_named("tool-contact"), Some(TOOL_CONTACT));
        assert_eq!(m.switch_named("nope"), None);
    }
}
