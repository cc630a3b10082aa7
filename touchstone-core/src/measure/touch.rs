//! Single touch measurement
//!
//! One touch drives toward a switch until it triggers, then backs off one
//! step at a time and samples the raw signal to find where it releases.
//! Contact bounce is worse on release than on approach, so calibration uses
//! the first point where the switch stops reading unanimously closed
//! (`release_start`); the approach and the fully-open point are kept for
//! diagnostics.

use super::error::TouchError;
use super::stats::abs;
use crate::config::TouchConfig;
use crate::endstop::{EnableGuard, EndstopMonitor, SwitchId};
use crate::traits::{Housekeeping, MoveEnd, Mover, SwitchSensor};

/// Outcome of one touch
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchResult {
    /// Position recorded when the switch triggered
    pub approach: f64,
    /// First retract position where the switch was not unanimously closed
    pub release_start: f64,
    /// First retract position where the switch was unanimously open
    pub release_end: f64,
}

/// Touch measurements against the switches of one monitor
///
/// Owns the collaborators a measurement drives: the mover, the raw switch
/// sensor for release voting and the stay-alive hook.
pub struct TouchProbe<'a, M, S, H, const N: usize> {
    pub(super) monitor: &'a EndstopMonitor<N>,
    pub(super) mover: M,
    pub(super) sensor: S,
    pub(super) housekeeping: H,
    pub(super) config: TouchConfig,
}

impl<'a, M, S, H, const N: usize> TouchProbe<'a, M, S, H, N>
where
    M: Mover,
    S: SwitchSensor,
    H: Housekeeping,
{
    /// Create a probe
    pub fn new(
        monitor: &'a EndstopMonitor<N>,
        mover: M,
        sensor: S,
        housekeeping: H,
        config: TouchConfig,
    ) -> Self {
        Self {
            monitor,
            mover,
            sensor,
            housekeeping,
            config,
        }
    }

    /// Monitor this probe measures against
    pub fn monitor(&self) -> &'a EndstopMonitor<N> {
        self.monitor
    }

    /// Active configuration
    pub fn config(&self) -> &TouchConfig {
        &self.config
    }

    /// Access the mover between measurements
    pub fn mover_mut(&mut self) -> &mut M {
        &mut self.mover
    }

    /// Give back the collaborators
    pub fn into_parts(self) -> (M, S, H) {
        (self.mover, self.sensor, self.housekeeping)
    }

    /// Touch `switch` once
    ///
    /// Approaches at `speed` for at most `max_travel`, then scans the release
    /// by retracting one step at a time for at most the configured release
    /// travel. The switch is enabled for the duration even if it is normally
    /// ignored.
    pub fn touch(
        &mut self,
        switch: SwitchId,
        speed: f64,
        max_travel: f64,
    ) -> Result<TouchResult, TouchError> {
        if !self.monitor.contains(switch) {
            warn!("touch requested on unrecognized switch {}", switch);
            return Err(TouchError::UnrecognizedSwitch);
        }
        if let Some(stale) = self.monitor.front_hit() {
            warn!("touch on {} refused, hit on {} not yet reported", switch, stale.switch);
            return Err(TouchError::OutOfOrderAcknowledgement);
        }
        let _enabled = EnableGuard::new(self.monitor, switch);

        let end = self
            .mover
            .move_until_triggered(switch.axis, switch.approach, speed, max_travel)?;
        let MoveEnd::Triggered { position: stopped_at } = end else {
            debug!("{} not reached within {}", switch, max_travel);
            return Err(TouchError::SwitchDidNotTrigger);
        };

        let approach = self.take_hit(switch, stopped_at)?;
        let (release_start, release_end) = self.scan_release(switch, speed)?;

        trace!(
            "touch {}: approach {} release {}..{}",
            switch,
            approach,
            release_start,
            release_end
        );
        Ok(TouchResult {
            approach,
            release_start,
            release_end,
        })
    }

    /// Consume the hit that ended the approach and return its position
    ///
    /// A different switch on the same side stopping the move fails the touch;
    /// its hit stays pending for the caller to surface.
    fn take_hit(&self, switch: SwitchId, stopped_at: f64) -> Result<f64, TouchError> {
        if !self.monitor.is_triggered(switch) {
            warn!("approach to {} stopped by another switch at {}", switch, stopped_at);
            return Err(TouchError::SwitchDidNotTrigger);
        }
        match self.monitor.acknowledge(switch) {
            Ok(hit) => Ok(hit.position),
            Err(e) => {
                warn!("hit on {} queued behind another switch", switch);
                Err(e.into())
            }
        }
    }

    /// Retract step by step until the switch reads unanimously open
    fn scan_release(&mut self, switch: SwitchId, speed: f64) -> Result<(f64, f64), TouchError> {
        let axis = switch.axis;
        let step = abs(self.mover.step_distance(axis));
        if step.is_nan() || step <= 0.0 {
            return Err(TouchError::SwitchDidNotRelease);
        }

        let retract = switch.approach.opposite().sign() * step;
        let increments = (self.config.release_travel / step) as u32;
        let votes = self.config.release_votes.max(1);
        let mut release_start = None;

        for _ in 0..increments {
            self.housekeeping.service();
            let position = self.mover.move_by(axis, retract, speed)?;
            let closed = self.vote(switch, votes);
            if closed < votes {
                let start = *release_start.get_or_insert(position);
                if closed == 0 {
                    return Ok((start, position));
                }
            }
        }

        debug!("{} still closed after {} retract", switch, self.config.release_travel);
        Err(TouchError::SwitchDidNotRelease)
    }

    /// Count raw closed readings out of `votes`
    fn vote(&self, switch: SwitchId, votes: u8) -> u8 {
        (0..votes).filter(|_| self.sensor.is_contact(switch)).count() as u8
    }
}
