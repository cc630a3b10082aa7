//! Unexpected hit reporting
//!
//! After an ordinary move completes, any hit still in the monitor's log was
//! not consumed by a measurement. Each one is reported with the switch, the
//! position it tripped at and a live re-read of every switch, so an operator
//! can tell a real collision from a flaky contact. Any such hit voids the
//! homed state.

use super::homing::HomingState;
use crate::endstop::{EndstopMonitor, SwitchStatus, TriggerEvent};
use crate::traits::SwitchSensor;

/// Receiver for unexpected-hit reports
pub trait HitSink {
    /// Report one hit together with the live state of all switches
    fn unexpected_hit(&mut self, event: &TriggerEvent, live: &[SwitchStatus]);
}

impl<F> HitSink for F
where
    F: FnMut(&TriggerEvent, &[SwitchStatus]),
{
    fn unexpected_hit(&mut self, event: &TriggerEvent, live: &[SwitchStatus]) {
        self(event, live)
    }
}

/// Report and acknowledge every pending hit
///
/// Returns the number of hits reported. If any were, all axes are marked
/// unhomed.
pub fn surface_unexpected_hits<S, K, const N: usize>(
    monitor: &EndstopMonitor<N>,
    homing: &mut HomingState,
    sensor: &S,
    sink: &mut K,
) -> usize
where
    S: SwitchSensor + ?Sized,
    K: HitSink + ?Sized,
{
    let mut reported = 0;
    monitor.report_hits(|event| {
        let live = monitor.snapshot(sensor);
        error!("unexpected {} hit at {}", event.switch, event.position);
        sink.unexpected_hit(event, &live);
        if monitor.acknowledge(event.switch).is_ok() {
            reported += 1;
        }
    });

    if reported > 0 {
        homing.invalidate_all();
        warn!("{} unexpected endstop hits, re-home required", reported);
    }
    reported
}
