//! Repeated touches with early exit
//!
//! A multi-touch repeats [`TouchProbe::touch`] until the trailing release
//! points agree; a multi-multi-touch repeats multi-touches the same way to
//! catch slow drift that a single converged run would hide. Neither layer
//! fails for lack of convergence: the plain average of what was collected
//! is returned instead.

use heapless::Vec;

use super::error::TouchError;
use super::stats::{abs, average, trailing_stability_check};
use super::touch::TouchProbe;
use crate::config::{StabilityWindow, MAX_SAMPLES, MAX_TOUCHES};
use crate::endstop::SwitchId;
use crate::traits::{Housekeeping, Mover, SwitchSensor};

/// Outcome of a multi-touch
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MultiTouchResult {
    /// Converged (or averaged) release-start position
    pub result: f64,
    /// Touches performed
    pub touches_used: usize,
}

/// Outcome of a multi-multi-touch
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MultiMultiTouchResult {
    /// Converged (or averaged) multi-touch result
    pub result: f64,
    /// Multi-touches performed
    pub samples_taken: usize,
    /// Touches performed across all samples
    pub total_touches: usize,
}

fn settled<const CAP: usize>(samples: &Vec<f64, CAP>, criterion: &StabilityWindow) -> Option<f64> {
    trailing_stability_check(
        samples,
        criterion.window,
        criterion.min_matches,
        criterion.max_delta,
    )
}

impl<M, S, H, const N: usize> TouchProbe<'_, M, S, H, N>
where
    M: Mover,
    S: SwitchSensor,
    H: Housekeeping,
{
    /// Touch `switch` until the release points converge
    ///
    /// The first touch may travel the configured first-touch distance; later
    /// touches only travel as far as the previous release profile plus the
    /// re-touch margin.
    pub fn multi_touch(
        &mut self,
        switch: SwitchId,
        speed: f64,
        max_touches: usize,
    ) -> Result<MultiTouchResult, TouchError> {
        if max_touches == 0 || max_touches > MAX_TOUCHES {
            return Err(TouchError::CapacityExceeded);
        }

        let criterion = self.config.touch_stability;
        let mut release_starts: Vec<f64, MAX_TOUCHES> = Vec::new();
        let mut travel = self.config.first_touch_travel;

        for _ in 0..max_touches {
            let touch = self.touch(switch, speed, travel)?;
            release_starts
                .push(touch.release_start)
                .map_err(|_| TouchError::CapacityExceeded)?;
            travel = abs(touch.release_end - touch.approach) + self.config.retouch_margin;

            if let Some(result) = settled(&release_starts, &criterion) {
                debug!("{} settled after {} touches", switch, release_starts.len());
                return Ok(MultiTouchResult {
                    result,
                    touches_used: release_starts.len(),
                });
            }
        }

        info!(
            "{} did not settle in {} touches, averaging",
            switch,
            release_starts.len()
        );
        Ok(MultiTouchResult {
            result: average(&release_starts),
            touches_used: release_starts.len(),
        })
    }

    /// Repeat multi-touches until their results converge
    pub fn multi_multi_touch(
        &mut self,
        switch: SwitchId,
        speed: f64,
        max_samples: usize,
        max_touches_per_sample: usize,
    ) -> Result<MultiMultiTouchResult, TouchError> {
        if max_samples == 0 || max_samples > MAX_SAMPLES {
            return Err(TouchError::CapacityExceeded);
        }

        let criterion = self.config.sample_stability;
        let mut results: Vec<f64, MAX_SAMPLES> = Vec::new();
        let mut total_touches = 0;

        for _ in 0..max_samples {
            let sample = self.multi_touch(switch, speed, max_touches_per_sample)?;
            total_touches += sample.touches_used;
            results
                .push(sample.result)
                .map_err(|_| TouchError::CapacityExceeded)?;

            if let Some(result) = settled(&results, &criterion) {
                return Ok(MultiMultiTouchResult {
                    result,
                    samples_taken: results.len(),
                    total_touches,
                });
            }
        }

        info!(
            "{} samples of {} did not settle, averaging",
            results.len(),
            switch
        );
        Ok(MultiMultiTouchResult {
            result: average(&results),
            samples_taken: results.len(),
            total_touches,
        })
    }
}
