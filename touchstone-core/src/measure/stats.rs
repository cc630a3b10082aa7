//! Averaging and stability utilities
//!
//! Positions can be three orders of magnitude larger than the micron-level
//! differences that matter, so every mean here is taken over offsets from
//! the newest sample and added back at the end. Summing absolute positions
//! would round those differences away.

/// Mean of the inliers of a sample set
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FilteredMean {
    /// Mean of the samples within `max_delta` of the newest one
    pub mean: f64,
    /// Number of samples that counted
    pub matches: usize,
}

/// Absolute value without `std`
#[inline]
pub(crate) fn abs(x: f64) -> f64 {
    if x < 0.0 {
        -x
    } else {
        x
    }
}

/// Precision-preserving mean
///
/// Returns NaN for an empty slice.
pub fn average(samples: &[f64]) -> f64 {
    let Some(&last) = samples.last() else {
        return f64::NAN;
    };
    let offset: f64 = samples.iter().map(|&s| s - last).sum();
    last + offset / samples.len() as f64
}

/// Mean of the samples within `max_delta` of the newest one
///
/// The newest sample always counts, so `matches` is at least 1 for a
/// non-empty slice.
pub fn filtered_average(samples: &[f64], max_delta: f64) -> FilteredMean {
    let Some(&last) = samples.last() else {
        return FilteredMean {
            mean: f64::NAN,
            matches: 0,
        };
    };

    let mut offset = 0.0;
    let mut matches = 0;
    for delta in samples.iter().map(|&s| s - last) {
        if abs(delta) <= max_delta {
            offset += delta;
            matches += 1;
        }
    }

    FilteredMean {
        mean: last + offset / matches as f64,
        matches,
    }
}

/// Check if the most recent samples have converged
///
/// Looks at the newest `window` samples (fewer if that many are not yet
/// available) and succeeds with their filtered mean when at least
/// `min_matches` of them lie within `max_delta` of the newest one.
pub fn trailing_stability_check(
    samples: &[f64],
    window: usize,
    min_matches: usize,
    max_delta: f64,
) -> Option<f64> {
    if samples.len() < min_matches || samples.is_empty() {
        return None;
    }
    let start = samples.len().saturating_sub(window);
    let filtered = filtered_average(&samples[start..], max_delta);
    (filtered.matches >= min_matches).then_some(filtered.mean)
}
