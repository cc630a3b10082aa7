//! Per-switch debounce filter
//!
//! Counts consecutive "contact" samples. The step driver samples once per
//! step, so a step-count threshold scales with travel speed instead of
//! needing a time window. Any open sample clears the run.

/// Consecutive contact samples needed before a switch counts as triggered
pub const DEFAULT_TRIGGER_THRESHOLD: u8 = 2;

/// Debounce state for one switch
///
/// The filter itself is plain data. Cross-context atomicity comes from the
/// owner ([`EndstopMonitor`](super::EndstopMonitor)), which only touches it
/// inside a critical section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceFilter {
    /// Run length of contact samples, saturating at `threshold`
    consecutive_high: u8,
    /// Samples needed to trigger
    threshold: u8,
    /// Verdict suppressed; the count keeps running
    ignored: bool,
}

impl Default for DebounceFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl DebounceFilter {
    /// Create a filter with the default threshold
    pub const fn new() -> Self {
        Self::with_threshold(DEFAULT_TRIGGER_THRESHOLD)
    }

    /// Create a filter with a custom threshold (minimum 1)
    pub const fn with_threshold(threshold: u8) -> Self {
        Self {
            consecutive_high: 0,
            threshold: if threshold == 0 { 1 } else { threshold },
            ignored: false,
        }
    }

    /// Feed one raw sample
    #[inline]
    pub fn add_sample(&mut self, contact: bool) {
        if !contact {
            self.consecutive_high = 0;
        } else if self.consecutive_high < self.threshold {
            self.consecutive_high += 1;
        }
    }

    /// Debounced verdict, honouring the ignore flag
    #[inline]
    pub fn triggered(&self) -> bool {
        !self.ignored && self.settled()
    }

    /// Debounced contact regardless of the ignore flag
    #[inline]
    pub fn settled(&self) -> bool {
        self.consecutive_high >= self.threshold
    }

    /// Suppress (or stop suppressing) the verdict
    pub fn ignore(&mut self, ignored: bool) {
        self.ignored = ignored;
    }

    /// Check if the verdict is suppressed
    pub fn is_ignored(&self) -> bool {
        self.ignored
    }

    /// Clear the sample run; the ignore flag is untouched
    pub fn reset(&mut self) {
        self.consecutive_high = 0;
    }

    /// Current run length
    pub fn count(&self) -> u8 {
        self.consecutive_high
    }

    /// Configured threshold
    pub fn threshold(&self) -> u8 {
        self.threshold
    }
}
