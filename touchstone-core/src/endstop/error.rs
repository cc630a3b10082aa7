//! Endstop monitor errors

use core::fmt;

/// Errors reported by the endstop monitor and its event log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EndstopError {
    /// Acknowledged switch is not the oldest unreported hit (or none is pending)
    OutOfOrderAcknowledgement,
    /// Switch is not part of the monitor's configured set
    UnrecognizedSwitch,
}

impl fmt::Display for EndstopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndstopError::OutOfOrderAcknowledgement => {
                f.write_str("endstop hit acknowledged out of order")
            }
            EndstopError::UnrecognizedSwitch => f.write_str("unrecognized endstop switch"),
        }
    }
}
