//! Touch measurement errors

use core::fmt;

use crate::endstop::EndstopError;
use crate::traits::MotionFault;

/// Errors that can end a touch measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError {
    /// Approach travel ran out before the switch triggered
    SwitchDidNotTrigger,
    /// Retract travel ran out before the switch released
    SwitchDidNotRelease,
    /// Requested touches or samples exceed the fixed buffers
    CapacityExceeded,
    /// Hit acknowledged out of order
    OutOfOrderAcknowledgement,
    /// Switch is not part of the monitor's configured set
    UnrecognizedSwitch,
    /// The motion layer gave up
    MoveAborted(MotionFault),
}

impl From<EndstopError> for TouchError {
    fn from(e: EndstopError) -> Self {
        match e {
            EndstopError::OutOfOrderAcknowledgement => TouchError::OutOfOrderAcknowledgement,
            EndstopError::UnrecognizedSwitch => TouchError::UnrecognizedSwitch,
        }
    }
}

impl From<MotionFault> for TouchError {
    fn from(e: MotionFault) -> Self {
        TouchError::MoveAborted(e)
    }
}

impl fmt::Display for TouchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TouchError::SwitchDidNotTrigger => f.write_str("switch did not trigger"),
            TouchError::SwitchDidNotRelease => f.write_str("switch did not release"),
            TouchError::CapacityExceeded => f.write_str("too many touches requested"),
            TouchError::OutOfOrderAcknowledgement => {
                f.write_str("endstop hit acknowledged out of order")
            }
            TouchError::UnrecognizedSwitch => f.write_str("unrecognized endstop switch"),
            TouchError::MoveAborted(fault) => write!(f, "move aborted: {}", fault),
        }
    }
}
