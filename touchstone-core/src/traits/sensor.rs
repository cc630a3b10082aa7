//! Raw switch reads

use crate::endstop::SwitchId;

/// Source of raw, undebounced switch readings
///
/// Reads must be cheap and side-effect free on the hardware side; the
/// monitor calls this from the step interrupt.
pub trait SwitchSensor {
    /// Check if `switch` currently reads as in contact
    fn is_contact(&self, switch: SwitchId) -> bool;
}

impl<T: SwitchSensor + ?Sized> SwitchSensor for &T {
    fn is_contact(&self, switch: SwitchId) -> bool {
        (**self).is_contact(switch)
    }
}
