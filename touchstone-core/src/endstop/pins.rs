//! Switch-to-pin wiring
//!
//! Binds each [`SwitchId`] to the input it is wired to, so real hardware can
//! serve as the monitor's [`SwitchSensor`].

use touchstone_hal::{InputPin, SwitchPin};

use super::switch::SwitchId;
use crate::traits::SwitchSensor;

/// Fixed table of switch inputs
pub struct PinBank<P, const N: usize> {
    entries: [(SwitchId, SwitchPin<P>); N],
}

impl<P: InputPin, const N: usize> PinBank<P, N> {
    /// Build the table from `(switch, pin)` pairs
    pub const fn new(entries: [(SwitchId, SwitchPin<P>); N]) -> Self {
        Self { entries }
    }

    /// Input wired to `switch`
    pub fn pin(&self, switch: SwitchId) -> Option<&SwitchPin<P>> {
        self.entries
            .iter()
            .find(|(id, _)| *id == switch)
            .map(|(_, pin)| pin)
    }
}

impl<P: InputPin, const N: usize> SwitchSensor for PinBank<P, N> {
    /// Raw contact reading; a switch with no wired input reads as contact
    fn is_contact(&self, switch: SwitchId) -> bool {
        self.pin(switch).map_or(true, SwitchPin::is_contact)
    }
}
