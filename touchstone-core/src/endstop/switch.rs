//! Switch identities
//!
//! A [`SwitchId`] names one physical switch and records which end of which
//! axis it guards. Identities are fixed at construction time and compared by
//! value; the monitor maps each one to a filter slot.

use core::fmt;

use crate::motion::{Axis, Direction};

/// What a switch is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchKind {
    /// Hard travel limit at the end of an axis
    AxisLimit,
    /// Positioning or calibration aid (centering fixture, tool contact)
    Auxiliary,
}

/// Identity of one physical switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchId {
    /// Axis whose travel this switch bounds
    pub axis: Axis,
    /// Direction of travel that approaches the switch
    pub approach: Direction,
    /// Hard limit or auxiliary
    pub kind: SwitchKind,
    /// Name used in reports
    pub name: &'static str,
}

impl SwitchId {
    /// Describe a hard axis-limit switch
    pub const fn axis_limit(name: &'static str, axis: Axis, approach: Direction) -> Self {
        Self {
            axis,
            approach,
            kind: SwitchKind::AxisLimit,
            name,
        }
    }

    /// Describe an auxiliary positioning switch
    pub const fn auxiliary(name: &'static str, axis: Axis, approach: Direction) -> Self {
        Self {
            axis,
            approach,
            kind: SwitchKind::Auxiliary,
            name,
        }
    }

    /// Check if travel along `axis` in `direction` moves toward this switch
    pub fn blocks(&self, axis: Axis, direction: Direction) -> bool {
        self.axis == axis && self.approach == direction
    }

    /// Check if travel along `axis` in `direction` moves away from this switch
    pub fn recedes(&self, axis: Axis, direction: Direction) -> bool {
        self.axis == axis && self.approach != direction
    }

    /// Check if this is a hard axis limit
    pub fn is_axis_limit(&self) -> bool {
        self.kind == SwitchKind::AxisLimit
    }
}

impl fmt::Display for SwitchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
