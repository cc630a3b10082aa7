//! Scoped enable/disable guards
//!
//! Calibration sequences nest these: "disable the tool contact while probing
//! the z limit, unless an outer scope already disabled it". Each guard only
//! undoes a change it made itself, so an inner guard never re-enables a
//! switch an outer scope deliberately suppressed.

use super::monitor::EndstopMonitor;
use super::switch::SwitchId;

/// Un-ignores a switch for the guard's lifetime
#[must_use = "the switch is re-ignored when the guard is dropped"]
pub struct EnableGuard<'a, const N: usize> {
    monitor: &'a EndstopMonitor<N>,
    restore: Option<SwitchId>,
}

impl<'a, const N: usize> EnableGuard<'a, N> {
    /// Stop ignoring `switch`; a no-op if it is already enabled
    pub fn new(monitor: &'a EndstopMonitor<N>, switch: SwitchId) -> Self {
        let changed = monitor.swap_ignore(switch, false) == Some(true);
        Self {
            monitor,
            restore: changed.then_some(switch),
        }
    }

    /// Check if this guard performed the toggle
    pub fn changed(&self) -> bool {
        self.restore.is_some()
    }
}

impl<const N: usize> Drop for EnableGuard<'_, N> {
    fn drop(&mut self) {
        if let Some(switch) = self.restore.take() {
            self.monitor.ignore(switch, true);
        }
    }
}

/// Ignores a switch for the guard's lifetime
#[must_use = "the switch is re-enabled when the guard is dropped"]
pub struct DisableGuard<'a, const N: usize> {
    monitor: &'a EndstopMonitor<N>,
    restore: Option<SwitchId>,
}

impl<'a, const N: usize> DisableGuard<'a, N> {
    /// Ignore `switch`; a no-op if it is already ignored
    pub fn new(monitor: &'a EndstopMonitor<N>, switch: SwitchId) -> Self {
        Self::maybe(monitor, Some(switch))
    }

    /// Ignore `switch` if there is one
    pub fn maybe(monitor: &'a EndstopMonitor<N>, switch: Option<SwitchId>) -> Self {
        let restore = switch.filter(|&s| monitor.swap_ignore(s, true) == Some(false));
        Self { monitor, restore }
    }

    /// Check if this guard performed the toggle
    pub fn changed(&self) -> bool {
        self.restore.is_some()
    }
}

impl<const N: usize> Drop for DisableGuard<'_, N> {
    fn drop(&mut self) {
        if let Some(switch) = self.restore.take() {
            self.monitor.ignore(switch, false);
        }
    }
}
