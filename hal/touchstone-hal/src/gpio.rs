//! GPIO input abstractions for limit switches
//!
//! Switches are wired either normally-open to ground with a pull-up (active
//! low) or through a pull-down (active high). [`SwitchPin`] hides that so
//! callers only ever ask "is the switch in contact".

/// Digital input pin
///
/// Implementations read the pin level straight from the port register.
/// Reads must be side-effect free and safe to call from interrupt context.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

impl<P: InputPin + ?Sized> InputPin for &P {
    fn is_high(&self) -> bool {
        (**self).is_high()
    }
}

/// Electrical level at which a switch reports contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Normally high, pulled low on contact
    #[default]
    Low,
    /// Normally low, driven high on contact
    High,
}

impl ActiveLevel {
    /// Translate an electrical level into a contact reading
    pub const fn is_active(self, level_high: bool) -> bool {
        match self {
            ActiveLevel::Low => !level_high,
            ActiveLevel::High => level_high,
        }
    }
}

/// A switch input with its active level applied
#[derive(Debug, Clone)]
pub struct SwitchPin<P> {
    pin: P,
    active: ActiveLevel,
}

impl<P: InputPin> SwitchPin<P> {
    /// Wrap a pin with the given active level
    pub const fn new(pin: P, active: ActiveLevel) -> Self {
        Self { pin, active }
    }

    /// Wrap a pin that is pulled low on contact
    pub const fn active_low(pin: P) -> Self {
        Self::new(pin, ActiveLevel::Low)
    }

    /// Wrap a pin that is driven high on contact
    pub const fn active_high(pin: P) -> Self {
        Self::new(pin, ActiveLevel::High)
    }

    /// Check if the switch is currently in contact (raw, undebounced)
    pub fn is_contact(&self) -> bool {
        self.active.is_active(self.pin.is_high())
    }

    /// Configured active level
    pub fn active_level(&self) -> ActiveLevel {
        self.active
    }

    /// Release the underlying pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}
