//! Endstop monitoring
//!
//! Debounces limit-switch samples from the step interrupt, records hits for
//! deferred reporting and offers scoped suppression for calibration.

pub mod debounce;
pub mod error;
pub mod guard;
pub mod log;
pub mod monitor;
pub mod pins;
pub mod switch;

pub use debounce::{DebounceFilter, DEFAULT_TRIGGER_THRESHOLD};
pub use error::EndstopError;
pub use guard::{DisableGuard, EnableGuard};
pub use log::{TriggerEvent, TriggerEventLog, DEFAULT_LOG_CAPACITY};
pub use monitor::{ApproachState, EndstopMonitor, SwitchStatus, LOG_CAPACITY};
pub use pins::PinBank;
pub use switch::{SwitchId, SwitchKind};
