//! Safety supervision
//!
//! Surfaces endstop hits that happened outside a measurement and keeps the
//! homed-axis state honest afterwards.

pub mod hits;
pub mod homing;
pub mod recovery;

pub use hits::{surface_unexpected_hits, HitSink};
pub use homing::HomingState;
pub use recovery::with_recovery;
