//! Collaborator traits
//!
//! These traits define the interface between the endstop core and the rest
//! of the firmware: the stepper layer that moves, the pin layer that reads
//! raw switch levels and the compensation layer that converts steps to
//! positions.

pub mod compensation;
pub mod housekeeping;
pub mod motion;
pub mod sensor;

pub use compensation::{Compensation, LinearScale};
pub use housekeeping::Housekeeping;
pub use motion::{MotionFault, MoveEnd, Mover};
pub use sensor::SwitchSensor;
