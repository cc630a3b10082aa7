//! Configuration types
//!
//! Tuning parameters for the monitor and the touch measurements. An external
//! loader deserializes these once at startup (with the `serde` feature) and
//! passes them in as immutable construction parameters.

pub mod types;

pub use types::*;
