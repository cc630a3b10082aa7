//! Touchstone Hardware Abstraction Layer
//!
//! This crate defines the pin-level traits that chip-specific HALs implement
//! so the endstop core never touches registers directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  touchstone-core (monitor, touch)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  touchstone-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            chip-specific GPIO HAL
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Raw digital input
//! - [`gpio::SwitchPin`] - Input with the switch's active level applied

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;

pub use gpio::{ActiveLevel, InputPin, SwitchPin};
