//! Touch measurements
//!
//! Single touches, repeated touches with early-exit stability checks, and
//! the averaging utilities they share.

pub mod error;
pub mod multi;
pub mod stats;
pub mod touch;

pub use error::TouchError;
pub use multi::{MultiMultiTouchResult, MultiTouchResult};
pub use stats::{average, filtered_average, trailing_stability_check, FilteredMean};
pub use touch::{TouchProbe, TouchResult};
