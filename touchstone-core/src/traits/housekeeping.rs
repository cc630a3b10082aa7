//! Stay-alive hook for long waits

/// Periodic work that must keep running while a measurement blocks
///
/// Watchdog feeding and inactivity-timer refresh live behind this. Touch
/// measurements call [`service`](Housekeeping::service) between motion
/// increments.
pub trait Housekeeping {
    /// Run one round of periodic work
    fn service(&mut self);
}

/// No periodic work
impl Housekeeping for () {
    fn service(&mut self) {}
}

impl<H: Housekeeping + ?Sized> Housekeeping for &mut H {
    fn service(&mut self) {
        (**self).service();
    }
}
