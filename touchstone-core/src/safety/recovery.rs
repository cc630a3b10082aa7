//! Failure recovery for calibration workflows

/// Run `op`, and run `recover` before handing back any error
///
/// Calibration sequences use this to put tool and homing state back into a
/// known state; the original error is returned unchanged.
pub fn with_recovery<T, E, R>(op: impl FnOnce() -> Result<T, E>, recover: R) -> Result<T, E>
where
    R: FnOnce(&E),
{
    let result = op();
    if let Err(e) = &result {
        recover(e);
    }
    result
}
