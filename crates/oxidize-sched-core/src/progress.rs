use crate::error::{SchedResult, SchedulerError};

/// Tie-break tolerance used when a progress value sits on a boundary.
///
/// Adding it before comparing against a boundary assigns a value exactly on
/// the boundary (or a hair below it, after float summation) to the later
/// segment or step.
pub const WHERE_EPSILON: f64 = 1e-6;

/// Largest `f64` strictly below 1.0.
pub const MAX_PROGRESS: f64 = 1.0 - f64::EPSILON / 2.0;

/// Validate that `progress` is a finite fraction in `[0, 1)`.
pub fn check_progress(progress: f64) -> SchedResult<f64> {
    if progress.is_finite() && (0.0..1.0).contains(&progress) {
        Ok(progress)
    } else {
        Err(SchedulerError::ProgressOutOfRange { progress })
    }
}

/// Clamp a progress value into `[0, MAX_PROGRESS]`.
pub fn clamp_progress(progress: f64) -> f64 {
    progress.clamp(0.0, MAX_PROGRESS)
}
