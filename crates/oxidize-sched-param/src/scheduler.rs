//! Closed-form parameter schedulers.
//!
//! Each one maps training progress in [0, 1) straight to a value, with no
//! internal counter to step.

use oxidize_sched_core::error::SchedResult;
use oxidize_sched_core::{check_progress, ParamScheduler};

/// Returns the same value for the whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantParamScheduler {
    pub value: f64,
}

impl ConstantParamScheduler {
    pub fn new(value: f64) -> Self {
        ConstantParamScheduler { value }
    }
}

impl ParamScheduler for ConstantParamScheduler {
    fn value_at(&self, progress: f64) -> SchedResult<f64> {
        check_progress(progress)?;
        Ok(self.value)
    }
}

/// Linear interpolation: value = end * p + start * (1 - p)
#[derive(Debug, Clone, PartialEq)]
pub struct LinearParamScheduler {
    pub start_value: f64,
    pub end_value: f64,
}

impl LinearParamScheduler {
    pub fn new(start_value: f64, end_value: f64) -> Self {
        LinearParamScheduler { start_value, end_value }
    }
}

impl ParamScheduler for LinearParamScheduler {
    fn value_at(&self, progress: f64) -> SchedResult<f64> {
        let p = check_progress(progress)?;
        Ok(self.end_value * p + self.start_value * (1.0 - p))
    }
}

/// Half-period cosine from `start_value` down (or up) to `end_value`.
///
/// value = end + 0.5 * (start - end) * (1 + cos(π * p))
#[derive(Debug, Clone, PartialEq)]
pub struct CosineParamScheduler {
    pub start_value: f64,
    pub end_value: f64,
}

impl CosineParamScheduler {
    pub fn new(start_value: f64, end_value: f64) -> Self {
        CosineParamScheduler { start_value, end_value }
    }
}

impl ParamScheduler for CosineParamScheduler {
    fn value_at(&self, progress: f64) -> SchedResult<f64> {
        let p = check_progress(progress)?;
        Ok(self.end_value
            + 0.5 * (self.start_value - self.end_value) * (1.0 + (std::f64::consts::PI * p).cos()))
    }
}

/// Polynomial decay: value = base * (1 - p)^power
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialDecayParamScheduler {
    pub base_value: f64,
    pub power: f64,
}

impl PolynomialDecayParamScheduler {
    pub fn new(base_value: f64, power: f64) -> Self {
        PolynomialDecayParamScheduler { base_value, power }
    }
}

impl ParamScheduler for PolynomialDecayParamScheduler {
    fn value_at(&self, progress: f64) -> SchedResult<f64> {
        let p = check_progress(progress)?;
        Ok(self.base_value * (1.0 - p).powf(self.power))
    }
}
