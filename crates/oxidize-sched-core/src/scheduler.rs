use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SchedResult, SchedulerError};

/// A parameter schedule: a pure function of training progress.
///
/// `progress` is the fraction of training completed, in `[0, 1)`.
/// Implementations must not mutate themselves while evaluating, which is
/// what lets one scheduler be shared across threads or nested inside another.
pub trait ParamScheduler: fmt::Debug + Send + Sync {
    /// Parameter value at `progress`.
    fn value_at(&self, progress: f64) -> SchedResult<f64>;

    /// How often the training loop should advance progress for this scheduler.
    fn update_interval(&self) -> UpdateInterval {
        UpdateInterval::Step
    }
}

impl<S: ParamScheduler + ?Sized> ParamScheduler for Box<S> {
    fn value_at(&self, progress: f64) -> SchedResult<f64> {
        (**self).value_at(progress)
    }

    fn update_interval(&self) -> UpdateInterval {
        (**self).update_interval()
    }
}

/// Update cadence. Stored as metadata, never used during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateInterval {
    #[default]
    Step,
    Epoch,
}

impl FromStr for UpdateInterval {
    type Err = SchedulerError;

    fn from_str(s: &str) -> SchedResult<Self> {
        match s {
            "step" => Ok(UpdateInterval::Step),
            "epoch" => Ok(UpdateInterval::Epoch),
            other => Err(SchedulerError::config(format!(
                "update interval must be 'step' or 'epoch', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for UpdateInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateInterval::Step => f.pad("step"),
            UpdateInterval::Epoch => f.pad("epoch"),
        }
    }
}

/// How a composite maps global progress into one segment's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalScaling {
    /// Remap the segment span onto `[0, 1)`.
    #[default]
    Rescaled,
    /// Pass global progress through untouched.
    Fixed,
}

impl FromStr for IntervalScaling {
    type Err = SchedulerError;

    fn from_str(s: &str) -> SchedResult<Self> {
        match s {
            "rescaled" => Ok(IntervalScaling::Rescaled),
            "fixed" => Ok(IntervalScaling::Fixed),
            other => Err(SchedulerError::config(format!(
                "interval scaling must be 'fixed' or 'rescaled', got '{}'",
                other
            ))),
        }
    }
}
