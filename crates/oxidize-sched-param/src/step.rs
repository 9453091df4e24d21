use oxidize_sched_core::error::{SchedResult, SchedulerError};
use oxidize_sched_core::{check_progress, ParamScheduler, WHERE_EPSILON};
use tracing::debug;

/// Piecewise-constant schedule with equally sized steps.
///
/// With `values = [0.1, 0.01]` the value is 0.1 for the first half of
/// training and 0.01 for the second half.
#[derive(Debug, Clone, PartialEq)]
pub struct StepParamScheduler {
    num_updates: usize,
    values: Vec<f64>,
}

impl StepParamScheduler {
    pub fn new(num_updates: usize, values: Vec<f64>) -> SchedResult<Self> {
        if num_updates == 0 {
            return Err(SchedulerError::config("step scheduler: num_updates must be larger than 0"));
        }
        if values.is_empty() {
            return Err(SchedulerError::config("step scheduler: values must be a non-empty list"));
        }
        Ok(StepParamScheduler { num_updates, values })
    }

    pub fn num_updates(&self) -> usize {
        self.num_updates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl ParamScheduler for StepParamScheduler {
    fn value_at(&self, progress: f64) -> SchedResult<f64> {
        let p = check_progress(progress)?;
        let idx = ((p + WHERE_EPSILON) * self.values.len() as f64) as usize;
        Ok(self.values[idx.min(self.values.len() - 1)])
    }
}

/// Piecewise-constant schedule that switches value at given update milestones.
///
/// `values[0]` holds until `milestones[0]`, `values[1]` until `milestones[1]`,
/// and so on. Without explicit milestones, the steps are equally wide.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiStepParamScheduler {
    values: Vec<f64>,
    num_updates: usize,
    milestones: Vec<usize>,
}

impl MultiStepParamScheduler {
    pub fn new(
        values: Vec<f64>,
        num_updates: usize,
        milestones: Option<Vec<usize>>,
    ) -> SchedResult<Self> {
        if values.is_empty() {
            return Err(SchedulerError::config("multistep scheduler: values must be a non-empty list"));
        }
        if num_updates == 0 {
            return Err(SchedulerError::config(
                "multistep scheduler: num_updates must be larger than 0",
            ));
        }

        let milestones = match milestones {
            Some(m) => {
                if m.len() != values.len() - 1 {
                    return Err(SchedulerError::config(format!(
                        "multistep scheduler: expected {} milestones for {} values, got {}",
                        values.len() - 1,
                        values.len(),
                        m.len()
                    )));
                }
                m
            }
            None => {
                let step_width = num_updates.div_ceil(values.len());
                (1..values.len()).map(|i| step_width * i).collect()
            }
        };

        let mut start = 0;
        for &milestone in &milestones {
            if milestone >= num_updates {
                return Err(SchedulerError::config(format!(
                    "multistep scheduler: milestone {} must be smaller than num_updates {}",
                    milestone, num_updates
                )));
            }
            if milestone <= start {
                return Err(SchedulerError::config(format!(
                    "multistep scheduler: milestones must be strictly increasing and positive, got {:?}",
                    milestones
                )));
            }
            start = milestone;
        }

        debug!(?milestones, num_updates, "built multistep scheduler");
        Ok(MultiStepParamScheduler { values, num_updates, milestones })
    }

    pub fn milestones(&self) -> &[usize] {
        &self.milestones
    }

    pub fn num_updates(&self) -> usize {
        self.num_updates
    }
}

impl ParamScheduler for MultiStepParamScheduler {
    fn value_at(&self, progress: f64) -> SchedResult<f64> {
        let p = check_progress(progress)?;
        let update = ((p + WHERE_EPSILON) * self.num_updates as f64) as usize;
        // bisect right: number of milestones already reached
        let idx = self.milestones.partition_point(|&m| m <= update);
        Ok(self.values[idx])
    }
}

/// Decays `base_value` by `gamma` at `num_decays` equally spaced milestones.
#[derive(Debug, Clone, PartialEq)]
pub struct StepWithFixedGammaParamScheduler {
    inner: MultiStepParamScheduler,
}

impl StepWithFixedGammaParamScheduler {
    pub fn new(base_value: f64, num_decays: usize, gamma: f64, num_updates: usize) -> SchedResult<Self> {
        if !base_value.is_finite() || base_value <= 0.0 {
            return Err(SchedulerError::config("step_with_fixed_gamma: base_value must be positive"));
        }
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(SchedulerError::config("step_with_fixed_gamma: gamma must be positive"));
        }
        if num_decays == 0 {
            return Err(SchedulerError::config("step_with_fixed_gamma: num_decays must be positive"));
        }
        if num_updates == 0 {
            return Err(SchedulerError::config("step_with_fixed_gamma: num_updates must be positive"));
        }

        let values = (0..=num_decays).map(|i| base_value * gamma.powi(i as i32)).collect();
        let inner = MultiStepParamScheduler::new(values, num_updates, None)?;
        Ok(StepWithFixedGammaParamScheduler { inner })
    }

    pub fn milestones(&self) -> &[usize] {
        self.inner.milestones()
    }
}

impl ParamScheduler for StepWithFixedGammaParamScheduler {
    fn value_at(&self, progress: f64) -> SchedResult<f64> {
        self.inner.value_at(progress)
    }
}
