use oxidize_sched_core::error::{SchedResult, SchedulerError};
use oxidize_sched_core::ParamScheduler;
use oxidize_sched_param::{
    CompositeParamScheduler, ConstantParamScheduler, CosineParamScheduler, LinearParamScheduler,
    MultiStepParamScheduler, PolynomialDecayParamScheduler, StepParamScheduler,
    StepWithFixedGammaParamScheduler,
};
use tracing::debug;

use crate::config::{CompositeConfig, SchedulerConfig};
use crate::io::from_json_str;

/// Build a scheduler from its configuration.
pub fn build_param_scheduler(config: &SchedulerConfig) -> SchedResult<Box<dyn ParamScheduler>> {
    debug!(name = config.name(), "building param scheduler");

    let scheduler: Box<dyn ParamScheduler> = match config {
        SchedulerConfig::Constant { value } => Box::new(ConstantParamScheduler::new(*value)),
        SchedulerConfig::Linear { start_value, end_value } => {
            Box::new(LinearParamScheduler::new(*start_value, *end_value))
        }
        SchedulerConfig::Cosine { start_value, end_value } => {
            Box::new(CosineParamScheduler::new(*start_value, *end_value))
        }
        SchedulerConfig::Polynomial { base_value, power } => {
            Box::new(PolynomialDecayParamScheduler::new(*base_value, *power))
        }
        SchedulerConfig::Step { num_epochs, values } => Box::new(StepParamScheduler::new(
            require_epochs("step", *num_epochs)?,
            values.clone(),
        )?),
        SchedulerConfig::MultiStep { num_epochs, values, milestones } => {
            Box::new(MultiStepParamScheduler::new(
                values.clone(),
                require_epochs("multistep", *num_epochs)?,
                milestones.clone(),
            )?)
        }
        SchedulerConfig::StepWithFixedGamma { base_value, num_decays, gamma, num_epochs } => {
            Box::new(StepWithFixedGammaParamScheduler::new(
                *base_value,
                *num_decays,
                *gamma,
                require_epochs("step_with_fixed_gamma", *num_epochs)?,
            )?)
        }
        SchedulerConfig::Composite(composite) => Box::new(build_composite(composite)?),
    };
    Ok(scheduler)
}

/// Parse JSON text and build the scheduler it describes.
pub fn build_from_json(json: &str) -> SchedResult<Box<dyn ParamScheduler>> {
    build_param_scheduler(&from_json_str(json)?)
}

fn build_composite(config: &CompositeConfig) -> SchedResult<CompositeParamScheduler> {
    if config.schedulers.len() != config.lengths.len() {
        return Err(SchedulerError::config("schedulers and lengths must be same length"));
    }
    if let Some(scaling) = &config.interval_scaling {
        if scaling.len() != config.schedulers.len() {
            return Err(SchedulerError::config(
                "schedulers and interval scaling must be the same length",
            ));
        }
    }

    let schedulers = config
        .resolved_schedulers()
        .iter()
        .map(build_param_scheduler)
        .collect::<SchedResult<Vec<_>>>()?;

    CompositeParamScheduler::new(
        schedulers,
        config.lengths.clone(),
        config.update_interval,
        config.resolved_interval_scaling(),
    )
}

fn require_epochs(name: &str, num_epochs: Option<usize>) -> SchedResult<usize> {
    num_epochs.ok_or_else(|| {
        SchedulerError::config(format!(
            "{} scheduler requires num_epochs, set it directly or on an enclosing composite",
            name
        ))
    })
}
