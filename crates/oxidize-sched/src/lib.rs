//! # OxidizeSched
//!
//! Parameter schedules (learning rate, momentum, weight decay, ...) expressed
//! as pure functions of training progress in `[0, 1)`.
//!
//! ## Modules
//!
//! - **core** — `ParamScheduler` trait, `UpdateInterval`, `IntervalScaling`, errors
//! - **param** — Constant, Linear, Cosine, Polynomial, Step, MultiStep, StepWithFixedGamma, Composite
//! - **config** — JSON configuration and the name-keyed scheduler registry

/// Scheduler trait, cadence and error types.
pub use oxidize_sched_core as core;

/// Concrete schedulers.
pub use oxidize_sched_param as param;

/// Configuration and registry.
pub use oxidize_sched_config as config;

pub use oxidize_sched_config::{build_from_json, build_param_scheduler, SchedulerConfig};
pub use oxidize_sched_core::{
    IntervalScaling, ParamScheduler, SchedResult, SchedulerError, UpdateInterval,
};
pub use oxidize_sched_param::CompositeParamScheduler;
