pub mod composite;
pub mod scheduler;
pub mod step;

pub use composite::CompositeParamScheduler;
pub use scheduler::{
    ConstantParamScheduler, CosineParamScheduler, LinearParamScheduler,
    PolynomialDecayParamScheduler,
};
pub use step::{MultiStepParamScheduler, StepParamScheduler, StepWithFixedGammaParamScheduler};
