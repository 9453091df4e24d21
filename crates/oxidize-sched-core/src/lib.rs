pub mod error;
pub mod progress;
pub mod scheduler;

pub use error::{SchedResult, SchedulerError};
pub use progress::{check_progress, clamp_progress, MAX_PROGRESS, WHERE_EPSILON};
pub use scheduler::{IntervalScaling, ParamScheduler, UpdateInterval};
