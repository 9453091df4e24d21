use thiserror::Error;

/// Error type shared by every scheduler crate.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Invalid construction input. Fatal: the scheduler is never built.
    #[error("Invalid scheduler configuration: {0}")]
    Configuration(String),

    #[error("Progress must be a finite value in [0, 1), got {progress}")]
    ProgressOutOfRange { progress: f64 },

    #[error("Unknown scheduler: {0}")]
    UnknownScheduler(String),

    #[error("Malformed scheduler config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot read scheduler config: {0}")]
    Io(#[from] std::io::Error),
}

impl SchedulerError {
    pub fn config(msg: impl Into<String>) -> Self {
        SchedulerError::Configuration(msg.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SchedulerError::Configuration(_)
                | SchedulerError::UnknownScheduler(_)
                | SchedulerError::Json(_)
        )
    }
}

pub type SchedResult<T> = Result<T, SchedulerError>;
