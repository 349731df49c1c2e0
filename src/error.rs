//! Scheduler error types
//!
//! Every rating/status combination is handled, so the only failures are
//! malformed records or settings handed in by the host. Those are rejected
//! up front instead of feeding garbage into the interval math.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchedulerError {
    #[error("learning steps must not be empty")]
    EmptyLearningSteps,

    #[error("step index {index} out of range for {steps} learning steps")]
    StepOutOfRange { index: usize, steps: usize },

    #[error("negative interval: {0}")]
    NegativeInterval(i32),

    #[error("invalid ease factor: {0}")]
    InvalidEaseFactor(f64),

    #[error("interval multiplier {0} must be at least 1")]
    MultiplierTooSmall(f64),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
