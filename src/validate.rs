//! Range checks shared by every hyperparameter set.
//!
//! Defaults always pass; the checks exist for values layered in from files
//! and the environment.

use crate::{EarlyStopping, L2Lambdas, LrSchedule, Optimizer};
use thiserror::Error;

/// A hyperparameter outside its admissible range.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be greater than 0")]
    Zero { field: &'static str },
    #[error("{field} must lie in [0, 1) but was {value}")]
    OutsideUnitInterval { field: &'static str, value: f64 },
    #[error("{field} must be finite and non-negative but was {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be finite and positive but was {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("d_model {d_model} is not divisible by n_head {n_head}")]
    HeadsDoNotDivide { d_model: usize, n_head: usize },
    #[error("lr_schedule.d_model {schedule} does not match d_model {d_model}")]
    ScheduleWidthMismatch { d_model: usize, schedule: usize },
}

/// Types whose fields can be range-checked.
pub trait Validate: Sized {
    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    fn check(&self) -> Result<(), ValidationError>;

    /// Ensure the values are within acceptable bounds.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    #[must_use = "Validation should not be ignored"]
    fn validate(self) -> Result<Self, ValidationError> {
        self.check()?;
        Ok(self)
    }
}

pub(crate) fn nonzero<T: PartialEq + Default>(
    field: &'static str,
    value: T,
) -> Result<(), ValidationError> {
    if value == T::default() {
        Err(ValidationError::Zero { field })
    } else {
        Ok(())
    }
}

pub(crate) fn unit_interval(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutsideUnitInterval { field, value })
    }
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::Negative { field, value })
    }
}

pub(crate) fn positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive { field, value })
    }
}

pub(crate) fn heads_divide(d_model: usize, n_head: usize) -> Result<(), ValidationError> {
    nonzero("n_head", n_head)?;
    if d_model % n_head == 0 {
        Ok(())
    } else {
        Err(ValidationError::HeadsDoNotDivide { d_model, n_head })
    }
}

/// A warmup schedule must be sized for the model it drives.
pub(crate) fn schedule_matches(d_model: usize, schedule: &LrSchedule) -> Result<(), ValidationError> {
    match *schedule {
        LrSchedule::Warmup {
            d_model: schedule, ..
        } if schedule != d_model => Err(ValidationError::ScheduleWidthMismatch { d_model, schedule }),
        _ => Ok(()),
    }
}

impl Validate for Optimizer {
    fn check(&self) -> Result<(), ValidationError> {
        match *self {
            Self::Adam {
                lr,
                beta_1,
                beta_2,
                epsilon,
                decay,
                ..
            } => {
                positive("optimizer.lr", lr)?;
                unit_interval("optimizer.beta_1", beta_1)?;
                unit_interval("optimizer.beta_2", beta_2)?;
                positive("optimizer.epsilon", epsilon)?;
                non_negative("optimizer.decay", decay)
            }
            Self::RmsProp {
                lr,
                rho,
                epsilon,
                decay,
            } => {
                positive("optimizer.lr", lr)?;
                unit_interval("optimizer.rho", rho)?;
                positive("optimizer.epsilon", epsilon)?;
                non_negative("optimizer.decay", decay)
            }
        }
    }
}

impl Validate for LrSchedule {
    fn check(&self) -> Result<(), ValidationError> {
        match *self {
            Self::Constant => Ok(()),
            Self::Warmup {
                d_model,
                warmup_steps,
            } => {
                nonzero("lr_schedule.d_model", d_model)?;
                nonzero("lr_schedule.warmup_steps", warmup_steps)
            }
        }
    }
}

impl Validate for L2Lambdas {
    fn check(&self) -> Result<(), ValidationError> {
        non_negative("l2.kernel", self.kernel)?;
        non_negative("l2.recurrent", self.recurrent)?;
        non_negative("l2.bias", self.bias)?;
        non_negative("l2.activity", self.activity)
    }
}

impl Validate for EarlyStopping {
    fn check(&self) -> Result<(), ValidationError> {
        non_negative("early_stop.min_delta", self.min_delta)
    }
}
