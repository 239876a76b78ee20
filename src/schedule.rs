//! Learning-rate schedules.
//!
//! [`LrSchedule::Constant`] leaves the optimizer's rate untouched.
//! [`LrSchedule::Warmup`] is the per-step transformer schedule: the rate
//! grows linearly for `warmup_steps` steps and then decays with the inverse
//! square root of the step number.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Warmup length used by the transformer variants.
pub const DEFAULT_WARMUP_STEPS: u64 = 4000;

/// Learning-rate schedule applied per training step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LrSchedule {
    /// Keep the optimizer's learning rate.
    #[default]
    Constant,
    /// `d_model^-0.5 * min(step^-0.5, step * warmup_steps^-1.5)`.
    Warmup { d_model: usize, warmup_steps: u64 },
}

impl LrSchedule {
    /// Warmup schedule for a model of width `d_model`.
    #[must_use]
    pub const fn warmup(d_model: usize, warmup_steps: u64) -> Self {
        Self::Warmup {
            d_model,
            warmup_steps,
        }
    }

    /// Number of warmup steps, if the schedule has any.
    #[must_use]
    pub const fn warmup_steps(&self) -> Option<u64> {
        match *self {
            Self::Constant => None,
            Self::Warmup { warmup_steps, .. } => Some(warmup_steps),
        }
    }

    /// Learning rate for the 1-based training `step`.
    ///
    /// `base_lr` is returned unchanged by [`LrSchedule::Constant`]; the warmup
    /// schedule ignores it. Step zero yields a rate of zero under warmup.
    ///
    /// # Examples
    ///
    /// ```
    /// use net_hparams::LrSchedule;
    ///
    /// let schedule = LrSchedule::warmup(300, 4000);
    /// let early = schedule.rate_at(100, 0.001);
    /// let peak = schedule.rate_at(4000, 0.001);
    /// let late = schedule.rate_at(40_000, 0.001);
    /// assert!(early < peak && late < peak);
    /// ```
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "step counts stay well below 2^52")]
    #[expect(clippy::float_arithmetic, reason = "schedule formula")]
    pub fn rate_at(&self, step: u64, base_lr: f64) -> f64 {
        match *self {
            Self::Constant => base_lr,
            Self::Warmup {
                d_model,
                warmup_steps,
            } => {
                if step == 0 {
                    return 0.0;
                }
                let step = step as f64;
                let warm = step * (warmup_steps as f64).powf(-1.5);
                (d_model as f64).powf(-0.5) * step.powf(-0.5).min(warm)
            }
        }
    }
}

impl fmt::Display for LrSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant => f.write_str("constant"),
            Self::Warmup {
                d_model,
                warmup_steps,
            } => write!(f, "warmup(d_model={d_model}, warmup_steps={warmup_steps})"),
        }
    }
}
