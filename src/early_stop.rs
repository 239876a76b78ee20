//! Early-stopping policy and the tracker that applies it.
//!
//! A policy names the metric to watch, the direction in which it should
//! move, how many evaluation rounds to wait without improvement and the
//! smallest change that counts as an improvement. [`EarlyStopTracker`] feeds
//! evaluation results through that policy and reports when training should
//! halt.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Patience applied when a configuration does not override it.
pub const DEFAULT_PATIENCE: u32 = 20;

/// Minimum change treated as an improvement by default.
pub const DEFAULT_MIN_DELTA: f64 = 1e-4;

/// Metric watched by the early-stopping policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Monitor {
    #[default]
    ValLoss,
    ValAcc,
    Loss,
    Acc,
}

impl Monitor {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValLoss => "val_loss",
            Self::ValAcc => "val_acc",
            Self::Loss => "loss",
            Self::Acc => "acc",
        }
    }

    /// Whether the metric is an accuracy, which improves upwards.
    #[must_use]
    pub const fn is_accuracy(self) -> bool {
        matches!(self, Self::ValAcc | Self::Acc)
    }
}

impl fmt::Display for Monitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known metric.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown monitor \"{0}\"")]
pub struct ParseMonitorError(pub String);

impl FromStr for Monitor {
    type Err = ParseMonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "val_loss" => Ok(Self::ValLoss),
            "val_acc" => Ok(Self::ValAcc),
            "loss" => Ok(Self::Loss),
            "acc" => Ok(Self::Acc),
            _ => Err(ParseMonitorError(s.to_owned())),
        }
    }
}

/// Direction in which the monitored metric should move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopMode {
    /// Infer the direction from the metric name.
    #[default]
    Auto,
    Min,
    Max,
}

impl StopMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Min => "min",
            Self::Max => "max",
        }
    }

    /// Concrete direction for `monitor`.
    #[must_use]
    pub const fn resolve(self, monitor: Monitor) -> Direction {
        match self {
            Self::Min => Direction::Minimize,
            Self::Max => Direction::Maximize,
            Self::Auto if monitor.is_accuracy() => Direction::Maximize,
            Self::Auto => Direction::Minimize,
        }
    }
}

impl fmt::Display for StopMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not `auto`, `min` or `max`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown stop mode \"{0}\"")]
pub struct ParseStopModeError(pub String);

impl FromStr for StopMode {
    type Err = ParseStopModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "auto" => Ok(Self::Auto),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            _ => Err(ParseStopModeError(s.to_owned())),
        }
    }
}

/// Resolved optimisation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Minimize,
    Maximize,
}

/// Early-stopping policy.
///
/// # Examples
///
/// ```
/// use net_hparams::{Direction, EarlyStopping, Monitor};
///
/// let policy = EarlyStopping { monitor: Monitor::ValAcc, ..EarlyStopping::default() };
/// assert_eq!(policy.direction(), Direction::Maximize);
/// assert!(policy.is_improvement(0.91, 0.90));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EarlyStopping {
    pub monitor: Monitor,
    pub mode: StopMode,
    /// Evaluation rounds without improvement tolerated before stopping.
    pub patience: u32,
    /// Smallest change in the monitored value that counts as improvement.
    pub min_delta: f64,
}

impl Default for EarlyStopping {
    fn default() -> Self {
        Self {
            monitor: Monitor::default(),
            mode: StopMode::default(),
            patience: DEFAULT_PATIENCE,
            min_delta: DEFAULT_MIN_DELTA,
        }
    }
}

impl EarlyStopping {
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.mode.resolve(self.monitor)
    }

    /// Whether `current` beats `best` by more than `min_delta`.
    ///
    /// NaN never counts as an improvement.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "delta comparison")]
    pub fn is_improvement(&self, current: f64, best: f64) -> bool {
        match self.direction() {
            Direction::Minimize => current + self.min_delta < best,
            Direction::Maximize => current - self.min_delta > best,
        }
    }

    /// Fresh tracker applying this policy.
    #[must_use]
    pub fn tracker(&self) -> EarlyStopTracker {
        EarlyStopTracker::new(self.clone())
    }
}

/// Outcome of feeding one evaluation result to an [`EarlyStopTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopDecision {
    /// The value is the new best.
    Improved,
    /// No improvement for `rounds` consecutive evaluations.
    Waiting { rounds: u32 },
    /// Patience is exhausted.
    Stop,
}

/// Stateful application of an [`EarlyStopping`] policy.
#[derive(Debug, Clone)]
pub struct EarlyStopTracker {
    policy: EarlyStopping,
    best: Option<f64>,
    wait: u32,
    stopped: bool,
}

impl EarlyStopTracker {
    #[must_use]
    pub const fn new(policy: EarlyStopping) -> Self {
        Self {
            policy,
            best: None,
            wait: 0,
            stopped: false,
        }
    }

    /// Best value seen so far.
    #[must_use]
    pub const fn best(&self) -> Option<f64> {
        self.best
    }

    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Record the monitored value from one evaluation round.
    ///
    /// Only finite values can become the best; NaN and infinities count as
    /// rounds without improvement.
    pub fn observe(&mut self, value: f64) -> StopDecision {
        if self.stopped {
            return StopDecision::Stop;
        }
        let improved = value.is_finite()
            && self
                .best
                .is_none_or(|best| self.policy.is_improvement(value, best));
        if improved {
            self.best = Some(value);
            self.wait = 0;
            return StopDecision::Improved;
        }
        self.wait = self.wait.saturating_add(1);
        if self.wait >= self.policy.patience {
            self.stopped = true;
            StopDecision::Stop
        } else {
            StopDecision::Waiting { rounds: self.wait }
        }
    }
}
