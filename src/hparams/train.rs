//! Training-loop settings layered over [`BasicHParams`].

use super::BasicHParams;
use crate::validate::{Validate, ValidationError, nonzero};
use crate::{EarlyStopping, L2Lambdas, LrSchedule, Optimizer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on training epochs; early stopping normally ends training
/// well before it.
pub const DEFAULT_TRAIN_EPOCH_TIMES: u32 = 1000;

/// Optimizer, schedule, regularisation and stopping policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainHParams {
    pub optimizer: Optimizer,
    pub lr_schedule: LrSchedule,
    pub l2: L2Lambdas,
    pub early_stop: EarlyStopping,
    pub train_epoch_times: u32,
    #[serde(flatten)]
    pub basic: BasicHParams,
}

impl Default for TrainHParams {
    fn default() -> Self {
        Self {
            optimizer: Optimizer::default(),
            lr_schedule: LrSchedule::Constant,
            l2: L2Lambdas::default(),
            early_stop: EarlyStopping::default(),
            train_epoch_times: DEFAULT_TRAIN_EPOCH_TIMES,
            basic: BasicHParams::default(),
        }
    }
}

impl Validate for TrainHParams {
    fn check(&self) -> Result<(), ValidationError> {
        self.optimizer.check()?;
        self.lr_schedule.check()?;
        self.l2.check()?;
        self.early_stop.check()?;
        nonzero("train_epoch_times", self.train_epoch_times)?;
        self.basic.check()
    }
}

impl fmt::Display for TrainHParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "optimizer: {}", self.optimizer)?;
        writeln!(f, "lr scheduler: {}", self.lr_schedule)?;
        writeln!(f)?;

        for (group, lambda) in self.l2.named() {
            writeln!(f, "{group} l2 lambda: {lambda}")?;
        }
        writeln!(f)?;

        let stop = &self.early_stop;
        writeln!(f, "early stop monitor: {}", stop.monitor)?;
        writeln!(f, "early stop mode: {}", stop.mode)?;
        writeln!(f, "early stop patience: {}", stop.patience)?;
        writeln!(f, "early stop min delta: {}", stop.min_delta)?;
        writeln!(f)?;

        writeln!(f, "train epoch times: {}", self.train_epoch_times)?;
        writeln!(f)?;
        write!(f, "{}", self.basic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Monitor, StopMode};
    use rstest::rstest;

    #[rstest]
    fn defaults_match_base_training_policy() {
        let hp = TrainHParams::default();
        assert_eq!(hp.optimizer, Optimizer::default());
        assert_eq!(hp.lr_schedule, LrSchedule::Constant);
        assert_eq!(hp.early_stop.monitor, Monitor::ValLoss);
        assert_eq!(hp.early_stop.mode, StopMode::Auto);
        assert_eq!(hp.early_stop.patience, 20);
        assert_eq!(hp.train_epoch_times, 1000);
        assert_eq!(hp.basic, BasicHParams::default());
    }

    #[rstest]
    fn rendering_ends_with_basic_section() {
        let rendered = TrainHParams::default().to_string();
        assert!(rendered.starts_with("optimizer: Adam("));
        assert!(rendered.contains("\nearly stop min delta: 0.0001\n\ntrain epoch times: 1000\n\n"));
        assert!(rendered.ends_with(&BasicHParams::default().to_string()));
    }

    #[rstest]
    fn basic_fields_flatten_into_json() {
        #[expect(clippy::expect_used, reason = "test should fail loudly")]
        let json = serde_json::to_value(TrainHParams::default()).expect("serialise hparams");
        assert_eq!(json["batch_size"], 32);
        assert_eq!(json["pad"], "pre");
        assert_eq!(json["optimizer"]["kind"], "adam");
    }

    #[rstest]
    fn zero_epochs_is_invalid() {
        let hp = TrainHParams {
            train_epoch_times: 0,
            ..TrainHParams::default()
        };
        assert_eq!(
            hp.check(),
            Err(ValidationError::Zero {
                field: "train_epoch_times"
            })
        );
    }
}
