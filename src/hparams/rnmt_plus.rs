//! RNMT+ style recurrent encoder followed by a dense head.

use super::{BasicHParams, DenseHead, TrainHParams, write_adam_moments, write_banner};
use crate::validate::{Validate, ValidationError, nonzero, unit_interval};
use crate::{EarlyStopping, L2Lambdas, LrSchedule, Monitor, Optimizer, SequencePolicy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Encoder depth and state width follow [`super::StackedBiLstmDenseHParams`];
/// the optimizer and L2 penalties follow the RNMT+ paper. Layer
/// normalisation in the encoder already regularises, so dropout is lower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", default)]
pub struct RnmtPlusEncoderBiLstmDenseHParams {
    pub retseq_layer_num: usize,
    pub state_dim: usize,
    pub lstm_dropout: f64,
    #[serde(flatten)]
    pub head: DenseHead,
    #[serde(flatten)]
    pub train: TrainHParams,
}

seeded_serde!(RnmtPlusEncoderBiLstmDenseHParams);

impl RnmtPlusEncoderBiLstmDenseHParams {
    pub const CLASS_NAME: &'static str = "RNMTPlusEncoderBiLSTMDenseHParams";
}

impl Default for RnmtPlusEncoderBiLstmDenseHParams {
    fn default() -> Self {
        let state_dim = 300;
        let lstm_dropout = 0.3;
        Self {
            retseq_layer_num: 2,
            state_dim,
            lstm_dropout,
            head: DenseHead::single(state_dim, lstm_dropout),
            train: TrainHParams {
                optimizer: Optimizer::adam(0.001, 0.9, 0.999, 1e-6),
                // TODO: switch to the RNMT+ warmup-then-decay schedule once
                // LrSchedule has a variant for it.
                lr_schedule: LrSchedule::Constant,
                l2: L2Lambdas::weights_only(1e-5),
                early_stop: EarlyStopping {
                    monitor: Monitor::ValAcc,
                    ..EarlyStopping::default()
                },
                basic: BasicHParams::with_policy(SequencePolicy::Pre, 128),
                ..TrainHParams::default()
            },
        }
    }
}

impl Validate for RnmtPlusEncoderBiLstmDenseHParams {
    fn check(&self) -> Result<(), ValidationError> {
        nonzero("retseq_layer_num", self.retseq_layer_num)?;
        nonzero("state_dim", self.state_dim)?;
        unit_interval("lstm_dropout", self.lstm_dropout)?;
        self.head.check()?;
        self.train.check()
    }
}

impl fmt::Display for RnmtPlusEncoderBiLstmDenseHParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_banner(f, Self::CLASS_NAME)?;
        writeln!(f, "ret seq layer num: {}", self.retseq_layer_num)?;
        writeln!(f, "state dim: {}", self.state_dim)?;
        writeln!(f, "lstm dropout proba: {}", self.lstm_dropout)?;
        writeln!(f)?;
        write!(f, "{}", self.head)?;
        write_adam_moments(f, &self.train.optimizer)?;
        write!(f, "{}", self.train)
    }
}
