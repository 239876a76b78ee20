//! Averaged word vectors followed by a dense stack.

use super::{TrainHParams, write_banner};
use crate::validate::{Validate, ValidationError, nonzero, unit_interval};
use crate::{LrSchedule, Optimizer};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", default)]
pub struct AvgSeqDenseHParams {
    pub dense_layer_num: usize,
    pub linear_unit_num: usize,
    pub dropout: f64,
    #[serde(flatten)]
    pub train: TrainHParams,
}

seeded_serde!(AvgSeqDenseHParams);

impl AvgSeqDenseHParams {
    pub const CLASS_NAME: &'static str = "AvgSeqDenseHParams";
}

impl Default for AvgSeqDenseHParams {
    fn default() -> Self {
        Self {
            dense_layer_num: 3,
            linear_unit_num: 64,
            dropout: 0.5,
            train: TrainHParams {
                optimizer: Optimizer::rmsprop(),
                lr_schedule: LrSchedule::Constant,
                ..TrainHParams::default()
            },
        }
    }
}

impl Validate for AvgSeqDenseHParams {
    fn check(&self) -> Result<(), ValidationError> {
        nonzero("dense_layer_num", self.dense_layer_num)?;
        nonzero("linear_unit_num", self.linear_unit_num)?;
        unit_interval("dropout", self.dropout)?;
        self.train.check()
    }
}

impl fmt::Display for AvgSeqDenseHParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_banner(f, Self::CLASS_NAME)?;
        writeln!(f, "dense layer num: {}", self.dense_layer_num)?;
        writeln!(f, "linear unit num: {}", self.linear_unit_num)?;
        writeln!(f)?;
        writeln!(f, "dropout probability: {}", self.dropout)?;
        writeln!(f)?;
        write!(f, "{}", self.train)
    }
}
