//! Stacked bidirectional LSTMs followed by a dense head.
//!
//! The defaults reached about 90.1% validation accuracy. More recurrent
//! layers or a wider state overfit; dropout of 0.4 to 0.5 works best before
//! too much information is lost.

use super::{BasicHParams, DenseHead, TrainHParams, write_banner};
use crate::validate::{Validate, ValidationError, nonzero, unit_interval};
use crate::{EarlyStopping, L2Lambdas, Monitor, Optimizer, SequencePolicy};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", default)]
pub struct StackedBiLstmDenseHParams {
    /// Bidirectional layers that return full sequences.
    pub bilstm_retseq_layer_num: usize,
    /// LSTM state width; proportional to the word vector width.
    pub state_dim: usize,
    pub lstm_dropout: f64,
    #[serde(flatten)]
    pub head: DenseHead,
    #[serde(flatten)]
    pub train: TrainHParams,
}

seeded_serde!(StackedBiLstmDenseHParams);

impl StackedBiLstmDenseHParams {
    pub const CLASS_NAME: &'static str = "StackedBiLSTMDenseHParams";
}

impl Default for StackedBiLstmDenseHParams {
    fn default() -> Self {
        let state_dim = 300;
        Self {
            bilstm_retseq_layer_num: 2,
            state_dim,
            lstm_dropout: 0.5,
            head: DenseHead::single(state_dim, 0.4),
            train: TrainHParams {
                optimizer: Optimizer::rmsprop(),
                l2: L2Lambdas::weights_only(1e-5),
                // Validation accuracy keeps rising after validation loss
                // flattens out.
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

impl Validate for StackedBiLstmDenseHParams {
    fn check(&self) -> Result<(), ValidationError> {
        nonzero("bilstm_retseq_layer_num", self.bilstm_retseq_layer_num)?;
        nonzero("state_dim", self.state_dim)?;
        unit_interval("lstm_dropout", self.lstm_dropout)?;
        self.head.check()?;
        self.train.check()
    }
}

impl fmt::Display for StackedBiLstmDenseHParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_banner(f, Self::CLASS_NAME)?;
        writeln!(f, "bi-lstm retseq layer num: {}", self.bilstm_retseq_layer_num)?;
        writeln!(f, "state dim: {}", self.state_dim)?;
        writeln!(f, "lstm dropout proba: {}", self.lstm_dropout)?;
        writeln!(f)?;
        writeln!(f, "unit reduce: {}", self.head.unit_reduce)?;
        writeln!(f, "dense layer num: {}", self.head.dense_layer_num)?;
        writeln!(f, "linear unit num: {}", self.head.initial_unit_num)?;
        writeln!(f, "dense dropout proba: {}", self.head.dense_dropout)?;
        writeln!(f)?;
        write!(f, "{}", self.train)
    }
}
