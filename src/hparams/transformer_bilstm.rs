//! Transformer encoder feeding a bidirectional LSTM and a dense head.
//!
//! The defaults reached a validation loss of about 0.429 (81.7% accuracy).
//! The per-step warmup schedule matters a great deal for this model.

use super::{
    BasicHParams, DenseHead, FASTTEXT_EN_WORD_VEC_DIM, TrainHParams, write_adam_moments,
    write_banner,
};
use crate::schedule::DEFAULT_WARMUP_STEPS;
use crate::validate::{
    Validate, ValidationError, heads_divide, nonzero, schedule_matches, unit_interval,
};
use crate::{EarlyStopping, LrSchedule, Optimizer, SequencePolicy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Heads used by the attention variants.
pub const DEFAULT_N_HEAD: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", default)]
pub struct TransformerEncoderBiLstmDenseHParams {
    /// Selects the encoder flavour in the model builder.
    pub transformer_mode: u8,
    pub word_vec_dim: usize,
    pub encoder_layer_num: usize,
    pub d_model: usize,
    /// Inner width of the position-wise feed-forward block (`d_ff`).
    pub d_inner_hid: usize,
    pub n_head: usize,
    pub d_k: usize,
    pub d_v: usize,
    pub d_pos_enc: usize,
    pub dropout: f64,
    pub state_dim: usize,
    pub lstm_dropout: f64,
    #[serde(flatten)]
    pub head: DenseHead,
    #[serde(flatten)]
    pub train: TrainHParams,
}

seeded_serde!(TransformerEncoderBiLstmDenseHParams);

impl TransformerEncoderBiLstmDenseHParams {
    pub const CLASS_NAME: &'static str = "TransformerEncoderBiLSTMDenseHParams";

    /// Defaults for word vectors of width `word_vec_dim`, with every derived
    /// width computed from it.
    ///
    /// ```
    /// use net_hparams::TransformerEncoderBiLstmDenseHParams;
    ///
    /// let hp = TransformerEncoderBiLstmDenseHParams::for_width(200);
    /// assert_eq!(hp.d_inner_hid, 800);
    /// assert_eq!(hp.d_k, 40);
    /// ```
    #[must_use]
    pub fn for_width(word_vec_dim: usize) -> Self {
        let d_model = word_vec_dim;
        let n_head = DEFAULT_N_HEAD;
        let d_k = d_model / n_head;
        let dropout = 0.4;
        Self {
            transformer_mode: 0,
            word_vec_dim,
            encoder_layer_num: 1,
            d_model,
            d_inner_hid: d_model * 4,
            n_head,
            d_k,
            d_v: d_k,
            d_pos_enc: d_model,
            dropout,
            state_dim: d_model,
            lstm_dropout: dropout,
            head: DenseHead::single(d_model, dropout),
            train: TrainHParams {
                optimizer: Optimizer::adam(0.001, 0.9, 0.98, 1e-9),
                lr_schedule: LrSchedule::warmup(d_model, DEFAULT_WARMUP_STEPS),
                // Accuracy stalls early while the loss keeps falling, and
                // higher dropout lengthens the stall.
                early_stop: EarlyStopping {
                    patience: 40,
                    ..EarlyStopping::default()
                },
                // Batches of 512 validate about as well as 128 and keep the
                // GPU busy.
                basic: BasicHParams::with_policy(SequencePolicy::Post, 512),
                ..TrainHParams::default()
            },
        }
    }
}

impl Default for TransformerEncoderBiLstmDenseHParams {
    fn default() -> Self {
        Self::for_width(FASTTEXT_EN_WORD_VEC_DIM)
    }
}

impl Validate for TransformerEncoderBiLstmDenseHParams {
    fn check(&self) -> Result<(), ValidationError> {
        nonzero("word_vec_dim", self.word_vec_dim)?;
        nonzero("encoder_layer_num", self.encoder_layer_num)?;
        nonzero("d_model", self.d_model)?;
        nonzero("d_inner_hid", self.d_inner_hid)?;
        heads_divide(self.d_model, self.n_head)?;
        nonzero("d_k", self.d_k)?;
        nonzero("d_v", self.d_v)?;
        nonzero("d_pos_enc", self.d_pos_enc)?;
        unit_interval("dropout", self.dropout)?;
        nonzero("state_dim", self.state_dim)?;
        unit_interval("lstm_dropout", self.lstm_dropout)?;
        self.head.check()?;
        schedule_matches(self.d_model, &self.train.lr_schedule)?;
        self.train.check()
    }
}

impl fmt::Display for TransformerEncoderBiLstmDenseHParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_banner(f, Self::CLASS_NAME)?;
        writeln!(f, "transformer mode: {}", self.transformer_mode)?;
        writeln!(f, "word vec dim: {}", self.word_vec_dim)?;
        writeln!(f, "encoder layer num: {}", self.encoder_layer_num)?;
        writeln!(f, "d_model: {}", self.d_model)?;
        writeln!(f, "dim of inner hid: {}", self.d_inner_hid)?;
        writeln!(f, "n head: {}", self.n_head)?;
        writeln!(f, "dim of k: {}", self.d_k)?;
        writeln!(f, "dim of v: {}", self.d_v)?;
        writeln!(f, "pos enc dim: {}", self.d_pos_enc)?;
        writeln!(f, "dropout proba: {}", self.dropout)?;
        writeln!(f)?;

        writeln!(f, "state dim: {}", self.state_dim)?;
        writeln!(f, "lstm dropout proba: {}", self.lstm_dropout)?;
        writeln!(f)?;

        write!(f, "{}", self.head)?;
        write_adam_moments(f, &self.train.optimizer)?;
        if let Some(steps) = self.train.lr_schedule.warmup_steps() {
            writeln!(f, "warm up step: {steps}")?;
        }
        write!(f, "{}", self.train)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Monitor;
    use rstest::rstest;

    #[rstest]
    fn derived_widths_follow_word_vectors() {
        let hp = TransformerEncoderBiLstmDenseHParams::default();
        assert_eq!(hp.d_model, 300);
        assert_eq!(hp.d_inner_hid, 1200);
        assert_eq!((hp.d_k, hp.d_v), (60, 60));
        assert_eq!(hp.d_pos_enc, 300);
        assert_eq!(hp.state_dim, 300);
        assert_eq!(hp.head, DenseHead::single(300, 0.4));
    }

    #[rstest]
    fn trains_with_warmup_and_post_padding() {
        let hp = TransformerEncoderBiLstmDenseHParams::default();
        assert_eq!(hp.train.lr_schedule, LrSchedule::warmup(300, 4000));
        assert_eq!(hp.train.basic.pad, SequencePolicy::Post);
        assert_eq!(hp.train.basic.cut, SequencePolicy::Post);
        assert_eq!(hp.train.basic.batch_size, 512);
        assert_eq!(hp.train.early_stop.monitor, Monitor::ValLoss);
        assert_eq!(hp.train.early_stop.patience, 40);
    }

    #[rstest]
    fn renders_warmup_after_moments() {
        let rendered = TransformerEncoderBiLstmDenseHParams::default().to_string();
        assert!(rendered.contains("epsilon: 0.000000001\nwarm up step: 4000\noptimizer: Adam("));
    }

    #[rstest]
    fn widening_without_schedule_is_invalid() {
        let hp = TransformerEncoderBiLstmDenseHParams {
            d_model: 600,
            ..TransformerEncoderBiLstmDenseHParams::default()
        };
        assert_eq!(
            hp.check(),
            Err(ValidationError::ScheduleWidthMismatch {
                d_model: 600,
                schedule: 300
            })
        );
        assert!(TransformerEncoderBiLstmDenseHParams::for_width(600).validate().is_ok());
    }

    #[rstest]
    fn indivisible_heads_are_invalid() {
        let hp = TransformerEncoderBiLstmDenseHParams {
            n_head: 7,
            ..TransformerEncoderBiLstmDenseHParams::default()
        };
        assert_eq!(
            hp.check(),
            Err(ValidationError::HeadsDoNotDivide {
                d_model: 300,
                n_head: 7
            })
        );
    }
}
