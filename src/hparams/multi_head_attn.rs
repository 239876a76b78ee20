//! Multi-head self-attention over word vectors, averaged, then a dense head.

use super::transformer_bilstm::DEFAULT_N_HEAD;
use super::{BasicHParams, DenseHead, FASTTEXT_EN_WORD_VEC_DIM, TrainHParams, write_banner};
use crate::validate::{
    Validate, ValidationError, heads_divide, nonzero, schedule_matches, unit_interval,
};
use crate::{EarlyStopping, Monitor, SequencePolicy};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", default)]
pub struct MultiHeadAttnAvgDenseHParams {
    pub word_vec_dim: usize,
    pub d_model: usize,
    pub n_head: usize,
    pub d_k: usize,
    pub d_v: usize,
    pub dropout: f64,
    #[serde(flatten)]
    pub head: DenseHead,
    #[serde(flatten)]
    pub train: TrainHParams,
}

seeded_serde!(MultiHeadAttnAvgDenseHParams);

impl MultiHeadAttnAvgDenseHParams {
    pub const CLASS_NAME: &'static str = "MultiHeadAttnAvgDenseHParams";

    /// Defaults for word vectors of width `word_vec_dim`.
    #[must_use]
    pub fn for_width(word_vec_dim: usize) -> Self {
        let d_model = word_vec_dim;
        let d_k = d_model / DEFAULT_N_HEAD;
        let dropout = 0.1;
        Self {
            word_vec_dim,
            d_model,
            n_head: DEFAULT_N_HEAD,
            d_k,
            d_v: d_k,
            dropout,
            head: DenseHead::single(d_model, dropout),
            train: TrainHParams {
                early_stop: EarlyStopping {
                    monitor: Monitor::ValAcc,
                    ..EarlyStopping::default()
                },
                basic: BasicHParams::with_policy(SequencePolicy::Post, 128),
                ..TrainHParams::default()
            },
        }
    }
}

impl Default for MultiHeadAttnAvgDenseHParams {
    fn default() -> Self {
        Self::for_width(FASTTEXT_EN_WORD_VEC_DIM)
    }
}

impl Validate for MultiHeadAttnAvgDenseHParams {
    fn check(&self) -> Result<(), ValidationError> {
        nonzero("word_vec_dim", self.word_vec_dim)?;
        nonzero("d_model", self.d_model)?;
        heads_divide(self.d_model, self.n_head)?;
        nonzero("d_k", self.d_k)?;
        nonzero("d_v", self.d_v)?;
        unit_interval("dropout", self.dropout)?;
        self.head.check()?;
        schedule_matches(self.d_model, &self.train.lr_schedule)?;
        self.train.check()
    }
}

impl fmt::Display for MultiHeadAttnAvgDenseHParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_banner(f, Self::CLASS_NAME)?;
        writeln!(f, "n head: {}", self.n_head)?;
        writeln!(f, "dim of k: {}", self.d_k)?;
        writeln!(f, "dim of v: {}", self.d_v)?;
        writeln!(f, "dropout proba: {}", self.dropout)?;
        writeln!(f)?;
        write!(f, "{}{}", self.head, self.train)
    }
}
