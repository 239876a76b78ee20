//! Hyperparameter sets for each model variant.
//!
//! Every variant embeds [`TrainHParams`], which embeds [`BasicHParams`]; the
//! embedded sets are flattened on (de)serialisation so a variant reads and
//! writes as a single flat table with nested `optimizer`, `lr_schedule`,
//! `l2` and `early_stop` sections.
//!
//! Fields missing from a deserialised variant, including those of the
//! embedded sets, take the variant's own defaults: a table naming only
//! `state_dim` still yields the stacked BiLSTM optimizer and batch size.

/// Serde impls for a variant whose derives carry `#[serde(remote = "Self")]`.
/// Deserialisation layers the given table over the variant's defaults.
macro_rules! seeded_serde {
    ($ty:ty) => {
        impl ::serde::Serialize for $ty {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                <$ty>::serialize(self, serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $ty {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                crate::layered::seeded(deserializer, |table| <$ty>::deserialize(table))
            }
        }
    };
}

pub mod avg_seq_dense;
pub mod basic;
pub mod dense;
pub mod multi_head_attn;
pub mod rnmt_plus;
pub mod stacked_bilstm_dense;
pub mod train;
pub mod transformer_bilstm;

pub use avg_seq_dense::AvgSeqDenseHParams;
pub use basic::BasicHParams;
pub use dense::DenseHead;
pub use multi_head_attn::MultiHeadAttnAvgDenseHParams;
pub use rnmt_plus::RnmtPlusEncoderBiLstmDenseHParams;
pub use stacked_bilstm_dense::StackedBiLstmDenseHParams;
pub use train::TrainHParams;
pub use transformer_bilstm::TransformerEncoderBiLstmDenseHParams;

use crate::Optimizer;
use std::fmt;

/// Dimension of the pretrained fastText English word vectors.
pub const FASTTEXT_EN_WORD_VEC_DIM: usize = 300;

/// Dimension of the pretrained fastText Spanish word vectors.
pub const FASTTEXT_ES_WORD_VEC_DIM: usize = 300;

/// Opening line of a variant's rendering.
pub(crate) fn write_banner(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    write!(f, "\n================== {name} ==================\n")
}

/// Adam moments listed alongside architecture settings by the variants that
/// tune them. Other optimizers write nothing.
pub(crate) fn write_adam_moments(f: &mut fmt::Formatter<'_>, optimizer: &Optimizer) -> fmt::Result {
    if let Some((lr, beta_1, beta_2, epsilon)) = optimizer.adam_params() {
        writeln!(f, "lr: {lr}")?;
        writeln!(f, "beta_1: {beta_1}")?;
        writeln!(f, "beta_2: {beta_2}")?;
        writeln!(f, "epsilon: {epsilon}")?;
    }
    Ok(())
}
