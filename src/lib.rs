//! Core library entry point.
//! Re-exports the hyperparameter sets and the value types they are built
//! from.

#[cfg(feature = "cli")]
pub mod cli;
pub mod early_stop;
pub mod hparams;
pub mod layered;
pub mod models;
pub mod optimizer;
pub mod regularization;
pub mod registry;
pub mod schedule;
pub mod sequence;
pub mod validate;

#[cfg(feature = "cli")]
pub use cli::NethpArgs;
pub use early_stop::{
    Direction, EarlyStopTracker, EarlyStopping, Monitor, StopDecision, StopMode,
};
pub use hparams::{
    AvgSeqDenseHParams, BasicHParams, DenseHead, FASTTEXT_EN_WORD_VEC_DIM,
    FASTTEXT_ES_WORD_VEC_DIM, MultiHeadAttnAvgDenseHParams, RnmtPlusEncoderBiLstmDenseHParams,
    StackedBiLstmDenseHParams, TrainHParams, TransformerEncoderBiLstmDenseHParams,
};
pub use layered::OverrideError;
pub use models::{AVAILABLE_MODELS, ModelKind, ParseModelKindError};
pub use optimizer::Optimizer;
pub use regularization::L2Lambdas;
pub use registry::{HParams, get_hyperparams};
pub use schedule::LrSchedule;
pub use sequence::SequencePolicy;
pub use validate::{Validate, ValidationError};
