//! Lookup of hyperparameter sets by model name.

use crate::hparams::{
    AvgSeqDenseHParams, BasicHParams, MultiHeadAttnAvgDenseHParams,
    RnmtPlusEncoderBiLstmDenseHParams, StackedBiLstmDenseHParams, TrainHParams,
    TransformerEncoderBiLstmDenseHParams,
};
use crate::layered::{OverrideError, layer};
use crate::models::ModelKind;
use crate::validate::{Validate, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::warn;

/// Any hyperparameter set, tagged by the model it configures.
///
/// Serialises as the wrapped set's flat table with an extra `model` key
/// (`"basic"`, `"train"` or a model abbreviation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model")]
pub enum HParams {
    #[serde(rename = "basic")]
    Basic(BasicHParams),
    #[serde(rename = "train")]
    Train(TrainHParams),
    #[serde(rename = "ASDModel")]
    AvgSeqDense(AvgSeqDenseHParams),
    #[serde(rename = "SBLDModel")]
    StackedBiLstmDense(StackedBiLstmDenseHParams),
    #[serde(rename = "TEBLDModel")]
    TransformerEncoderBiLstmDense(TransformerEncoderBiLstmDenseHParams),
    #[serde(rename = "REBLDModel")]
    RnmtPlusEncoderBiLstmDense(RnmtPlusEncoderBiLstmDenseHParams),
    #[serde(rename = "MHAADModel")]
    MultiHeadAttnAvgDense(MultiHeadAttnAvgDenseHParams),
}

impl Default for HParams {
    fn default() -> Self {
        Self::Basic(BasicHParams::default())
    }
}

impl HParams {
    /// Default hyperparameters for `kind`.
    #[must_use]
    pub fn for_model(kind: ModelKind) -> Self {
        match kind {
            ModelKind::AvgSeqDense => Self::AvgSeqDense(AvgSeqDenseHParams::default()),
            ModelKind::StackedBiLstmDense => {
                Self::StackedBiLstmDense(StackedBiLstmDenseHParams::default())
            }
            ModelKind::TransformerEncoderBiLstmDense => {
                Self::TransformerEncoderBiLstmDense(TransformerEncoderBiLstmDenseHParams::default())
            }
            ModelKind::RnmtPlusEncoderBiLstmDense => {
                Self::RnmtPlusEncoderBiLstmDense(RnmtPlusEncoderBiLstmDenseHParams::default())
            }
            ModelKind::MultiHeadAttnAvgDense => {
                Self::MultiHeadAttnAvgDense(MultiHeadAttnAvgDenseHParams::default())
            }
        }
    }

    /// Every set with its defaults: the base sets, then each model in
    /// declaration order except that the RNMT+ variant precedes the
    /// transformer variant.
    #[must_use]
    pub fn catalogue() -> Vec<Self> {
        vec![
            Self::Basic(BasicHParams::default()),
            Self::Train(TrainHParams::default()),
            Self::for_model(ModelKind::AvgSeqDense),
            Self::for_model(ModelKind::StackedBiLstmDense),
            Self::for_model(ModelKind::RnmtPlusEncoderBiLstmDense),
            Self::for_model(ModelKind::TransformerEncoderBiLstmDense),
            Self::for_model(ModelKind::MultiHeadAttnAvgDense),
        ]
    }

    /// Model configured by this set; `None` for the base sets.
    #[must_use]
    pub const fn kind(&self) -> Option<ModelKind> {
        match self {
            Self::Basic(_) | Self::Train(_) => None,
            Self::AvgSeqDense(_) => Some(ModelKind::AvgSeqDense),
            Self::StackedBiLstmDense(_) => Some(ModelKind::StackedBiLstmDense),
            Self::TransformerEncoderBiLstmDense(_) => {
                Some(ModelKind::TransformerEncoderBiLstmDense)
            }
            Self::RnmtPlusEncoderBiLstmDense(_) => Some(ModelKind::RnmtPlusEncoderBiLstmDense),
            Self::MultiHeadAttnAvgDense(_) => Some(ModelKind::MultiHeadAttnAvgDense),
        }
    }

    /// Name of the wrapped type, as shown in rendered banners.
    #[must_use]
    pub const fn class_name(&self) -> &'static str {
        match self {
            Self::Basic(_) => "BasicHParams",
            Self::Train(_) => "TrainHParams",
            Self::AvgSeqDense(_) => AvgSeqDenseHParams::CLASS_NAME,
            Self::StackedBiLstmDense(_) => StackedBiLstmDenseHParams::CLASS_NAME,
            Self::TransformerEncoderBiLstmDense(_) => {
                TransformerEncoderBiLstmDenseHParams::CLASS_NAME
            }
            Self::RnmtPlusEncoderBiLstmDense(_) => RnmtPlusEncoderBiLstmDenseHParams::CLASS_NAME,
            Self::MultiHeadAttnAvgDense(_) => MultiHeadAttnAvgDenseHParams::CLASS_NAME,
        }
    }

    /// Training settings; `None` only for [`HParams::Basic`].
    #[must_use]
    pub const fn train(&self) -> Option<&TrainHParams> {
        match self {
            Self::Basic(_) => None,
            Self::Train(hp) => Some(hp),
            Self::AvgSeqDense(hp) => Some(&hp.train),
            Self::StackedBiLstmDense(hp) => Some(&hp.train),
            Self::TransformerEncoderBiLstmDense(hp) => Some(&hp.train),
            Self::RnmtPlusEncoderBiLstmDense(hp) => Some(&hp.train),
            Self::MultiHeadAttnAvgDense(hp) => Some(&hp.train),
        }
    }

    #[must_use]
    pub const fn basic(&self) -> &BasicHParams {
        match self {
            Self::Basic(hp) => hp,
            Self::Train(hp) => &hp.basic,
            Self::AvgSeqDense(hp) => &hp.train.basic,
            Self::StackedBiLstmDense(hp) => &hp.train.basic,
            Self::TransformerEncoderBiLstmDense(hp) => &hp.train.basic,
            Self::RnmtPlusEncoderBiLstmDense(hp) => &hp.train.basic,
            Self::MultiHeadAttnAvgDense(hp) => &hp.train.basic,
        }
    }

    /// Layer a TOML file and prefixed environment variables over this set.
    ///
    /// # Errors
    ///
    /// Returns an [`OverrideError`] if the file is missing or a layer holds
    /// values of the wrong type.
    pub fn with_overrides(
        self,
        file: Option<&Path>,
        env_prefix: Option<&str>,
    ) -> Result<Self, OverrideError> {
        Ok(match self {
            Self::Basic(hp) => Self::Basic(layer(&hp, file, env_prefix)?),
            Self::Train(hp) => Self::Train(layer(&hp, file, env_prefix)?),
            Self::AvgSeqDense(hp) => Self::AvgSeqDense(layer(&hp, file, env_prefix)?),
            Self::StackedBiLstmDense(hp) => Self::StackedBiLstmDense(layer(&hp, file, env_prefix)?),
            Self::TransformerEncoderBiLstmDense(hp) => {
                Self::TransformerEncoderBiLstmDense(layer(&hp, file, env_prefix)?)
            }
            Self::RnmtPlusEncoderBiLstmDense(hp) => {
                Self::RnmtPlusEncoderBiLstmDense(layer(&hp, file, env_prefix)?)
            }
            Self::MultiHeadAttnAvgDense(hp) => {
                Self::MultiHeadAttnAvgDense(layer(&hp, file, env_prefix)?)
            }
        })
    }
}

impl Validate for HParams {
    fn check(&self) -> Result<(), ValidationError> {
        match self {
            Self::Basic(hp) => hp.check(),
            Self::Train(hp) => hp.check(),
            Self::AvgSeqDense(hp) => hp.check(),
            Self::StackedBiLstmDense(hp) => hp.check(),
            Self::TransformerEncoderBiLstmDense(hp) => hp.check(),
            Self::RnmtPlusEncoderBiLstmDense(hp) => hp.check(),
            Self::MultiHeadAttnAvgDense(hp) => hp.check(),
        }
    }
}

impl fmt::Display for HParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic(hp) => write!(f, "{hp}"),
            Self::Train(hp) => write!(f, "{hp}"),
            Self::AvgSeqDense(hp) => write!(f, "{hp}"),
            Self::StackedBiLstmDense(hp) => write!(f, "{hp}"),
            Self::TransformerEncoderBiLstmDense(hp) => write!(f, "{hp}"),
            Self::RnmtPlusEncoderBiLstmDense(hp) => write!(f, "{hp}"),
            Self::MultiHeadAttnAvgDense(hp) => write!(f, "{hp}"),
        }
    }
}

/// Hyperparameters for a model named by abbreviation or full name.
///
/// No name, or an empty one, yields [`BasicHParams`]. An unknown name also
/// yields [`BasicHParams`] and logs a warning; parse a [`ModelKind`] instead
/// to reject unknown names.
///
/// # Examples
///
/// ```
/// use net_hparams::{HParams, get_hyperparams};
///
/// assert!(matches!(get_hyperparams(Some("ASDModel")), HParams::AvgSeqDense(_)));
/// assert!(matches!(get_hyperparams(None), HParams::Basic(_)));
/// ```
#[must_use]
pub fn get_hyperparams(name: Option<&str>) -> HParams {
    match name.map(str::trim) {
        None | Some("") => HParams::default(),
        Some(name) => match name.parse::<ModelKind>() {
            Ok(kind) => HParams::for_model(kind),
            Err(err) => {
                warn!(%err, "falling back to basic hyperparameters");
                HParams::default()
            }
        },
    }
}
