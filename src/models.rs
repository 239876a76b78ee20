//! Names of the supported model variants.
//!
//! Each model has a short abbreviation used on the command line and in
//! experiment logs, and a full name used by the model builders.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A supported model variant.
///
/// # Examples
///
/// ```
/// use net_hparams::ModelKind;
///
/// let kind: ModelKind = "SBLDModel".parse().unwrap();
/// assert_eq!(kind.full_name(), "StackedBiLSTMDenseModel");
/// assert_eq!("StackedBiLSTMDenseModel".parse::<ModelKind>().unwrap(), kind);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    #[serde(rename = "ASDModel")]
    AvgSeqDense,
    #[serde(rename = "SBLDModel")]
    StackedBiLstmDense,
    #[serde(rename = "TEBLDModel")]
    TransformerEncoderBiLstmDense,
    #[serde(rename = "REBLDModel")]
    RnmtPlusEncoderBiLstmDense,
    #[serde(rename = "MHAADModel")]
    MultiHeadAttnAvgDense,
}

/// Abbreviations of every supported model, in [`ModelKind::ALL`] order.
pub const AVAILABLE_MODELS: [&str; 5] = [
    ModelKind::AvgSeqDense.abbreviation(),
    ModelKind::StackedBiLstmDense.abbreviation(),
    ModelKind::TransformerEncoderBiLstmDense.abbreviation(),
    ModelKind::RnmtPlusEncoderBiLstmDense.abbreviation(),
    ModelKind::MultiHeadAttnAvgDense.abbreviation(),
];

impl ModelKind {
    pub const ALL: [Self; 5] = [
        Self::AvgSeqDense,
        Self::StackedBiLstmDense,
        Self::TransformerEncoderBiLstmDense,
        Self::RnmtPlusEncoderBiLstmDense,
        Self::MultiHeadAttnAvgDense,
    ];

    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::AvgSeqDense => "ASDModel",
            Self::StackedBiLstmDense => "SBLDModel",
            Self::TransformerEncoderBiLstmDense => "TEBLDModel",
            Self::RnmtPlusEncoderBiLstmDense => "REBLDModel",
            Self::MultiHeadAttnAvgDense => "MHAADModel",
        }
    }

    #[must_use]
    pub const fn full_name(self) -> &'static str {
        match self {
            Self::AvgSeqDense => "AvgSeqDenseModel",
            Self::StackedBiLstmDense => "StackedBiLSTMDenseModel",
            Self::TransformerEncoderBiLstmDense => "TransformerEncoderBiLSTMDenseModel",
            Self::RnmtPlusEncoderBiLstmDense => "RNMTPlusEncoderBiLSTMDenseModel",
            Self::MultiHeadAttnAvgDense => "MultiHeadAttnAvgDenseModel",
        }
    }

    #[must_use]
    pub fn from_abbreviation(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.abbreviation() == name)
    }

    #[must_use]
    pub fn from_full_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.full_name() == name)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Returned when a name matches neither an abbreviation nor a full name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown model \"{name}\", expected one of {}", AVAILABLE_MODELS.join(", "))]
pub struct ParseModelKindError {
    pub name: String,
}

impl FromStr for ModelKind {
    type Err = ParseModelKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::from_abbreviation(name)
            .or_else(|| Self::from_full_name(name))
            .ok_or_else(|| ParseModelKindError { name: s.to_owned() })
    }
}
