//! Settings shared by every model: sequence shaping and batch size.

use crate::SequencePolicy;
use crate::validate::{Validate, ValidationError, nonzero};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Batch size used unless a model overrides it. Kept a multiple of 32.
pub const DEFAULT_BATCH_SIZE: usize = 32;

/// Base hyperparameters.
///
/// # Examples
///
/// ```
/// use net_hparams::{BasicHParams, SequencePolicy};
///
/// let hp = BasicHParams::default();
/// assert_eq!(hp.pad, SequencePolicy::Pre);
/// assert_eq!(hp.batch_size, 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicHParams {
    /// Side on which short sequences are padded.
    pub pad: SequencePolicy,
    /// Side from which long sequences are truncated.
    pub cut: SequencePolicy,
    pub batch_size: usize,
}

impl Default for BasicHParams {
    fn default() -> Self {
        Self {
            pad: SequencePolicy::Pre,
            cut: SequencePolicy::Pre,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl BasicHParams {
    /// Pad and cut on the same side with the given batch size.
    #[must_use]
    pub const fn with_policy(policy: SequencePolicy, batch_size: usize) -> Self {
        Self {
            pad: policy,
            cut: policy,
            batch_size,
        }
    }
}

impl Validate for BasicHParams {
    fn check(&self) -> Result<(), ValidationError> {
        nonzero("batch_size", self.batch_size)
    }
}

impl fmt::Display for BasicHParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "pad: {}", self.pad)?;
        writeln!(f, "cut: {}", self.cut)?;
        writeln!(f)?;
        writeln!(f, "batch size: {}", self.batch_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn renders_policy_then_batch() {
        assert_eq!(
            BasicHParams::default().to_string(),
            "pad: pre\ncut: pre\n\nbatch size: 32\n"
        );
    }

    #[rstest]
    fn zero_batch_is_invalid() {
        let hp = BasicHParams::with_policy(SequencePolicy::Post, 0);
        assert_eq!(
            hp.validate(),
            Err(ValidationError::Zero {
                field: "batch_size"
            })
        );
    }
}
