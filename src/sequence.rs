//! Padding and truncation side for fixed-length token sequences.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which end of a sequence is padded or truncated.
///
/// # Examples
///
/// ```
/// use net_hparams::SequencePolicy;
///
/// let policy: SequencePolicy = "post".parse().unwrap();
/// assert_eq!(policy, SequencePolicy::Post);
/// assert_eq!(policy.to_string(), "post");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequencePolicy {
    /// Operate on the start of the sequence.
    #[default]
    Pre,
    /// Operate on the end of the sequence.
    Post,
}

impl SequencePolicy {
    /// Keyword used in configuration files and rendered output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pre => "pre",
            Self::Post => "post",
        }
    }
}

impl fmt::Display for SequencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is neither `pre` nor `post`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sequence policy \"{0}\", expected \"pre\" or \"post\"")]
pub struct ParseSequencePolicyError(pub String);

impl FromStr for SequencePolicy {
    type Err = ParseSequencePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("pre") {
            Ok(Self::Pre)
        } else if trimmed.eq_ignore_ascii_case("post") {
            Ok(Self::Post)
        } else {
            Err(ParseSequencePolicyError(s.to_owned()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pre", SequencePolicy::Pre)]
    #[case("POST", SequencePolicy::Post)]
    #[case(" Post ", SequencePolicy::Post)]
    fn parses_keywords(#[case] input: &str, #[case] expected: SequencePolicy) {
        assert_eq!(input.parse::<SequencePolicy>(), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("middle")]
    fn rejects_other_keywords(#[case] input: &str) {
        assert_eq!(
            input.parse::<SequencePolicy>(),
            Err(ParseSequencePolicyError(input.to_owned()))
        );
    }

    #[rstest]
    fn serialises_lowercase() {
        #[expect(clippy::expect_used, reason = "test should fail loudly")]
        let json = serde_json::to_string(&SequencePolicy::Post).expect("serialise policy");
        assert_eq!(json, r#""post""#);
    }
}
