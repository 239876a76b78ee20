//! Optimizer descriptors.
//!
//! The training side builds its optimizer from these values; nothing here
//! performs parameter updates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Learning rate used by both optimizers when none is given.
pub const DEFAULT_LEARNING_RATE: f64 = 1e-3;

/// Numerical fuzz factor applied when an optimizer is built without an
/// explicit epsilon.
pub const DEFAULT_EPSILON: f64 = 1e-7;

/// Optimizer choice together with its parameters.
///
/// # Examples
///
/// ```
/// use net_hparams::Optimizer;
///
/// let adam = Optimizer::adam(0.001, 0.9, 0.98, 1e-9);
/// assert_eq!(adam.name(), "Adam");
/// assert_eq!(adam.learning_rate(), 0.001);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Optimizer {
    /// Adaptive moment estimation.
    Adam {
        lr: f64,
        beta_1: f64,
        beta_2: f64,
        epsilon: f64,
        #[serde(default)]
        decay: f64,
        #[serde(default)]
        amsgrad: bool,
    },
    /// Root-mean-square propagation.
    #[serde(rename = "rmsprop")]
    RmsProp {
        lr: f64,
        rho: f64,
        epsilon: f64,
        #[serde(default)]
        decay: f64,
    },
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::adam(DEFAULT_LEARNING_RATE, 0.9, 0.999, DEFAULT_EPSILON)
    }
}

impl Optimizer {
    /// Adam with the given moments and no decay.
    #[must_use]
    pub const fn adam(lr: f64, beta_1: f64, beta_2: f64, epsilon: f64) -> Self {
        Self::Adam {
            lr,
            beta_1,
            beta_2,
            epsilon,
            decay: 0.0,
            amsgrad: false,
        }
    }

    /// RMSprop with its stock parameters.
    #[must_use]
    pub const fn rmsprop() -> Self {
        Self::RmsProp {
            lr: DEFAULT_LEARNING_RATE,
            rho: 0.9,
            epsilon: DEFAULT_EPSILON,
            decay: 0.0,
        }
    }

    /// Display name of the optimizer family.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Adam { .. } => "Adam",
            Self::RmsProp { .. } => "RMSprop",
        }
    }

    /// Initial learning rate.
    #[must_use]
    pub const fn learning_rate(&self) -> f64 {
        match *self {
            Self::Adam { lr, .. } | Self::RmsProp { lr, .. } => lr,
        }
    }

    /// Moment parameters `(lr, beta_1, beta_2, epsilon)` when this is Adam.
    #[must_use]
    pub const fn adam_params(&self) -> Option<(f64, f64, f64, f64)> {
        match *self {
            Self::Adam {
                lr,
                beta_1,
                beta_2,
                epsilon,
                ..
            } => Some((lr, beta_1, beta_2, epsilon)),
            Self::RmsProp { .. } => None,
        }
    }
}

impl fmt::Display for Optimizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Adam {
                lr,
                beta_1,
                beta_2,
                epsilon,
                decay,
                amsgrad,
            } => write!(
                f,
                "Adam(lr={lr}, beta_1={beta_1}, beta_2={beta_2}, epsilon={epsilon}, \
                 decay={decay}, amsgrad={amsgrad})"
            ),
            Self::RmsProp {
                lr,
                rho,
                epsilon,
                decay,
            } => write!(
                f,
                "RMSprop(lr={lr}, rho={rho}, epsilon={epsilon}, decay={decay})"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_is_stock_adam() {
        assert_eq!(
            Optimizer::default().adam_params(),
            Some((0.001, 0.9, 0.999, 1e-7))
        );
    }

    #[rstest]
    fn rmsprop_has_no_adam_params() {
        assert!(Optimizer::rmsprop().adam_params().is_none());
        assert_eq!(Optimizer::rmsprop().name(), "RMSprop");
    }

    #[rstest]
    #[case(Optimizer::default(), "Adam(lr=0.001, beta_1=0.9, beta_2=0.999, epsilon=0.0000001, decay=0, amsgrad=false)")]
    #[case(Optimizer::rmsprop(), "RMSprop(lr=0.001, rho=0.9, epsilon=0.0000001, decay=0)")]
    fn renders_parameters(#[case] optimizer: Optimizer, #[case] expected: &str) {
        assert_eq!(optimizer.to_string(), expected);
    }

    #[rstest]
    fn deserialise_fills_optional_fields() {
        let json = r#"{"kind":"adam","lr":0.01,"beta_1":0.9,"beta_2":0.98,"epsilon":1e-9}"#;
        #[expect(clippy::expect_used, reason = "test should fail loudly")]
        let optimizer: Optimizer = serde_json::from_str(json).expect("deserialise optimizer");
        assert_eq!(optimizer, Optimizer::adam(0.01, 0.9, 0.98, 1e-9));
    }

    #[rstest]
    fn deserialise_unknown_kind() {
        let json = r#"{"kind":"sgd","lr":0.1}"#;
        let optimizer: Result<Optimizer, _> = serde_json::from_str(json);
        assert!(optimizer.is_err());
    }
}
