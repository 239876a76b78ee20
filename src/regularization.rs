//! Per-parameter-group L2 penalties.

use serde::{Deserialize, Serialize};

/// L2 regularisation coefficients for each parameter group of a layer.
///
/// # Examples
///
/// ```
/// use net_hparams::L2Lambdas;
///
/// let l2 = L2Lambdas::weights_only(1e-5);
/// assert_eq!(l2.recurrent, 1e-5);
/// assert_eq!(l2.activity, 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct L2Lambdas {
    /// Penalty on input kernels.
    pub kernel: f64,
    /// Penalty on recurrent kernels.
    pub recurrent: f64,
    /// Penalty on biases.
    pub bias: f64,
    /// Penalty on layer outputs.
    pub activity: f64,
}

impl L2Lambdas {
    /// Penalise kernel, recurrent and bias weights equally; leave activity
    /// unregularised.
    #[must_use]
    pub const fn weights_only(lambda: f64) -> Self {
        Self {
            kernel: lambda,
            recurrent: lambda,
            bias: lambda,
            activity: 0.0,
        }
    }

    /// `(field, value)` pairs in rendering order.
    #[must_use]
    pub const fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("kernel", self.kernel),
            ("recurrent", self.recurrent),
            ("bias", self.bias),
            ("activity", self.activity),
        ]
    }
}
