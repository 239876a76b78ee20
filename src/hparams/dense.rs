//! Fully connected classification head shared by the recurrent and
//! attention variants.

use crate::validate::{Validate, ValidationError, nonzero, unit_interval};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseHead {
    /// Halve the unit count at each successive dense layer.
    pub unit_reduce: bool,
    pub dense_layer_num: usize,
    /// Units in the first dense layer.
    pub initial_unit_num: usize,
    pub dense_dropout: f64,
}

impl DenseHead {
    /// A single layer of `units` units without reduction.
    #[must_use]
    pub const fn single(units: usize, dropout: f64) -> Self {
        Self {
            unit_reduce: false,
            dense_layer_num: 1,
            initial_unit_num: units,
            dense_dropout: dropout,
        }
    }

    /// Units of each dense layer, first to last.
    ///
    /// ```
    /// use net_hparams::DenseHead;
    ///
    /// let head = DenseHead { unit_reduce: true, dense_layer_num: 3, initial_unit_num: 256, dense_dropout: 0.1 };
    /// assert_eq!(head.layer_units(), vec![256, 128, 64]);
    /// ```
    #[must_use]
    pub fn layer_units(&self) -> Vec<usize> {
        std::iter::successors(Some(self.initial_unit_num), |&units| {
            Some(if self.unit_reduce { (units / 2).max(1) } else { units })
        })
        .take(self.dense_layer_num)
        .collect()
    }
}

impl Validate for DenseHead {
    fn check(&self) -> Result<(), ValidationError> {
        nonzero("dense_layer_num", self.dense_layer_num)?;
        nonzero("initial_unit_num", self.initial_unit_num)?;
        unit_interval("dense_dropout", self.dense_dropout)
    }
}

impl fmt::Display for DenseHead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "unit reduce: {}", self.unit_reduce)?;
        writeln!(f, "dense layer num: {}", self.dense_layer_num)?;
        writeln!(f, "initial unit num: {}", self.initial_unit_num)?;
        writeln!(f, "dense dropout proba: {}", self.dense_dropout)?;
        writeln!(f)
    }
}
