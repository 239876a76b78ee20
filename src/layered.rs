//! Layering of hyperparameter overrides.
//!
//! Overrides are merged over a set's defaults in increasing precedence:
//! the serialised defaults, an optional TOML file, then environment
//! variables. Nested keys in variables are separated by `__`, so
//! `NETHP_HP_EARLY_STOP__PATIENCE=5` sets `early_stop.patience`.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
    value::Value,
};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Prefix of environment variables that override hyperparameters.
pub const HPARAMS_ENV_PREFIX: &str = "NETHP_HP_";

/// Errors raised while layering overrides.
#[derive(Debug, Error)]
pub enum OverrideError {
    #[error("hyperparameter file {} does not exist", .path.display())]
    MissingFile { path: PathBuf },
    #[error("failed to apply hyperparameter overrides: {0}")]
    Extract(#[source] Box<figment::Error>),
}

/// Merge a TOML file and prefixed environment variables over `defaults`.
///
/// Passing `None` skips the corresponding layer.
///
/// # Examples
///
/// ```
/// use net_hparams::{BasicHParams, layered::layer};
///
/// let hp = layer(&BasicHParams::default(), None, None).unwrap();
/// assert_eq!(hp, BasicHParams::default());
/// ```
///
/// # Errors
///
/// Returns [`OverrideError::MissingFile`] if `file` names a path that is not
/// a file, or [`OverrideError::Extract`] if a layer holds values of the wrong
/// type.
pub fn layer<T>(defaults: &T, file: Option<&Path>, env_prefix: Option<&str>) -> Result<T, OverrideError>
where
    T: Serialize + DeserializeOwned,
{
    let mut figment = Figment::from(Serialized::defaults(defaults));
    if let Some(path) = file {
        if !path.is_file() {
            return Err(OverrideError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        debug!(path = %path.display(), "layering hyperparameter file");
        figment = figment.merge(Toml::file(path));
    }
    if let Some(prefix) = env_prefix {
        debug!(prefix, "layering hyperparameter environment");
        figment = figment.merge(Env::prefixed(prefix).split("__"));
    }
    figment
        .extract()
        .map_err(|e| OverrideError::Extract(Box::new(e)))
}

/// Deserialise a `T` whose omitted fields, at any depth, take the values of
/// `T::default()`.
///
/// `raw` builds the `T` from the completed table without re-entering this
/// function; the hyperparameter sets pass their `remote = "Self"` derive.
pub(crate) fn seeded<'de, T, D>(
    deserializer: D,
    raw: impl FnOnce(&Value) -> Result<T, figment::Error>,
) -> Result<T, D::Error>
where
    T: Default + Serialize,
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    let given = <Value as Deserialize>::deserialize(deserializer)?;
    let merged: Value = Figment::from(Serialized::defaults(T::default()))
        .merge(Serialized::defaults(given))
        .extract()
        .map_err(D::Error::custom)?;
    raw(&merged).map_err(D::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AvgSeqDenseHParams, Optimizer};
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[rstest]
    fn missing_file_is_reported() {
        let result = layer(
            &AvgSeqDenseHParams::default(),
            Some(Path::new("/nonexistent/hparams.toml")),
            None,
        );
        assert!(matches!(result, Err(OverrideError::MissingFile { .. })));
    }

    #[rstest]
    fn file_overrides_keep_variant_defaults() {
        let mut file = NamedTempFile::new().unwrap_or_else(|e| panic!("create temp file: {e}"));
        writeln!(file, "linear_unit_num = 128\n\n[optimizer]\nlr = 0.01")
            .unwrap_or_else(|e| panic!("write overrides: {e}"));
        let hp = layer(&AvgSeqDenseHParams::default(), Some(file.path()), None)
            .unwrap_or_else(|e| panic!("layer overrides: {e}"));
        assert_eq!(hp.linear_unit_num, 128);
        assert_eq!(hp.dense_layer_num, 3);
        assert_eq!(
            hp.train.optimizer,
            Optimizer::RmsProp {
                lr: 0.01,
                rho: 0.9,
                epsilon: 1e-7,
                decay: 0.0
            }
        );
    }

    #[rstest]
    fn wrong_type_is_an_extract_error() {
        let mut file = NamedTempFile::new().unwrap_or_else(|e| panic!("create temp file: {e}"));
        writeln!(file, "batch_size = \"large\"").unwrap_or_else(|e| panic!("write overrides: {e}"));
        let result = layer(&AvgSeqDenseHParams::default(), Some(file.path()), None);
        assert!(matches!(result, Err(OverrideError::Extract(_))));
    }
}
