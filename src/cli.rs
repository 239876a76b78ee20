//! CLI argument types and rendering for the `nethp` binary.
//! Loads from CLI args, environment (prefix `NETHP_`), and optional config
//! files.

use crate::layered::{HPARAMS_ENV_PREFIX, OverrideError};
use crate::models::{ModelKind, ParseModelKindError};
use crate::registry::HParams;
use crate::validate::{Validate, ValidationError};
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use ortho_config::OrthoError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Command-line arguments for the `nethp` binary.
///
/// Values are loaded from command line arguments, environment variables
/// (prefixed with `NETHP_`), and an optional configuration file.
///
/// # Examples
///
/// ```
/// use net_hparams::cli::NethpArgs;
/// use ortho_config::OrthoConfig;
///
/// let args = NethpArgs::load_from_iter(["nethp", "--model", "ASDModel"])
///     .expect("load args from CLI iterator");
/// assert_eq!(args.model.as_deref(), Some("ASDModel"));
/// ```
#[derive(Debug, Deserialize, ortho_config::OrthoConfig)]
#[ortho_config(prefix = "NETHP")]
pub struct NethpArgs {
    /// Model abbreviation or full name; the base set when absent.
    #[serde(default)]
    pub model: Option<String>,

    /// Render every hyperparameter set instead of a single one.
    #[ortho_config(default = false)]
    #[serde(default)]
    pub all: bool,

    /// Emit JSON instead of text.
    #[ortho_config(default = false)]
    #[serde(default)]
    pub json: bool,

    /// TOML file with hyperparameter overrides.
    #[serde(default)]
    pub hparams_path: Option<String>,

    /// Optional path to a configuration file.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl NethpArgs {
    /// Load configuration solely from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an [`OrthoError`] if any variable cannot be parsed.
    pub fn load_from_env() -> Result<Self, OrthoError> {
        Figment::new()
            .merge(Env::prefixed("NETHP_"))
            .extract()
            .map_err(Into::into)
    }

    /// Load configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an [`OrthoError`] if the file cannot be read or parsed.
    pub fn load_from_config(path: &str) -> Result<Self, OrthoError> {
        Figment::new()
            .merge(Toml::file(path))
            .extract()
            .map_err(Into::into)
    }

    /// Load configuration from environment variables and a file path.
    ///
    /// # Errors
    ///
    /// Returns an [`OrthoError`] if either source contains invalid values.
    pub fn load_from_env_and_config(path: &str) -> Result<Self, OrthoError> {
        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("NETHP_"))
            .extract()
            .map_err(Into::into)
    }
}

/// Errors raised while rendering hyperparameters.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    UnknownModel(#[from] ParseModelKindError),
    #[error("--all renders every set and cannot be combined with --model {model}")]
    ConflictingSelection { model: String },
    #[error(transparent)]
    Overrides(#[from] OverrideError),
    #[error("invalid hyperparameters for {class_name}: {source}")]
    Invalid {
        class_name: &'static str,
        #[source]
        source: ValidationError,
    },
    #[error("failed to encode hyperparameters as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Hyperparameter sets selected by `args`, with overrides applied and
/// validated.
///
/// # Errors
///
/// Returns a [`CliError`] if `--all` is combined with a model name, the
/// model name is unknown, an override layer fails, or the resulting values
/// are out of range.
pub fn selected(args: &NethpArgs) -> Result<Vec<HParams>, CliError> {
    let model = args.model.as_deref().map(str::trim).filter(|name| !name.is_empty());
    let sets = match (args.all, model) {
        (true, Some(name)) => {
            return Err(CliError::ConflictingSelection {
                model: name.to_owned(),
            });
        }
        (true, None) => HParams::catalogue(),
        (false, None) => vec![HParams::default()],
        (false, Some(name)) => vec![HParams::for_model(name.parse::<ModelKind>()?)],
    };
    let file = args.hparams_path.as_deref().map(Path::new);
    sets.into_iter()
        .map(|hp| {
            let hp = hp.with_overrides(file, Some(HPARAMS_ENV_PREFIX))?;
            let class_name = hp.class_name();
            hp.validate()
                .map_err(|source| CliError::Invalid { class_name, source })
        })
        .collect()
}

/// Render the sets selected by `args` as text or JSON.
///
/// Text output separates sets with a blank line. JSON output is a single
/// object, or an array in catalogue order when `--all` is set.
///
/// # Errors
///
/// Returns a [`CliError`] under the same conditions as [`selected`], or if
/// JSON encoding fails.
pub fn render(args: &NethpArgs) -> Result<String, CliError> {
    let sets = selected(args)?;
    info!(count = sets.len(), json = args.json, "rendering hyperparameters");
    if args.json {
        let mut out = if let [single] = sets.as_slice() {
            serde_json::to_string_pretty(single)?
        } else {
            serde_json::to_string_pretty(&sets)?
        };
        out.push('\n');
        Ok(out)
    } else {
        Ok(sets.iter().map(|hp| format!("{hp}\n")).collect())
    }
}
