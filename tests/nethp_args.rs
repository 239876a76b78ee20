//! Unit tests for `NethpArgs` loading and rendering.

use net_hparams::cli::{CliError, NethpArgs, render, selected};
use rstest::{fixture, rstest};
use serial_test::serial;
use std::env;
use std::io::Write;
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::NamedTempFile;

#[fixture]
fn temp_toml_file() -> NamedTempFile {
    NamedTempFile::new().unwrap_or_else(|e| panic!("create temp file: {e}"))
}

fn write_toml_content(file: &mut NamedTempFile, content: &str) {
    writeln!(file, "{content}").unwrap_or_else(|e| panic!("write config: {e}"));
}

fn get_config_path(file: &NamedTempFile) -> &str {
    file.path().to_str().unwrap_or_else(|| panic!("path str"))
}

fn load(argv: &[&str]) -> NethpArgs {
    <NethpArgs as ortho_config::OrthoConfig>::load_from_iter(argv.iter().copied())
        .unwrap_or_else(|e| panic!("unexpected parse error: {e}"))
}

static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

struct EnvVarGuard {
    key: String,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    fn new(key: &str, val: &str) -> Self {
        let lock = ENV_LOCK
            .lock()
            .unwrap_or_else(|e| panic!("env lock poisoned: {e}"));
        // Safety: process-wide env mutation is synchronised by ENV_LOCK.
        unsafe { env::set_var(key, val) };
        Self {
            key: key.to_owned(),
            _lock: lock,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        // Safety: process-wide env mutation is synchronised by ENV_LOCK.
        unsafe { env::remove_var(&self.key) };
    }
}

#[rstest]
#[serial]
#[case(vec!["nethp"], None)]
#[case(vec!["nethp", "--model", "MHAADModel"], Some("MHAADModel"))]
fn load_parses_model(#[case] argv: Vec<&str>, #[case] expected: Option<&str>) {
    assert_eq!(load(&argv).model.as_deref(), expected);
}

#[rstest]
#[serial]
#[case(vec!["nethp"], false)]
#[case(vec!["nethp", "--json=true"], true)]
fn load_parses_json(#[case] argv: Vec<&str>, #[case] expected: bool) {
    assert_eq!(load(&argv).json, expected);
}

#[rstest]
#[serial]
#[case("maybe")]
#[case("1")]
fn load_rejects_invalid_bool(#[case] value: &str) {
    let arg = format!("--all={value}");
    let result = <NethpArgs as ortho_config::OrthoConfig>::load_from_iter(["nethp", arg.as_str()]);
    assert!(result.is_err());
}

#[rstest]
#[serial]
fn env_var_parsing_sets_model() {
    let _guard = EnvVarGuard::new("NETHP_MODEL", "SBLDModel");
    let args =
        NethpArgs::load_from_env().unwrap_or_else(|e| panic!("unexpected env parse error: {e}"));
    assert_eq!(args.model.as_deref(), Some("SBLDModel"));
}

#[rstest]
fn config_file_parsing_sets_all(mut temp_toml_file: NamedTempFile) {
    write_toml_content(&mut temp_toml_file, "all = true");
    let path = get_config_path(&temp_toml_file);
    let args = NethpArgs::load_from_config(path)
        .unwrap_or_else(|e| panic!("unexpected config parse error: {e}"));
    assert!(args.all);
}

#[rstest]
fn config_file_parsing_invalid_bool(mut temp_toml_file: NamedTempFile) {
    write_toml_content(&mut temp_toml_file, "json = notabool");
    let path = get_config_path(&temp_toml_file);
    assert!(NethpArgs::load_from_config(path).is_err());
}

#[rstest]
#[serial]
fn precedence_env_over_config(mut temp_toml_file: NamedTempFile) {
    let _guard = EnvVarGuard::new("NETHP_MODEL", "TEBLDModel");
    write_toml_content(&mut temp_toml_file, "model = \"ASDModel\"");
    let path = get_config_path(&temp_toml_file);
    let args = NethpArgs::load_from_env_and_config(path)
        .unwrap_or_else(|e| panic!("unexpected parse error: {e}"));
    assert_eq!(args.model.as_deref(), Some("TEBLDModel"));
}

#[rstest]
#[serial]
fn render_all_lists_every_set() {
    let args = load(&["nethp", "--all=true"]);
    let rendered = render(&args).unwrap_or_else(|e| panic!("render: {e}"));
    let banners = rendered.matches("\n================== ").count();
    assert_eq!(banners, 5);
    assert!(rendered.starts_with("pad: pre\n"));
}

#[rstest]
#[serial]
fn render_json_is_tagged(mut temp_toml_file: NamedTempFile) {
    write_toml_content(&mut temp_toml_file, "batch_size = 256");
    let path = get_config_path(&temp_toml_file);
    let args = load(&["nethp", "--model", "ASDModel", "--json=true", "--hparams-path", path]);
    let rendered = render(&args).unwrap_or_else(|e| panic!("render: {e}"));
    let json: serde_json::Value =
        serde_json::from_str(&rendered).unwrap_or_else(|e| panic!("parse output: {e}"));
    assert_eq!(json["model"], "ASDModel");
    assert_eq!(json["batch_size"], 256);
}

#[rstest]
#[serial]
fn render_all_json_lists_catalogue_tags() {
    let args = load(&["nethp", "--all=true", "--json=true"]);
    let rendered = render(&args).unwrap_or_else(|e| panic!("render: {e}"));
    let json: serde_json::Value =
        serde_json::from_str(&rendered).unwrap_or_else(|e| panic!("parse output: {e}"));
    let tags: Vec<&str> = json
        .as_array()
        .unwrap_or_else(|| panic!("expected an array, got {json}"))
        .iter()
        .filter_map(|set| set["model"].as_str())
        .collect();
    assert_eq!(
        tags,
        ["basic", "train", "ASDModel", "SBLDModel", "REBLDModel", "TEBLDModel", "MHAADModel"]
    );
}

#[rstest]
#[serial]
fn all_with_model_is_rejected() {
    let args = load(&["nethp", "--all=true", "--model", "ASDModel"]);
    let err = selected(&args).err();
    assert!(
        matches!(&err, Some(CliError::ConflictingSelection { model }) if model == "ASDModel"),
        "unexpected result {err:?}"
    );
}

#[rstest]
#[serial]
fn unknown_model_is_rejected() {
    let args = load(&["nethp", "--model", "NoSuchModel"]);
    assert!(matches!(selected(&args), Err(CliError::UnknownModel(_))));
}

#[rstest]
#[serial]
fn invalid_override_is_rejected(mut temp_toml_file: NamedTempFile) {
    write_toml_content(&mut temp_toml_file, "dropout = 1.5");
    let path = get_config_path(&temp_toml_file);
    let args = load(&["nethp", "--model", "ASDModel", "--hparams-path", path]);
    let err = selected(&args).err();
    assert!(
        matches!(
            err,
            Some(CliError::Invalid {
                class_name: "AvgSeqDenseHParams",
                ..
            })
        ),
        "unexpected result {err:?}"
    );
}
