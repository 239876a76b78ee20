//! BDD tests for looking up hyperparameters by model name.

use net_hparams::{HParams, get_hyperparams};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

#[derive(Default)]
struct LookupContext {
    name: RefCell<Option<String>>,
    result: RefCell<Option<HParams>>,
}

#[fixture]
fn lookup_context() -> LookupContext {
    LookupContext::default()
}

#[given("the model name \"{name}\"")]
fn given_name(name: String, #[from(lookup_context)] ctx: &LookupContext) {
    ctx.name.replace(Some(name));
}

#[given("no model name")]
fn given_no_name(#[from(lookup_context)] ctx: &LookupContext) {
    ctx.name.replace(None);
}

#[when("looking up hyperparameters")]
fn when_looking_up(#[from(lookup_context)] ctx: &LookupContext) {
    let hp = get_hyperparams(ctx.name.borrow().as_deref());
    ctx.result.replace(Some(hp));
}

#[then("the set is \"{class_name}\"")]
#[expect(
    clippy::needless_pass_by_value,
    reason = "BDD macro injects owned value"
)]
fn then_set_is(class_name: String, #[from(lookup_context)] ctx: &LookupContext) {
    let binding = ctx.result.borrow();
    let hp = binding
        .as_ref()
        .unwrap_or_else(|| panic!("result to be set"));
    assert_eq!(hp.class_name(), class_name);
}

#[scenario(path = "tests/features/registry.feature", index = 0)]
fn known_abbreviation(lookup_context: LookupContext) {
    let _ = lookup_context;
}

#[scenario(path = "tests/features/registry.feature", index = 1)]
fn full_model_name(lookup_context: LookupContext) {
    let _ = lookup_context;
}

#[scenario(path = "tests/features/registry.feature", index = 2)]
fn unknown_name_falls_back(lookup_context: LookupContext) {
    let _ = lookup_context;
}

#[scenario(path = "tests/features/registry.feature", index = 3)]
fn missing_name(lookup_context: LookupContext) {
    let _ = lookup_context;
}
