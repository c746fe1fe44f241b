//! Whole-batch pipeline behavior observable from outside the engine:
//! short-circuiting, accumulation, and configuration-tier failures.

use attest::{
    path::RecordPath,
    record::{AbstractRecord, ValidRecord},
    record_storage,
    result::{ErrorCode, OperationResult},
    spec::{AttributeContext, AttributeSpec, try_spec},
    value::Value,
};
use std::sync::atomic::{AtomicUsize, Ordering};

static AFTER_FAIL_CALLS: AtomicUsize = AtomicUsize::new(0);

fn always_fail(_: &mut Value, ctx: &mut AttributeContext<'_>) -> bool {
    ctx.fail("refused");
    false
}

fn count_call(_: &mut Value, _: &mut AttributeContext<'_>) -> bool {
    AFTER_FAIL_CALLS.fetch_add(1, Ordering::SeqCst);
    true
}

record_storage!(struct Probe);

impl AbstractRecord for Probe {
    const NAME: &'static str = "probe";

    fn specifications() -> Vec<AttributeSpec> {
        vec![
            AttributeSpec::new("first")
                .validator_fn("refuse", always_fail)
                .validator_fn("count", count_call),
            AttributeSpec::new("second").validator_fn("refuse", always_fail),
        ]
    }
}

#[test]
fn chain_short_circuits_but_batch_accumulates() {
    let mut result = OperationResult::new();

    let record = Probe::create_from_dto(
        [("first", Value::from(1)), ("second", Value::from(2))],
        RecordPath::root(),
        &mut result,
    );

    assert!(record.is_none());

    // The link after a failed one never ran.
    assert_eq!(AFTER_FAIL_CALLS.load(Ordering::SeqCst), 0);

    // Both attributes failed in one pass.
    assert_eq!(result.messages(ErrorCode::Validation, "first"), ["refused"]);
    assert_eq!(result.messages(ErrorCode::Validation, "second"), ["refused"]);
    assert_eq!(result.error_count(), 2);
}

record_storage!(struct StrictInline);

impl AbstractRecord for StrictInline {
    const NAME: &'static str = "strict_inline";

    fn specifications() -> Vec<AttributeSpec> {
        vec![AttributeSpec::new("field").validator_inline(count_call)]
    }
}

record_storage!(struct RelaxedInline);

impl AbstractRecord for RelaxedInline {
    const NAME: &'static str = "relaxed_inline";
    const STRICT_VALIDATOR_KEYS: bool = false;

    fn specifications() -> Vec<AttributeSpec> {
        vec![AttributeSpec::new("field").validator_inline(passthrough)]
    }
}

fn passthrough(_: &mut Value, _: &mut AttributeContext<'_>) -> bool {
    true
}

#[test]
fn unnamed_inline_validator_is_a_configuration_error() {
    let err = try_spec::<StrictInline>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "record 'strict_inline' attribute 'field' has an unnamed inline validator at position 0"
    );
}

#[test]
fn relaxed_naming_synthesizes_a_key() {
    let spec = try_spec::<RelaxedInline>().unwrap();
    let chain = &spec.attribute("field").unwrap().validators;
    assert_eq!(chain[0].key, "inline#0");
}

record_storage!(struct DoubleDeclared);

impl AbstractRecord for DoubleDeclared {
    const NAME: &'static str = "double_declared";

    fn specifications() -> Vec<AttributeSpec> {
        vec![AttributeSpec::new("twice"), AttributeSpec::new("twice")]
    }
}

#[test]
fn duplicate_attribute_is_a_configuration_error() {
    assert!(try_spec::<DoubleDeclared>().is_err());
}

record_storage!(struct Normalizing);

impl AbstractRecord for Normalizing {
    const NAME: &'static str = "normalizing";

    fn specifications() -> Vec<AttributeSpec> {
        vec![
            AttributeSpec::new("note")
                .validator("empty_to_null")
                .validator("nullable_string"),
        ]
    }
}

#[test]
fn normalization_applies_on_success() {
    let mut result = OperationResult::new();

    let record = Normalizing::create_from_dto(
        [("note", Value::from(""))],
        RecordPath::root(),
        &mut result,
    )
    .unwrap();

    // Empty text collapsed to an explicit null before the nullable check.
    assert_eq!(record.attribute("note"), Some(&Value::Null));
}
