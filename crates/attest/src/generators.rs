use attest_core::{types::Timestamp, value::Value};
use ulid::Ulid;

///
/// Generator helpers
///
/// Ready-made functions matching the `GeneratorFn` shape, for the common
/// entity attributes: generated identifiers and touch timestamps. Each
/// keeps a supplied candidate so an explicit value still goes through the
/// attribute's validator chain.
///

/// Mint a new ULID when the candidate is absent or null.
#[must_use]
pub fn ulid_id(current: Option<&Value>) -> Value {
    match current {
        Some(value) if !value.is_null() => value.clone(),
        _ => Value::Text(Ulid::new().to_string()),
    }
}

/// Use the current wall-clock time when the candidate is absent or null.
#[must_use]
pub fn now(current: Option<&Value>) -> Value {
    match current {
        Some(value) if !value.is_null() => value.clone(),
        _ => Value::Timestamp(Timestamp::now()),
    }
}

///
/// TESTS
///
