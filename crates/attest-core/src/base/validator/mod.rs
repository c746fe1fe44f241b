pub mod null;
pub mod num;
pub mod object;
pub mod text;
pub mod time;
pub mod web;

use crate::spec::ValidatorFn;
use std::{collections::BTreeMap, sync::LazyLock};

///
/// Base validator registry
///
/// The name-to-function table that `Named` validator references resolve
/// against. Names are part of the declaration contract.
///

static REGISTRY: LazyLock<BTreeMap<&'static str, ValidatorFn>> = LazyLock::new(|| {
    BTreeMap::from([
        ("bool", num::boolean as ValidatorFn),
        ("email", web::email as ValidatorFn),
        ("empty_to_null", null::empty_to_null as ValidatorFn),
        ("float", num::float as ValidatorFn),
        ("int", num::int as ValidatorFn),
        ("not_empty", null::not_empty as ValidatorFn),
        ("not_null", null::not_null as ValidatorFn),
        ("nullable_bool", num::nullable_bool as ValidatorFn),
        ("nullable_float", num::nullable_float as ValidatorFn),
        ("nullable_int", num::nullable_int as ValidatorFn),
        ("nullable_string", text::nullable_string as ValidatorFn),
        ("object", object::object as ValidatorFn),
        ("string", text::string as ValidatorFn),
        ("timestamp", time::timestamp as ValidatorFn),
        ("trim", text::trim as ValidatorFn),
    ])
});

/// Resolve a base validator by name.
#[must_use]
pub fn lookup(name: &str) -> Option<ValidatorFn> {
    REGISTRY.get(name).copied()
}

/// Registered names, for diagnostics.
pub fn names() -> impl Iterator<Item = &'static str> {
    REGISTRY.keys().copied()
}


///
/// TESTS
///
