use crate::{
    spec::AttributeContext,
    value::{Value, to_text},
};

///
/// trim
/// Normalization only: trims surrounding whitespace from text in place.
/// Non-text values pass through untouched.
///

pub fn trim(value: &mut Value, _ctx: &mut AttributeContext<'_>) -> bool {
    if let Value::Text(s) = value {
        let trimmed = s.trim();
        if trimmed.len() != s.len() {
            *s = trimmed.to_owned();
        }
    }

    true
}

///
/// string
/// Coerces scalars to their lexical text form; structured values and null
/// fail.
///

pub fn string(value: &mut Value, ctx: &mut AttributeContext<'_>) -> bool {
    match to_text(value) {
        Some(text) => {
            *value = Value::Text(text);
            true
        }
        None => {
            ctx.fail("must be a string");
            false
        }
    }
}

///
/// nullable_string
///

pub fn nullable_string(value: &mut Value, ctx: &mut AttributeContext<'_>) -> bool {
    if value.is_null() {
        return true;
    }

    string(value, ctx)
}

///
/// TESTS
///
