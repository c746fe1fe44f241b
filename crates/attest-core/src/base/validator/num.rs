use crate::{
    spec::AttributeContext,
    value::{Value, to_bool, to_float, to_int},
};

///
/// int
/// Coerce-and-check; the accepted lexical forms live in `value::coerce`.
///

pub fn int(value: &mut Value, ctx: &mut AttributeContext<'_>) -> bool {
    match to_int(value) {
        Some(i) => {
            *value = Value::Int(i);
            true
        }
        None => {
            ctx.fail("must be an integer");
            false
        }
    }
}

///
/// float
///

pub fn float(value: &mut Value, ctx: &mut AttributeContext<'_>) -> bool {
    match to_float(value) {
        Some(f) => {
            *value = Value::Float(f);
            true
        }
        None => {
            ctx.fail("must be a number");
            false
        }
    }
}

///
/// bool
///

pub fn boolean(value: &mut Value, ctx: &mut AttributeContext<'_>) -> bool {
    match to_bool(value) {
        Some(b) => {
            *value = Value::Bool(b);
            true
        }
        None => {
            ctx.fail("must be a boolean");
            false
        }
    }
}

///
/// Nullable variants
///

pub fn nullable_int(value: &mut Value, ctx: &mut AttributeContext<'_>) -> bool {
    if value.is_null() {
        return true;
    }

    int(value, ctx)
}

pub fn nullable_float(value: &mut Value, ctx: &mut AttributeContext<'_>) -> bool {
    if value.is_null() {
        return true;
    }

    float(value, ctx)
}

pub fn nullable_bool(value: &mut Value, ctx: &mut AttributeContext<'_>) -> bool {
    if value.is_null() {
        return true;
    }

    boolean(value, ctx)
}

///
/// TESTS
///
