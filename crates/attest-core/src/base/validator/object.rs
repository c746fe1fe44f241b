use crate::{spec::AttributeContext, value::Value};

///
/// object
/// Passes nested records and plain mappings; everything else fails.
///

pub fn object(value: &mut Value, ctx: &mut AttributeContext<'_>) -> bool {
    if matches!(value, Value::Record(_) | Value::Map(_)) {
        return true;
    }

    ctx.fail("must be an object");
    false
}

///
/// TESTS
///
