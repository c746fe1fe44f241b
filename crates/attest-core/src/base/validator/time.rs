use crate::{
    spec::AttributeContext,
    types::Timestamp,
    value::Value,
};

///
/// timestamp
/// Converts integer seconds or an RFC 3339 string into a `Timestamp`.
/// Already-converted values pass through, so the chain is safe to re-run
/// on normalized input.
///

#[allow(clippy::cast_sign_loss)]
pub fn timestamp(value: &mut Value, ctx: &mut AttributeContext<'_>) -> bool {
    let converted = match value {
        Value::Timestamp(_) => return true,
        Value::Int(i) if *i >= 0 => Some(Timestamp::from_seconds(*i as u64)),
        Value::Text(s) => Timestamp::parse_flexible(s).ok(),
        _ => None,
    };

    match converted {
        Some(t) => {
            *value = Value::Timestamp(t);
            true
        }
        None => {
            ctx.fail("must be a timestamp");
            false
        }
    }
}

///
/// TESTS
///
