use crate::{spec::AttributeContext, value::Value};

///
/// empty_to_null
/// Normalization only: empty text becomes an explicit null.
///

pub fn empty_to_null(value: &mut Value, _ctx: &mut AttributeContext<'_>) -> bool {
    if value.as_str().is_some_and(str::is_empty) {
        *value = Value::Null;
    }

    true
}

///
/// not_null
///

pub fn not_null(value: &mut Value, ctx: &mut AttributeContext<'_>) -> bool {
    if value.is_null() {
        ctx.fail("must not be null");
        return false;
    }

    true
}

///
/// not_empty
/// Rejects null, empty text, and empty collections.
///

pub fn not_empty(value: &mut Value, ctx: &mut AttributeContext<'_>) -> bool {
    let empty = match value {
        Value::Null => true,
        Value::Text(s) => s.is_empty(),
        Value::List(items) => items.is_empty(),
        Value::Map(map) => map.is_empty(),
        _ => false,
    };

    if empty {
        ctx.fail("must not be empty");
        return false;
    }

    true
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::validator::harness::apply;

    #[test]
    fn test_empty_to_null() {
        let (ok, value, result) = apply(empty_to_null, Value::from(""));
        assert!(ok);
        assert!(value.is_null());
        assert!(result.is_success());

        let (ok, value, _) = apply(empty_to_null, Value::from("x"));
        assert!(ok);
        assert_eq!(value, Value::from("x"));
    }

    #[test]
    fn test_not_null() {
        let (ok, _, result) = apply(not_null, Value::Null);
        assert!(!ok);
        assert_eq!(result.error_count(), 1);

        let (ok, _, _) = apply(not_null, Value::from(0));
        assert!(ok);
    }

    #[test]
    fn test_not_empty() {
        assert!(!apply(not_empty, Value::Null).0);
        assert!(!apply(not_empty, Value::from("")).0);
        assert!(!apply(not_empty, Value::list(Vec::<Value>::new())).0);
        assert!(apply(not_empty, Value::from("a")).0);
        assert!(apply(not_empty, Value::from(0)).0);
    }
}
