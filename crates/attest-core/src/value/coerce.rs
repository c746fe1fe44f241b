use crate::value::Value;

///
/// Lexical coercion
///
/// Shared by the coercion validators. The accepted forms are deliberately
/// fixed; loosening any of them is a contract change.
///

const TRUE_FORMS: [&str; 4] = ["true", "1", "yes", "on"];
const FALSE_FORMS: [&str; 4] = ["false", "0", "no", "off"];

/// Bool: `Bool`, `Int` 0/1, or one of the fixed text forms
/// (ASCII case-insensitive).
#[must_use]
pub fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Int(0) => Some(false),
        Value::Int(1) => Some(true),
        Value::Text(s) => {
            if TRUE_FORMS.iter().any(|f| s.eq_ignore_ascii_case(f)) {
                Some(true)
            } else if FALSE_FORMS.iter().any(|f| s.eq_ignore_ascii_case(f)) {
                Some(false)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Int: `Int`, a `Float` with zero fraction inside i64 range, or text
/// accepted by `i64::from_str`.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Int(i) => Some(*i),
        Value::Float(f) => {
            if f.is_finite()
                && f.fract() == 0.0
                && *f >= i64::MIN as f64
                && *f <= i64::MAX as f64
            {
                Some(*f as i64)
            } else {
                None
            }
        }
        Value::Text(s) => s.parse::<i64>().ok(),
        _ => None,
    }
}

/// Float: `Float`, `Int`, or text accepted by `f64::from_str`; never
/// NaN or infinite.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Float(f) if f.is_finite() => Some(*f),
        Value::Int(i) => Some(*i as f64),
        Value::Text(s) => s.parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Text: `Text` as-is; scalar values rendered to their canonical lexical
/// form. Structured values do not coerce.
#[must_use]
pub fn to_text(value: &Value) -> Option<String> {
    match value {
        Value::Text(s) => Some(s.clone()),
        Value::Int(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Timestamp(t) => Some(t.get().to_string()),
        _ => None,
    }
}
