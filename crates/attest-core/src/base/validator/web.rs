use crate::{spec::AttributeContext, value::Value};

///
/// email
/// Deterministic structural check: one '@', a short non-blank local part,
/// and a dotted domain of alphanumeric-or-hyphen labels.
///

pub fn email(value: &mut Value, ctx: &mut AttributeContext<'_>) -> bool {
    if value.as_str().is_some_and(is_email) {
        return true;
    }

    ctx.fail("must be an email address");
    false
}

fn is_email(s: &str) -> bool {
    let mut parts = s.split('@');

    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    if local.is_empty() || local.len() > 64 || local.chars().any(char::is_whitespace) {
        return false;
    }

    let is_valid_label =
        |label: &str| !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');

    domain.contains('.') && domain.split('.').all(is_valid_label)
}

///
/// TESTS
///
