use attest_core::{
    path::RecordPath,
    record::{AbstractRecord, RecordKind, ValidRecord},
    record_storage,
    result::OperationResult,
    spec::{AttributeContext, AttributeSpec},
    value::Value,
};

record_storage!(
    /// An international phone number: dialling code, area code, and
    /// subscriber number, each normalized and checked on creation.
    pub struct Phone
);

impl AbstractRecord for Phone {
    const NAME: &'static str = "phone";
    const KIND: RecordKind = RecordKind::Value;

    fn specifications() -> Vec<AttributeSpec> {
        vec![
            AttributeSpec::new("country")
                .validator("trim")
                .validator("not_empty")
                .validator_fn("dial_code", dial_code),
            AttributeSpec::new("code")
                .validator("trim")
                .validator("not_empty")
                .validator_fn("area_code", area_code),
            AttributeSpec::new("number")
                .validator("trim")
                .validator("not_empty")
                .validator_fn("subscriber", subscriber),
        ]
    }
}

impl Phone {
    /// Typed factory. Returns `None` with the reasons in `result` when any
    /// part is invalid.
    #[must_use]
    pub fn new(
        country: &str,
        code: &str,
        number: &str,
        result: &mut OperationResult,
    ) -> Option<Self> {
        Self::create_from_dto(
            [("country", country), ("code", code), ("number", number)],
            RecordPath::root(),
            result,
        )
    }

    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.attribute("country").and_then(Value::as_str)
    }

    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.attribute("code").and_then(Value::as_str)
    }

    #[must_use]
    pub fn number(&self) -> Option<&str> {
        self.attribute("number").and_then(Value::as_str)
    }

    /// Space-separated international form.
    #[must_use]
    pub fn formatted(&self) -> String {
        [self.country(), self.code(), self.number()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn dial_code(value: &mut Value, ctx: &mut AttributeContext<'_>) -> bool {
    let ok = value.as_str().is_some_and(|s| {
        s.strip_prefix('+').is_some_and(|digits| {
            !digits.is_empty() && digits.len() <= 3 && digits.chars().all(|c| c.is_ascii_digit())
        })
    });

    if !ok {
        ctx.fail("must be a dialling code like '+44'");
    }

    ok
}

fn area_code(value: &mut Value, ctx: &mut AttributeContext<'_>) -> bool {
    let ok = value.as_str().is_some_and(|s| {
        !s.is_empty()
            && s.len() <= 6
            && !s.starts_with('0')
            && s.chars().all(|c| c.is_ascii_digit())
    });

    if !ok {
        ctx.fail("must be an area code without a leading zero");
    }

    ok
}

fn subscriber(value: &mut Value, ctx: &mut AttributeContext<'_>) -> bool {
    let ok = value
        .as_str()
        .is_some_and(|s| (4..=12).contains(&s.len()) && s.chars().all(|c| c.is_ascii_digit()));

    if !ok {
        ctx.fail("must be 4 to 12 digits");
    }

    ok
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatted() {
        let mut result = OperationResult::new();
        let phone = Phone::new("+44", "20", "79460000", &mut result).unwrap();
        assert_eq!(phone.formatted(), "+44 20 79460000");
    }

    #[test]
    fn test_accessors() {
        let mut result = OperationResult::new();
        let phone = Phone::new("+1", "212", "5550100", &mut result).unwrap();
        assert_eq!(phone.country(), Some("+1"));
        assert_eq!(phone.code(), Some("212"));
        assert_eq!(phone.number(), Some("5550100"));
    }
}
