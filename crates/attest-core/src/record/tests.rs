use crate::{
    path::RecordPath,
    record::{AbstractRecord, RecordKind, ValidRecord},
    result::{ErrorCode, OperationResult},
    spec::AttributeSpec,
    value::Value,
};

crate::record_storage!(struct Address);

impl AbstractRecord for Address {
    const NAME: &'static str = "address";

    fn specifications() -> Vec<AttributeSpec> {
        vec![
            AttributeSpec::new("city")
                .validator("trim")
                .validator("not_empty"),
            AttributeSpec::new("zip").validator("nullable_string"),
        ]
    }
}

crate::record_storage!(struct Customer);

impl AbstractRecord for Customer {
    const NAME: &'static str = "customer";

    fn specifications() -> Vec<AttributeSpec> {
        vec![
            AttributeSpec::new("name")
                .validator("trim")
                .validator("not_empty"),
            AttributeSpec::new("age").validator("nullable_int"),
            AttributeSpec::new("address").nested::<Address>(),
        ]
    }
}

crate::record_storage!(struct Defaulted);

impl AbstractRecord for Defaulted {
    const NAME: &'static str = "defaulted";
    const KIND: RecordKind = RecordKind::Value;

    fn specifications() -> Vec<AttributeSpec> {
        vec![
            AttributeSpec::new("label").validator("not_empty"),
            AttributeSpec::new("count").validator("int").default(0),
        ]
    }
}

#[test]
fn test_create_normalizes_and_assigns() {
    let mut result = OperationResult::new();

    let customer = Customer::create_from_dto(
        [("name", Value::from("  ada  ")), ("age", Value::from("36"))],
        RecordPath::root(),
        &mut result,
    )
    .unwrap();

    assert!(result.is_success());
    assert_eq!(customer.attribute("name"), Some(&Value::from("ada")));
    assert_eq!(customer.attribute("age"), Some(&Value::Int(36)));
}

#[test]
fn test_unknown_keys_are_dropped() {
    let mut result = OperationResult::new();

    let customer = Customer::create_from_dto(
        [("name", Value::from("ada")), ("shoe_size", Value::from(42))],
        RecordPath::root(),
        &mut result,
    )
    .unwrap();

    assert!(result.is_success());
    assert_eq!(customer.attribute("shoe_size"), None);
}

#[test]
fn test_failed_create_returns_none() {
    let mut result = OperationResult::new();

    let customer = Customer::create_from_dto(
        [("name", Value::from("   "))],
        RecordPath::root(),
        &mut result,
    );

    assert!(customer.is_none());
    assert_eq!(
        result.messages(ErrorCode::Validation, "name"),
        ["must not be empty"]
    );
}

#[test]
fn test_set_attributes_is_atomic() {
    let mut result = OperationResult::new();
    let mut customer = Customer::create_from_dto(
        [("name", Value::from("ada")), ("age", Value::from(36))],
        RecordPath::root(),
        &mut result,
    )
    .unwrap();

    // One good candidate, one bad: neither may land.
    let changed = customer.set_attributes(
        [("name", Value::from("grace")), ("age", Value::from("old"))],
        &mut result,
    );

    assert!(!changed);
    assert!(result.has_errors());
    assert_eq!(customer.attribute("name"), Some(&Value::from("ada")));
    assert_eq!(customer.attribute("age"), Some(&Value::Int(36)));
}

#[test]
fn test_set_attributes_succeeds_on_clean_batch() {
    let mut result = OperationResult::new();
    let mut customer = Customer::create_from_dto(
        [("name", Value::from("ada"))],
        RecordPath::root(),
        &mut result,
    )
    .unwrap();

    assert!(customer.set_attributes([("age", Value::from(40))], &mut result));
    assert!(result.is_success());
    assert_eq!(customer.attribute("age"), Some(&Value::Int(40)));
}

#[test]
fn test_pre_existing_errors_do_not_block_commit() {
    let mut result = OperationResult::new();
    result.add_error(ErrorCode::NotFound, "elsewhere", "earlier failure");

    let customer = Customer::create_from_dto(
        [("name", Value::from("ada"))],
        RecordPath::root(),
        &mut result,
    );

    assert!(customer.is_some());
}

#[test]
fn test_nested_record_construction() {
    let mut result = OperationResult::new();

    let customer = Customer::create_from_dto(
        [
            ("name", Value::from("ada")),
            ("address", Value::map([("city", "  london  ")])),
        ],
        RecordPath::root(),
        &mut result,
    )
    .unwrap();

    assert!(result.is_success());

    let address = customer
        .attribute("address")
        .and_then(Value::as_record)
        .and_then(|r| r.downcast_ref::<Address>())
        .unwrap();
    assert_eq!(address.attribute("city"), Some(&Value::from("london")));
    assert_eq!(address.record_path().as_str(), "address");
}

#[test]
fn test_nested_failure_keys_and_parent_error() {
    let mut result = OperationResult::new();

    let customer = Customer::create_from_dto(
        [
            ("name", Value::from("ada")),
            ("address", Value::map([("city", "   ")])),
        ],
        RecordPath::root(),
        &mut result,
    );

    assert!(customer.is_none());
    assert_eq!(
        result.messages(ErrorCode::Validation, "address.city"),
        ["must not be empty"]
    );
    assert_eq!(
        result.messages(ErrorCode::Validation, "address"),
        ["invalid 'address' record"]
    );
}

#[test]
fn test_nested_type_mismatch() {
    let mut result = OperationResult::new();

    let customer = Customer::create_from_dto(
        [("name", Value::from("ada")), ("address", Value::from(7))],
        RecordPath::root(),
        &mut result,
    );

    assert!(customer.is_none());
    assert_eq!(
        result.messages(ErrorCode::Validation, "address"),
        ["must be a 'address' record, got int"]
    );
}

#[test]
fn test_dto_round_trip_preserves_attributes() {
    let mut result = OperationResult::new();

    let customer = Customer::create_from_dto(
        [
            ("name", Value::from("ada")),
            ("age", Value::from(36)),
            ("address", Value::map([("city", "london"), ("zip", "N1")])),
        ],
        RecordPath::root(),
        &mut result,
    )
    .unwrap();

    let dto = customer.to_dto();
    let copy = Customer::create_from_dto(dto, RecordPath::root(), &mut result).unwrap();

    assert!(result.is_success());
    assert_eq!(copy.get_attributes(), customer.get_attributes());
}

#[test]
fn test_partial_dto_is_a_work_set() {
    let mut result = OperationResult::new();
    let customer = Customer::create_from_dto(
        [("name", Value::from("ada")), ("age", Value::from(36))],
        RecordPath::root(),
        &mut result,
    )
    .unwrap();

    let partial = customer.to_partial_dto(&["age", "bogus"]);
    assert_eq!(partial.keys().collect::<Vec<_>>(), ["age"]);
    assert_eq!(partial.get("age"), Some(&Value::Int(36)));

    let subset = customer.get_attributes_for(&["name"]);
    assert_eq!(subset.len(), 1);
    assert_eq!(subset["name"], Value::from("ada"));
}

#[test]
fn test_unset_attributes_read_as_null() {
    let mut result = OperationResult::new();
    let customer = Customer::create_from_dto(
        [("name", Value::from("ada"))],
        RecordPath::root(),
        &mut result,
    )
    .unwrap();

    let attrs = customer.get_attributes();
    assert_eq!(attrs["age"], Value::Null);
    assert_eq!(customer.attribute("age"), None);
    assert_eq!(customer.attribute("unknown"), None);
}

#[test]
fn test_value_kind_fills_defaults_at_creation_only() {
    let mut result = OperationResult::new();

    let record = Defaulted::create_from_dto(
        [("label", Value::from("x"))],
        RecordPath::root(),
        &mut result,
    )
    .unwrap();

    assert_eq!(record.attribute("count"), Some(&Value::Int(0)));

    // Updates never re-fill defaults.
    let mut record = record;
    assert!(record.set_attributes([("count", Value::from(9))], &mut result));
    assert!(record.set_attributes([("label", Value::from("y"))], &mut result));
    assert_eq!(record.attribute("count"), Some(&Value::Int(9)));
}
