//! End-to-end scenarios over the shipped value objects.

use attest::{
    prelude::*,
    result::ErrorCode,
};

#[test]
fn phone_rejects_all_three_parts() {
    let mut result = OperationResult::new();

    let phone = Phone::new("ree", " 0  ", "123", &mut result);

    assert!(phone.is_none());
    assert!(result.has_errors());
    for key in ["country", "code", "number"] {
        assert_eq!(
            result.messages(ErrorCode::Validation, key).len(),
            1,
            "expected exactly one message for '{key}'"
        );
    }
}

#[test]
fn phone_normalizes_and_succeeds() {
    let mut result = OperationResult::new();

    let phone = Phone::new("+765", "   222   ", "1234567", &mut result).unwrap();

    assert!(result.is_success());
    assert_eq!(phone.code(), Some("222"));
    assert_eq!(phone.country(), Some("+765"));
    assert_eq!(phone.number(), Some("1234567"));
}

#[test]
fn phone_failure_assigns_nothing() {
    let mut result = OperationResult::new();
    let mut phone = Phone::new("+44", "20", "79460000", &mut result).unwrap();

    let changed = phone.set_attributes(
        [("code", Value::from("0")), ("number", Value::from("5550100"))],
        &mut result,
    );

    assert!(!changed);
    assert_eq!(phone.code(), Some("20"));
    assert_eq!(phone.number(), Some("79460000"));
}

#[test]
fn password_verify_accepts_the_right_plaintext() {
    let mut result = OperationResult::new();
    let guest = Password::new("Guest password", &mut result).unwrap();
    let hash = guest.hash().unwrap();

    assert!(Password::verify(Some("Guest password"), Some(hash)));
    assert!(!Password::verify(Some("password"), Some(hash)));
}

#[test]
fn password_verify_takes_the_dummy_path_for_bad_input() {
    let mut result = OperationResult::new();
    let guest = Password::new("Guest password", &mut result).unwrap();
    let hash = guest.hash().unwrap();

    // Absent, empty, and malformed input all run the substituted
    // comparison and come back false.
    assert!(!Password::verify(None, None));
    assert!(!Password::verify(None, Some(hash)));
    assert!(!Password::verify(Some("Guest password"), None));
    assert!(!Password::verify(Some(""), Some(hash)));
    assert!(!Password::verify(Some("Guest password"), Some("")));
    assert!(!Password::verify(Some("Guest password"), Some("not-a-phc-string")));
}

#[test]
fn password_hashes_are_salted() {
    let mut result = OperationResult::new();
    let first = Password::new("Guest password", &mut result).unwrap();
    let second = Password::new("Guest password", &mut result).unwrap();

    // Same plaintext, different salts, both verifiable.
    assert_ne!(first.hash(), second.hash());
    assert!(Password::verify(Some("Guest password"), first.hash()));
    assert!(Password::verify(Some("Guest password"), second.hash()));
}
