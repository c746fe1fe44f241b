//! Pepper installation gets its own binary: the pepper is process-wide,
//! so it must be set before any hash is computed in this process.

use attest::{prelude::*, vo::set_pepper};

#[test]
fn pepper_installs_once_and_hashes_stay_verifiable() {
    assert!(set_pepper(b"integration pepper".to_vec()));
    assert!(!set_pepper(b"second pepper".to_vec()));

    let mut result = OperationResult::new();
    let password = Password::new("Guest password", &mut result).unwrap();

    assert!(Password::verify(Some("Guest password"), password.hash()));
    assert!(!Password::verify(Some("other"), password.hash()));
}
