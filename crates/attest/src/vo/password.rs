use argon2::{
    Argon2, PasswordHasher, PasswordVerifier,
    password_hash::{PasswordHash, SaltString, rand_core::OsRng},
};
use attest_core::{
    path::RecordPath,
    record::{AbstractRecord, RecordKind, ValidRecord},
    record_storage,
    result::OperationResult,
    spec::{AttributeContext, AttributeSpec},
    value::Value,
};
use hmac::{Hmac, Mac};
use sha2::Sha512;
use std::sync::{LazyLock, OnceLock};

type HmacSha512 = Hmac<Sha512>;

const DEFAULT_PEPPER: &[u8] = b"attest.password.pepper.v1";
const DUMMY_PASSWORD: &str = "attest dummy password";
const DUMMY_HASH_ANCHOR: &str = "attest dummy hash anchor";

static PEPPER: OnceLock<Vec<u8>> = OnceLock::new();

// The dummy hash anchors a different plaintext than the dummy password, so
// the substituted comparison in `verify` always fails.
static DUMMY_HASH: LazyLock<String> =
    LazyLock::new(|| hash_text(DUMMY_HASH_ANCHOR).unwrap_or_default());

/// Install the process-wide pepper mixed into every pre-hash. First caller
/// wins; returns false if a pepper was already installed. Deployments
/// should call this once at startup instead of relying on the built-in
/// development pepper.
pub fn set_pepper(pepper: impl Into<Vec<u8>>) -> bool {
    PEPPER.set(pepper.into()).is_ok()
}

fn pepper() -> &'static [u8] {
    PEPPER.get().map_or(DEFAULT_PEPPER, Vec::as_slice)
}

fn pre_hash_text(plain: &str) -> String {
    let mut mac = HmacSha512::new_from_slice(pepper()).expect("hmac accepts any key length");
    mac.update(plain.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn hash_text(plain: &str) -> Option<String> {
    let pre = pre_hash_text(plain);
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(pre.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .ok()
}

record_storage!(
    /// A stored password. The `hash` attribute chain turns the supplied
    /// plaintext into a peppered HMAC-SHA-512 pre-hash and then an
    /// Argon2id PHC string, so a created record never holds plaintext.
    ///
    /// The chain is intentionally not idempotent: re-running it over an
    /// already-hashed value hashes the hash. Route changes through
    /// [`Password::new`] with the new plaintext rather than re-validating
    /// stored output.
    pub struct Password
);

impl AbstractRecord for Password {
    const NAME: &'static str = "password";
    const KIND: RecordKind = RecordKind::Value;

    fn specifications() -> Vec<AttributeSpec> {
        vec![
            AttributeSpec::new("hash")
                .validator("not_empty")
                .validator_fn("pre_hash", pre_hash)
                .validator_fn("argon2_hash", argon2_hash),
        ]
    }
}

impl Password {
    /// Hash `plain` through the full chain and wrap it.
    #[must_use]
    pub fn new(plain: &str, result: &mut OperationResult) -> Option<Self> {
        Self::create_from_dto([("hash", plain)], RecordPath::root(), result)
    }

    /// The stored PHC hash string.
    #[must_use]
    pub fn hash(&self) -> Option<&str> {
        self.attribute("hash").and_then(Value::as_str)
    }

    /// Check a candidate against a stored hash.
    ///
    /// Absent, empty, or malformed input is replaced by a fixed dummy
    /// password and dummy hash before comparing, so the Argon2 comparison
    /// runs either way and the caller's timing does not reveal whether an
    /// account exists. Always false for substituted input.
    #[must_use]
    pub fn verify(candidate: Option<&str>, stored: Option<&str>) -> bool {
        let supplied = match (candidate, stored) {
            (Some(plain), Some(hash)) if !plain.is_empty() && !hash.is_empty() => {
                Some((plain, hash))
            }
            _ => None,
        };

        let (plain, hash) = supplied.unwrap_or((DUMMY_PASSWORD, DUMMY_HASH.as_str()));

        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(_) => match PasswordHash::new(&DUMMY_HASH) {
                Ok(parsed) => parsed,
                Err(_) => return false,
            },
        };

        let pre = pre_hash_text(plain);
        let matched = Argon2::default()
            .verify_password(pre.as_bytes(), &parsed)
            .is_ok();

        matched && supplied.is_some()
    }

    /// Direct comparison against this record's hash.
    ///
    /// Weaker than [`Password::verify`]: malformed state returns early, so
    /// it makes no timing claim. Prefer `verify` on authentication paths.
    #[must_use]
    pub fn is_equal(&self, plain: &str) -> bool {
        let Some(hash) = self.hash() else {
            return false;
        };
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(pre_hash_text(plain).as_bytes(), &parsed)
            .is_ok()
    }
}

fn pre_hash(value: &mut Value, ctx: &mut AttributeContext<'_>) -> bool {
    match value.as_str().map(pre_hash_text) {
        Some(pre) => {
            *value = Value::Text(pre);
            true
        }
        None => {
            ctx.fail("must be a string");
            false
        }
    }
}

fn argon2_hash(value: &mut Value, ctx: &mut AttributeContext<'_>) -> bool {
    let hashed = value.as_str().and_then(|pre| {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(pre.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .ok()
    });

    match hashed {
        Some(hash) => {
            *value = Value::Text(hash);
            true
        }
        None => {
            ctx.fail("could not be hashed");
            false
        }
    }
}

///
/// TESTS
///
