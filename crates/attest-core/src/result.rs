use crate::path::RecordPath;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

///
/// ErrorCode
///
/// Stable operation-outcome classification shared with callers.
/// The integer values are part of the external contract and must not change.
///

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[repr(i8)]
pub enum ErrorCode {
    Undefined = -1,
    Success = 0,
    InputData = 1,
    AccessDenied = 2,
    Validation = 3,
    NotFound = 4,
    AlreadyExists = 5,
}

impl ErrorCode {
    /// The stable integer form of this code.
    #[must_use]
    pub const fn code(self) -> i8 {
        self as i8
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Undefined => "undefined",
            Self::Success => "success",
            Self::InputData => "input_data",
            Self::AccessDenied => "access_denied",
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::AlreadyExists => "already_exists",
        };
        write!(f, "{label}")
    }
}

impl TryFrom<i8> for ErrorCode {
    type Error = i8;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Undefined),
            0 => Ok(Self::Success),
            1 => Ok(Self::InputData),
            2 => Ok(Self::AccessDenied),
            3 => Ok(Self::Validation),
            4 => Ok(Self::NotFound),
            5 => Ok(Self::AlreadyExists),
            other => Err(other),
        }
    }
}

///
/// OperationResult
///
/// Caller-owned error accumulator threaded by mutable reference through an
/// entire validate-then-assign call graph. Records never own one.
///
/// Messages are grouped by code, then by the path-qualified attribute name,
/// preserving insertion order within a key.
///

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    errors: BTreeMap<ErrorCode, BTreeMap<String, Vec<String>>>,
}

impl OperationResult {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    /// Record one message under `code`, keyed by `key`.
    ///
    /// Messages recorded under [`ErrorCode::Success`] are kept for
    /// diagnostics but never count as errors.
    pub fn add_error(&mut self, code: ErrorCode, key: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(code)
            .or_default()
            .entry(key.into())
            .or_default()
            .push(message.into());
    }

    /// True iff no message was recorded under a non-success code.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errors.keys().all(|code| code.is_success())
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.is_success()
    }

    /// Number of messages recorded under non-success codes.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors
            .iter()
            .filter(|(code, _)| !code.is_success())
            .flat_map(|(_, keyed)| keyed.values())
            .map(Vec::len)
            .sum()
    }

    #[must_use]
    pub const fn errors(&self) -> &BTreeMap<ErrorCode, BTreeMap<String, Vec<String>>> {
        &self.errors
    }

    /// Messages recorded for one `(code, key)` pair, in insertion order.
    #[must_use]
    pub fn messages(&self, code: ErrorCode, key: &str) -> &[String] {
        self.errors
            .get(&code)
            .and_then(|keyed| keyed.get(key))
            .map_or(&[], Vec::as_slice)
    }

    /// Keys that hold at least one message under `code`.
    pub fn keys(&self, code: ErrorCode) -> impl Iterator<Item = &str> {
        self.errors
            .get(&code)
            .into_iter()
            .flat_map(|keyed| keyed.keys().map(String::as_str))
    }

    /// Render the fully-qualified error key for an attribute at `path`.
    #[must_use]
    pub fn full_name(path: &RecordPath, attribute: &str) -> String {
        path.qualify(attribute)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ErrorCode::Undefined.code(), -1);
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::InputData.code(), 1);
        assert_eq!(ErrorCode::AccessDenied.code(), 2);
        assert_eq!(ErrorCode::Validation.code(), 3);
        assert_eq!(ErrorCode::NotFound.code(), 4);
        assert_eq!(ErrorCode::AlreadyExists.code(), 5);
    }

    #[test]
    fn test_code_round_trip() {
        for code in [
            ErrorCode::Undefined,
            ErrorCode::Success,
            ErrorCode::InputData,
            ErrorCode::AccessDenied,
            ErrorCode::Validation,
            ErrorCode::NotFound,
            ErrorCode::AlreadyExists,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
        assert_eq!(ErrorCode::try_from(42), Err(42));
    }

    #[test]
    fn test_empty_result_is_success() {
        let result = OperationResult::new();
        assert!(result.is_success());
        assert!(!result.has_errors());
        assert_eq!(result.error_count(), 0);
    }

    #[test]
    fn test_success_messages_do_not_count_as_errors() {
        let mut result = OperationResult::new();
        result.add_error(ErrorCode::Success, "info", "created");
        assert!(result.is_success());
        assert_eq!(result.error_count(), 0);
    }

    #[test]
    fn test_errors_accumulate_in_order() {
        let mut result = OperationResult::new();
        result.add_error(ErrorCode::Validation, "code", "first");
        result.add_error(ErrorCode::Validation, "code", "second");
        result.add_error(ErrorCode::Validation, "number", "third");

        assert!(result.has_errors());
        assert_eq!(result.error_count(), 3);
        assert_eq!(result.messages(ErrorCode::Validation, "code"), ["first", "second"]);
        assert_eq!(
            result.keys(ErrorCode::Validation).collect::<Vec<_>>(),
            ["code", "number"]
        );
    }

    #[test]
    fn test_full_name_qualifies_by_path() {
        let root = RecordPath::root();
        assert_eq!(OperationResult::full_name(&root, "code"), "code");

        let nested = root.child("address");
        assert_eq!(OperationResult::full_name(&nested, "city"), "address.city");
    }
}
