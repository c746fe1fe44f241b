use crate::{
    path::RecordPath,
    result::{ErrorCode, OperationResult},
};

///
/// AttributeContext
///
/// Narrow reporting surface handed to each validator: the attribute under
/// validation, the owning record's path, and the caller's result sink.
/// Failures are keyed by the path-qualified attribute name.
///

pub struct AttributeContext<'a> {
    attribute: &'static str,
    path: &'a RecordPath,
    result: &'a mut OperationResult,
}

impl<'a> AttributeContext<'a> {
    pub(crate) fn new(
        attribute: &'static str,
        path: &'a RecordPath,
        result: &'a mut OperationResult,
    ) -> Self {
        Self {
            attribute,
            path,
            result,
        }
    }

    #[must_use]
    pub const fn attribute(&self) -> &'static str {
        self.attribute
    }

    #[must_use]
    pub const fn path(&self) -> &RecordPath {
        self.path
    }

    /// Record one validation message against this attribute.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.result.add_error(
            ErrorCode::Validation,
            self.path.qualify(self.attribute),
            message,
        );
    }
}

///
/// TESTS
///
