use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// RecordPath
///
/// Dot-delimited position of a record within a containment tree, fixed at
/// construction. Used to qualify error keys so that nested-record messages
/// land at `parent.child.attribute` rather than colliding with the parent's
/// own attributes.
///

#[derive(Clone, Debug, Default, Display, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct RecordPath(String);

impl RecordPath {
    pub const DELIMITER: char = '.';

    /// The empty root path. Attributes of a root record qualify to their
    /// bare names.
    #[must_use]
    pub const fn root() -> Self {
        Self(String::new())
    }

    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Derive the path of a nested record held by `attribute`.
    #[must_use]
    pub fn child(&self, attribute: &str) -> Self {
        Self(self.qualify(attribute))
    }

    /// Render the fully-qualified key for an attribute at this path.
    #[must_use]
    pub fn qualify(&self, attribute: &str) -> String {
        if self.0.is_empty() {
            attribute.to_string()
        } else {
            let mut out = String::with_capacity(self.0.len() + 1 + attribute.len());
            out.push_str(&self.0);
            out.push(Self::DELIMITER);
            out.push_str(attribute);
            out
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for RecordPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

///
/// TESTS
///
