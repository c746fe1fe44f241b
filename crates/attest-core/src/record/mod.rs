pub mod dto;
mod entity;
mod valid;

#[cfg(test)]
mod tests;

pub use valid::ValidRecord;

use crate::{path::RecordPath, spec::AttributeSpec, value::Value};
use std::collections::BTreeMap;

///
/// RecordKind
///
/// Which engine semantics a record type gets. The three kinds form a
/// ladder: `Value` adds creation-time default filling to `Basic`, and
/// `Entity` further adds read-only exclusion, generators, and accessor
/// transforms.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RecordKind {
    /// Validate-then-assign only.
    Basic,
    /// Defaults are filled at creation.
    Value,
    /// Defaults, read-only exclusion, generators, getters and setters,
    /// primary-key metadata.
    Entity,
}

impl RecordKind {
    #[must_use]
    pub(crate) const fn fills_defaults(self) -> bool {
        matches!(self, Self::Value | Self::Entity)
    }

    #[must_use]
    pub(crate) const fn entity_semantics(self) -> bool {
        matches!(self, Self::Entity)
    }
}

///
/// Attributes
///
/// Record-internal attribute storage: the record's position in the
/// containment tree, fixed at construction, plus the values committed so
/// far. Only the engine can construct or mutate one, which is what makes a
/// record either fully validated or nonexistent.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attributes {
    path: RecordPath,
    values: BTreeMap<&'static str, Value>,
}

impl Attributes {
    pub(crate) fn new(path: RecordPath) -> Self {
        Self {
            path,
            values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn path(&self) -> &RecordPath {
        &self.path
    }

    /// Raw stored value; `None` when unset.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub(crate) fn insert(&mut self, name: &'static str, value: Value) {
        self.values.insert(name, value);
    }
}

///
/// RecordStorage
///
/// Storage plumbing between a concrete record struct and the engine.
/// Generated by [`record_storage!`]; not meant to be hand-written.
///

pub trait RecordStorage {
    fn from_attributes(attributes: Attributes) -> Self;
    fn attributes(&self) -> &Attributes;
    fn attributes_mut(&mut self) -> &mut Attributes;
}

///
/// AbstractRecord
///
/// The single per-type declaration: a name, an engine kind, and the
/// attribute specifications. Resolution of the declaration is memoized per
/// type for the process lifetime.
///
/// Declared attributes are readable through [`ValidRecord::attribute`] and
/// friends; storage is never publicly writable, so every observable record
/// went through the validate-then-assign path.
///

pub trait AbstractRecord:
    RecordStorage + Clone + std::fmt::Debug + PartialEq + Send + Sync + Sized + 'static
{
    const NAME: &'static str;
    const KIND: RecordKind = RecordKind::Basic;

    /// When true (the default), unkeyed inline validators are a
    /// configuration error.
    const STRICT_VALIDATOR_KEYS: bool = true;

    /// Attribute specifications in declaration order.
    fn specifications() -> Vec<AttributeSpec>;
}

///
/// record_storage
///
/// Define a record struct and wire its storage:
///
/// ```ignore
/// record_storage!(pub struct Phone);
///
/// impl AbstractRecord for Phone { /* name, kind, specifications */ }
/// ```
///

#[macro_export]
macro_rules! record_storage {
    ($(#[$meta:meta])* $vis:vis struct $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        $vis struct $name {
            attributes: $crate::record::Attributes,
        }

        impl $crate::record::RecordStorage for $name {
            fn from_attributes(attributes: $crate::record::Attributes) -> Self {
                Self { attributes }
            }

            fn attributes(&self) -> &$crate::record::Attributes {
                &self.attributes
            }

            fn attributes_mut(&mut self) -> &mut $crate::record::Attributes {
                &mut self.attributes
            }
        }
    };
}
