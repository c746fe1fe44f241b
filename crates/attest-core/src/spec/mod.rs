mod context;
mod registry;
mod resolved;

pub use context::AttributeContext;
pub use registry::try_spec;
pub(crate) use registry::expect_spec;
pub use resolved::{ResolvedAttribute, ResolvedSpec, ResolvedValidator};

use crate::{
    path::RecordPath,
    record::{ValidRecord, dto::RecordValue},
    result::OperationResult,
    value::Value,
};
use std::{any::TypeId, collections::BTreeMap, ops::BitOr};

///
/// Function shapes
///
/// Every heterogeneous reference a declaration may carry is resolved once
/// into one of these uniform function-pointer shapes.
///

/// One link of a validator chain. May normalize the value in place even on
/// success; on failure it reports exactly one message through the context
/// and returns false.
pub type ValidatorFn = fn(&mut Value, &mut AttributeContext<'_>) -> bool;

/// Transforms a stored value on read (`get_attributes`, DTO conversion).
pub type GetterFn = fn(&Value) -> Value;

/// Transforms a validated value at assignment time.
pub type SetterFn = fn(Value) -> Value;

/// Produces the value to validate from the candidate (or its absence).
/// Invoked unconditionally for entity records, batch or no batch.
pub type GeneratorFn = fn(Option<&Value>) -> Value;

/// Zero-argument default provider, invoked once per creation.
pub type DefaultFn = fn() -> Value;

///
/// ValidatorRef
///
/// A validator reference as written in a declaration: either a name looked
/// up in the base registry, or an inline function. Inline functions must
/// carry a key unless the record disables strict naming.
///

#[derive(Clone, Debug)]
pub enum ValidatorRef {
    Named(&'static str),
    Inline {
        key: Option<&'static str>,
        func: ValidatorFn,
    },
}

///
/// DefaultSpec
///

#[derive(Clone, Debug)]
pub enum DefaultSpec {
    Literal(Value),
    Provider(DefaultFn),
}

impl DefaultSpec {
    pub(crate) fn resolve(&self) -> Value {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Provider(provider) => provider(),
        }
    }
}

///
/// AttributeOptions
///
/// Option flags carried by one attribute specification.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AttributeOptions(u8);

impl AttributeOptions {
    pub const NONE: Self = Self(0);
    pub const READ_ONLY: Self = Self(1);
    pub const PRIMARY_KEY: Self = Self(1 << 1);

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn is_read_only(self) -> bool {
        self.contains(Self::READ_ONLY)
    }

    #[must_use]
    pub const fn is_primary_key(self) -> bool {
        self.contains(Self::PRIMARY_KEY)
    }
}

impl BitOr for AttributeOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

///
/// NestedSpec
///
/// The `class` part of an attribute specification: a typed factory used by
/// the prepare stage to construct nested records through their own creation
/// path.
///

#[derive(Clone, Copy, Debug)]
pub struct NestedSpec {
    pub(crate) name: &'static str,
    pub(crate) type_id: TypeId,
    pub(crate) create:
        fn(BTreeMap<String, Value>, RecordPath, &mut OperationResult) -> Option<RecordValue>,
}

impl NestedSpec {
    #[must_use]
    pub fn of<R: ValidRecord>() -> Self {
        Self {
            name: R::NAME,
            type_id: TypeId::of::<R>(),
            create: create_nested::<R>,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

fn create_nested<R: ValidRecord>(
    map: BTreeMap<String, Value>,
    path: RecordPath,
    result: &mut OperationResult,
) -> Option<RecordValue> {
    R::create_from_dto(map, path, result).map(RecordValue::new)
}

///
/// AttributeSpec
///
/// Declarative metadata for one attribute. A record type declares all of
/// its attributes in one place; recognized parts are the ordered validator
/// chain, a nested record class, a default, entity accessors, and option
/// flags. Anything not declared is absent and a no-op.
///

#[derive(Clone, Debug)]
pub struct AttributeSpec {
    pub(crate) name: &'static str,
    pub(crate) validators: Vec<ValidatorRef>,
    pub(crate) nested: Option<NestedSpec>,
    pub(crate) default: Option<DefaultSpec>,
    pub(crate) getter: Option<GetterFn>,
    pub(crate) setter: Option<SetterFn>,
    pub(crate) generator: Option<GeneratorFn>,
    pub(crate) options: AttributeOptions,
}

impl AttributeSpec {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            validators: Vec::new(),
            nested: None,
            default: None,
            getter: None,
            setter: None,
            generator: None,
            options: AttributeOptions::NONE,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Append a named validator resolved against the base registry.
    #[must_use]
    pub fn validator(mut self, name: &'static str) -> Self {
        self.validators.push(ValidatorRef::Named(name));
        self
    }

    /// Append a keyed inline validator.
    #[must_use]
    pub fn validator_fn(mut self, key: &'static str, func: ValidatorFn) -> Self {
        self.validators.push(ValidatorRef::Inline {
            key: Some(key),
            func,
        });
        self
    }

    /// Append an unkeyed inline validator. Rejected at resolution time
    /// unless the record disables strict validator naming.
    #[must_use]
    pub fn validator_inline(mut self, func: ValidatorFn) -> Self {
        self.validators.push(ValidatorRef::Inline { key: None, func });
        self
    }

    /// Declare the nested record class constructed by the prepare stage.
    #[must_use]
    pub fn nested<R: ValidRecord>(mut self) -> Self {
        self.nested = Some(NestedSpec::of::<R>());
        self
    }

    /// Literal default applied when the attribute is absent at creation.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultSpec::Literal(value.into()));
        self
    }

    /// Computed default, invoked once per creation.
    #[must_use]
    pub fn default_with(mut self, provider: DefaultFn) -> Self {
        self.default = Some(DefaultSpec::Provider(provider));
        self
    }

    /// Read transform, applied by entity records on attribute reads.
    #[must_use]
    pub fn getter(mut self, getter: GetterFn) -> Self {
        self.getter = Some(getter);
        self
    }

    /// Assignment transform, applied by entity records at commit.
    #[must_use]
    pub fn setter(mut self, setter: SetterFn) -> Self {
        self.setter = Some(setter);
        self
    }

    /// Value generator, invoked unconditionally by entity records before
    /// validation.
    #[must_use]
    pub fn generator(mut self, generator: GeneratorFn) -> Self {
        self.generator = Some(generator);
        self
    }

    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.options = self.options | AttributeOptions::READ_ONLY;
        self
    }

    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.options = self.options | AttributeOptions::PRIMARY_KEY;
        self
    }
}

///
/// TESTS
///
