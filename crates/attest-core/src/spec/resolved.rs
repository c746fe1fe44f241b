use crate::{
    base,
    error::SpecError,
    record::{AbstractRecord, RecordKind},
    spec::{
        AttributeOptions, AttributeSpec, DefaultSpec, GeneratorFn, GetterFn, NestedSpec, SetterFn,
        ValidatorFn, ValidatorRef,
    },
};
use std::collections::BTreeMap;

///
/// ResolvedValidator
///
/// One resolved link of a validator chain: the declaration reference turned
/// into a uniform keyed function pointer.
///

#[derive(Clone, Debug)]
pub struct ResolvedValidator {
    pub key: String,
    pub func: ValidatorFn,
}

///
/// ResolvedAttribute
///

#[derive(Clone, Debug)]
pub struct ResolvedAttribute {
    pub name: &'static str,
    pub validators: Vec<ResolvedValidator>,
    pub nested: Option<NestedSpec>,
    pub default: Option<DefaultSpec>,
    pub getter: Option<GetterFn>,
    pub setter: Option<SetterFn>,
    pub generator: Option<GeneratorFn>,
    pub options: AttributeOptions,
}

///
/// ResolvedSpec
///
/// The uniform per-type tables derived once from a record type's single
/// declaration and memoized for the process lifetime. Declaration order is
/// preserved and drives every batch iteration.
///

#[derive(Clone, Debug)]
pub struct ResolvedSpec {
    record: &'static str,
    kind: RecordKind,
    order: Vec<&'static str>,
    attributes: BTreeMap<&'static str, ResolvedAttribute>,
    primary_key: Option<&'static str>,
}

impl ResolvedSpec {
    pub(crate) fn resolve<R: AbstractRecord>() -> Result<Self, SpecError> {
        Self::build(
            R::NAME,
            R::KIND,
            R::STRICT_VALIDATOR_KEYS,
            R::specifications(),
        )
    }

    /// Turn one declaration into resolved tables, or fail with the first
    /// configuration error encountered.
    pub(crate) fn build(
        record: &'static str,
        kind: RecordKind,
        strict_keys: bool,
        specifications: Vec<AttributeSpec>,
    ) -> Result<Self, SpecError> {
        let mut order = Vec::with_capacity(specifications.len());
        let mut attributes = BTreeMap::new();
        let mut primary_key: Option<&'static str> = None;

        for spec in specifications {
            let name = spec.name;
            if attributes.contains_key(name) {
                return Err(SpecError::DuplicateAttribute {
                    record,
                    attribute: name,
                });
            }

            if spec.options.is_primary_key() {
                if let Some(first) = primary_key {
                    return Err(SpecError::MultiplePrimaryKeys {
                        record,
                        first,
                        second: name,
                    });
                }
                primary_key = Some(name);
            }

            let validators = resolve_chain(record, name, strict_keys, &spec.validators)?;

            order.push(name);
            attributes.insert(
                name,
                ResolvedAttribute {
                    name,
                    validators,
                    nested: spec.nested,
                    default: spec.default,
                    getter: spec.getter,
                    setter: spec.setter,
                    generator: spec.generator,
                    options: spec.options,
                },
            );
        }

        Ok(Self {
            record,
            kind,
            order,
            attributes,
            primary_key,
        })
    }

    #[must_use]
    pub const fn record(&self) -> &'static str {
        self.record
    }

    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Attribute names in declaration order.
    #[must_use]
    pub fn order(&self) -> &[&'static str] {
        &self.order
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&ResolvedAttribute> {
        self.attributes.get(name)
    }

    #[must_use]
    pub fn declares(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Map an externally-supplied key onto the declared attribute name.
    #[must_use]
    pub(crate) fn canonical_name(&self, name: &str) -> Option<&'static str> {
        self.attributes.get(name).map(|attr| attr.name)
    }

    #[must_use]
    pub const fn primary_key(&self) -> Option<&'static str> {
        self.primary_key
    }

    /// Attributes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedAttribute> {
        self.order.iter().map(|name| &self.attributes[name])
    }
}

fn resolve_chain(
    record: &'static str,
    attribute: &'static str,
    strict_keys: bool,
    refs: &[ValidatorRef],
) -> Result<Vec<ResolvedValidator>, SpecError> {
    let mut chain = Vec::with_capacity(refs.len());

    for (index, reference) in refs.iter().enumerate() {
        let resolved = match reference {
            ValidatorRef::Named(name) => {
                let func = base::validator::lookup(name).ok_or(SpecError::UnknownValidator {
                    record,
                    attribute,
                    name: *name,
                })?;
                ResolvedValidator {
                    key: (*name).to_string(),
                    func,
                }
            }
            ValidatorRef::Inline {
                key: Some(key),
                func,
            } => ResolvedValidator {
                key: (*key).to_string(),
                func: *func,
            },
            ValidatorRef::Inline { key: None, func } => {
                if strict_keys {
                    return Err(SpecError::UnnamedValidator {
                        record,
                        attribute,
                        index,
                    });
                }
                ResolvedValidator {
                    key: format!("inline#{index}"),
                    func: *func,
                }
            }
        };

        chain.push(resolved);
    }

    Ok(chain)
}

///
/// TESTS
///
