use crate::{
    record::{Attributes, valid::Batch},
    spec::{ResolvedAttribute, ResolvedSpec},
    value::Value,
};

///
/// Entity batch shaping
///
/// The extra stages entity records add around the shared pipeline:
/// read-only protection, value generation, and accessor transforms.
///

/// Drop candidates whose read-only attribute already holds a non-null
/// value. This is deliberate shaping, not an error: the rest of the batch
/// proceeds and the call can still succeed.
pub(super) fn exclude_read_only(spec: &ResolvedSpec, attributes: &Attributes, batch: &mut Batch) {
    batch.retain(|name, _| {
        let locked = spec
            .attribute(name)
            .is_some_and(|attr| attr.options.is_read_only())
            && attributes
                .get(name)
                .is_some_and(|current| !current.is_null());

        if locked {
            tracing::debug!(
                record = spec.record(),
                attribute = *name,
                "dropping read-only attribute that is already set"
            );
        }

        !locked
    });
}

/// Invoke every declared generator, present in the batch or not. The
/// generator sees the candidate (or its absence) and produces the value
/// that will go through validation.
pub(super) fn generate(spec: &ResolvedSpec, batch: &mut Batch) {
    for attr in spec.iter() {
        if let Some(generator) = attr.generator {
            let value = generator(batch.get(attr.name));
            batch.insert(attr.name, value);
        }
    }
}

/// Assignment-time transform for one committed value.
pub(super) fn apply_setter(spec: &ResolvedSpec, name: &'static str, value: Value) -> Value {
    match spec.attribute(name).and_then(|attr| attr.setter) {
        Some(setter) => setter(value),
        None => value,
    }
}

/// Read-time transform for one stored value.
pub(super) fn apply_getter(attr: &ResolvedAttribute, value: Value) -> Value {
    match attr.getter {
        Some(getter) => getter(&value),
        None => value,
    }
}
