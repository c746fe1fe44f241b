use crate::{
    path::RecordPath,
    record::{
        AbstractRecord, Attributes, entity,
        dto::Dto,
    },
    result::{ErrorCode, OperationResult},
    spec::{AttributeContext, ResolvedAttribute, ResolvedSpec, expect_spec},
    value::Value,
};
use std::collections::BTreeMap;

/// The candidate set moved through the pipeline, keyed by declared name.
pub(crate) type Batch = BTreeMap<&'static str, Value>;

#[derive(Clone, Copy, Eq, PartialEq)]
enum Mode {
    Create,
    Update,
}

///
/// ValidRecord
///
/// The validate-then-assign engine, available on every record type.
///
/// Every mutation runs the same pipeline: narrow the candidate batch to
/// declared attributes, shape it (defaults, read-only exclusion,
/// generators), prepare nested records, validate every candidate, and
/// commit the whole batch only if nothing failed. Partial failure never
/// produces partial mutation.
///
/// These methods panic if the record type's attribute specifications are
/// invalid; see [`try_spec`](crate::spec::try_spec) for the inspectable
/// form.
///

pub trait ValidRecord: AbstractRecord {
    /// Create a record from a DTO or plain mapping.
    ///
    /// Returns `None` — and leaves the reasons in `result` — if any
    /// candidate attribute fails; a partially-constructed record is never
    /// observable.
    fn create_from_dto(
        input: impl Into<Dto>,
        path: RecordPath,
        result: &mut OperationResult,
    ) -> Option<Self> {
        let spec = expect_spec::<Self>();
        let mut attributes = Attributes::new(path);

        run(spec, &mut attributes, input.into(), result, Mode::Create)
            .then(|| Self::from_attributes(attributes))
    }

    /// Re-run the pipeline over a candidate subset of attributes.
    ///
    /// On failure nothing changes and `false` is returned.
    fn set_attributes(&mut self, input: impl Into<Dto>, result: &mut OperationResult) -> bool {
        let spec = expect_spec::<Self>();
        run(spec, self.attributes_mut(), input.into(), result, Mode::Update)
    }

    /// Raw stored value of one declared attribute. `None` for unknown or
    /// unset attributes; entity getters are not applied here.
    fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes().get(name)
    }

    fn record_path(&self) -> &RecordPath {
        self.attributes().path()
    }

    /// The value of the attribute flagged as primary key, if any.
    fn primary_key(&self) -> Option<&Value> {
        expect_spec::<Self>()
            .primary_key()
            .and_then(|name| self.attributes().get(name))
    }

    /// Every declared attribute in declaration order, unset attributes
    /// reading as `Null`. Entity getters are applied.
    fn get_attributes(&self) -> BTreeMap<&'static str, Value> {
        read_view(expect_spec::<Self>(), self.attributes(), None)
    }

    /// Like [`get_attributes`](Self::get_attributes), restricted to a
    /// subset; names not declared are skipped.
    fn get_attributes_for(&self, subset: &[&str]) -> BTreeMap<&'static str, Value> {
        read_view(expect_spec::<Self>(), self.attributes(), Some(subset))
    }

    /// Non-destructive conversion to the DTO form: declaration order,
    /// getters applied, nested records recursively converted.
    fn to_dto(&self) -> Dto {
        dto_view(expect_spec::<Self>(), self.attributes(), None)
    }

    /// Partial DTO restricted to `subset`; names not declared are skipped.
    fn to_partial_dto(&self, subset: &[&str]) -> Dto {
        dto_view(expect_spec::<Self>(), self.attributes(), Some(subset))
    }
}

impl<R: AbstractRecord> ValidRecord for R {}

// ============================================================================
// Pipeline
// ============================================================================

fn run(
    spec: &ResolvedSpec,
    attributes: &mut Attributes,
    input: Dto,
    result: &mut OperationResult,
    mode: Mode,
) -> bool {
    let errors_before = result.error_count();

    let mut batch = narrow(spec, input);

    if mode == Mode::Create && spec.kind().fills_defaults() {
        fill_defaults(spec, &mut batch);
    }
    if spec.kind().entity_semantics() {
        entity::exclude_read_only(spec, attributes, &mut batch);
    }

    prepare(spec, attributes.path(), &mut batch, result);

    if spec.kind().entity_semantics() {
        entity::generate(spec, &mut batch);
    }

    let chains_passed = validate(spec, attributes.path(), &mut batch, result);

    if !chains_passed || result.error_count() > errors_before {
        return false;
    }

    commit(spec, attributes, batch);
    true
}

/// Keep only declared attributes; unknown keys are silently dropped.
fn narrow(spec: &ResolvedSpec, input: Dto) -> Batch {
    let mut batch = Batch::new();

    for (key, value) in input {
        if let Some(name) = spec.canonical_name(&key) {
            batch.insert(name, value);
        } else {
            tracing::debug!(
                record = spec.record(),
                attribute = %key,
                "dropping unknown attribute"
            );
        }
    }

    batch
}

/// Fill attributes absent from a creation batch with their resolved
/// default. Providers are invoked exactly once per creation.
fn fill_defaults(spec: &ResolvedSpec, batch: &mut Batch) {
    for attr in spec.iter() {
        if batch.contains_key(attr.name) {
            continue;
        }
        if let Some(default) = &attr.default {
            batch.insert(attr.name, default.resolve());
        }
    }
}

/// Construct nested records for every candidate with a class
/// specification. A failed construction removes the candidate and records
/// one error on the parent attribute; sibling candidates keep processing.
fn prepare(spec: &ResolvedSpec, path: &RecordPath, batch: &mut Batch, result: &mut OperationResult) {
    let mut dropped: Vec<&'static str> = Vec::new();

    for (&name, value) in batch.iter_mut() {
        let Some(nested) = spec.attribute(name).and_then(|attr| attr.nested.as_ref()) else {
            continue;
        };

        // Already an instance of the declared class.
        if value
            .as_record()
            .is_some_and(|record| record.type_id() == nested.type_id)
        {
            continue;
        }

        // Null stays in the batch; the validator chain decides on it.
        if value.is_null() {
            continue;
        }

        match std::mem::replace(value, Value::Null) {
            Value::Map(map) => {
                let child_path = path.child(name);
                if let Some(record) = (nested.create)(map, child_path, result) {
                    *value = Value::Record(record);
                } else {
                    // Nested messages are already in the result at their
                    // qualified paths; the parent attribute gets one error.
                    result.add_error(
                        ErrorCode::Validation,
                        path.qualify(name),
                        format!("invalid '{}' record", nested.name),
                    );
                    dropped.push(name);
                }
            }
            other => {
                result.add_error(
                    ErrorCode::Validation,
                    path.qualify(name),
                    format!("must be a '{}' record, got {}", nested.name, other.type_name()),
                );
                dropped.push(name);
            }
        }
    }

    for name in dropped {
        batch.remove(name);
    }
}

/// Run every candidate's validator chain in declared order. A chain
/// short-circuits on its first failure, but all other candidates are still
/// validated so errors accumulate across the whole batch.
fn validate(
    spec: &ResolvedSpec,
    path: &RecordPath,
    batch: &mut Batch,
    result: &mut OperationResult,
) -> bool {
    let mut all_passed = true;

    for &name in spec.order() {
        let Some(value) = batch.get_mut(name) else {
            continue;
        };
        let Some(attr) = spec.attribute(name) else {
            continue;
        };

        let mut ctx = AttributeContext::new(name, path, result);
        for validator in &attr.validators {
            if !(validator.func)(value, &mut ctx) {
                all_passed = false;
                break;
            }
        }
    }

    all_passed
}

/// Assign the whole surviving batch. Only reached when no stage failed.
fn commit(spec: &ResolvedSpec, attributes: &mut Attributes, batch: Batch) {
    let entity = spec.kind().entity_semantics();

    for (name, value) in batch {
        let value = if entity {
            entity::apply_setter(spec, name, value)
        } else {
            value
        };
        attributes.insert(name, value);
    }
}

// ============================================================================
// Read views
// ============================================================================

fn read_view(
    spec: &ResolvedSpec,
    attributes: &Attributes,
    subset: Option<&[&str]>,
) -> BTreeMap<&'static str, Value> {
    let mut out = BTreeMap::new();

    for attr in spec.iter() {
        if subset.is_some_and(|names| !names.contains(&attr.name)) {
            continue;
        }
        out.insert(attr.name, read_one(spec, attr, attributes));
    }

    out
}

fn dto_view(spec: &ResolvedSpec, attributes: &Attributes, subset: Option<&[&str]>) -> Dto {
    let mut dto = Dto::new();

    for attr in spec.iter() {
        if subset.is_some_and(|names| !names.contains(&attr.name)) {
            continue;
        }
        dto.insert(attr.name, flatten(read_one(spec, attr, attributes)));
    }

    dto
}

fn read_one(spec: &ResolvedSpec, attr: &ResolvedAttribute, attributes: &Attributes) -> Value {
    let value = attributes.get(attr.name).cloned().unwrap_or(Value::Null);

    if spec.kind().entity_semantics() {
        entity::apply_getter(attr, value)
    } else {
        value
    }
}

/// Recursively turn nested records into their plain DTO mappings.
fn flatten(value: Value) -> Value {
    match value {
        Value::Record(record) => Value::Map(record.dto().into_values()),
        Value::List(items) => Value::List(items.into_iter().map(flatten).collect()),
        Value::Map(map) => Value::Map(map.into_iter().map(|(k, v)| (k, flatten(v))).collect()),
        other => other,
    }
}
