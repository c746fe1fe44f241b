use crate::{record::ValidRecord, value::Value};
use serde::{Deserialize, Serialize};
use std::{
    any::{Any, TypeId},
    collections::BTreeMap,
    fmt,
};

///
/// Dto
///
/// Plain, validation-free counterpart of a record, used at serialization
/// boundaries. A DTO may be partial: the set of present keys *is* the
/// work-set, and absent keys are simply not part of the operation.
///

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dto {
    values: BTreeMap<String, Value>,
}

impl Dto {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The work-set: names present in this DTO.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn into_values(self) -> BTreeMap<String, Value> {
        self.values
    }
}

impl From<BTreeMap<String, Value>> for Dto {
    fn from(values: BTreeMap<String, Value>) -> Self {
        Self { values }
    }
}

impl FromIterator<(String, Value)> for Dto {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Dto {
    fn from(entries: [(K, V); N]) -> Self {
        Self {
            values: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Dto {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

///
/// DataTransfer
///
/// Object-safe capability shared by every record type: convertible to a
/// DTO, identifiable, and comparable behind a pointer. This is what lets a
/// parent attribute hold a nested record of any concrete type.
///

pub trait DataTransfer: fmt::Debug + Send + Sync + 'static {
    fn record_name(&self) -> &'static str;
    fn record_type(&self) -> TypeId;
    fn dto(&self) -> Dto;
    fn clone_box(&self) -> Box<dyn DataTransfer>;
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn DataTransfer) -> bool;
}

impl<R: ValidRecord> DataTransfer for R {
    fn record_name(&self) -> &'static str {
        R::NAME
    }

    fn record_type(&self) -> TypeId {
        TypeId::of::<R>()
    }

    fn dto(&self) -> Dto {
        self.to_dto()
    }

    fn clone_box(&self) -> Box<dyn DataTransfer> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn DataTransfer) -> bool {
        other.as_any().downcast_ref::<R>().is_some_and(|o| o == self)
    }
}

///
/// RecordValue
///
/// A type-erased validated record stored inside a parent attribute.
///

pub struct RecordValue(Box<dyn DataTransfer>);

impl RecordValue {
    #[must_use]
    pub fn new<R: ValidRecord>(record: R) -> Self {
        Self(Box::new(record))
    }

    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.0.record_type()
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.0.record_name()
    }

    /// Convert the held record to its DTO form.
    #[must_use]
    pub fn dto(&self) -> Dto {
        self.0.dto()
    }

    #[must_use]
    pub fn downcast_ref<R: ValidRecord>(&self) -> Option<&R> {
        self.0.as_any().downcast_ref()
    }
}

impl Clone for RecordValue {
    fn clone(&self) -> Self {
        Self(self.0.clone_box())
    }
}

impl fmt::Debug for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl PartialEq for RecordValue {
    fn eq(&self, other: &Self) -> bool {
        self.0.dyn_eq(other.0.as_ref())
    }
}
