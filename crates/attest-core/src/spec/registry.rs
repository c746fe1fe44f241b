use crate::{error::SpecError, record::AbstractRecord, spec::ResolvedSpec};
use std::{
    any::TypeId,
    collections::HashMap,
    sync::{LazyLock, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

///
/// Spec registry
///
/// Process-wide map from record type identity to its resolved tables,
/// populated lazily on first use. Entries are leaked to `'static` and never
/// mutated afterwards, so readers share them freely across threads.
/// Concurrent first resolutions of the same type race benignly; the first
/// insert wins.
///

static SPECS: LazyLock<RwLock<HashMap<TypeId, &'static ResolvedSpec>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

fn read_lock() -> RwLockReadGuard<'static, HashMap<TypeId, &'static ResolvedSpec>> {
    match SPECS.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn write_lock() -> RwLockWriteGuard<'static, HashMap<TypeId, &'static ResolvedSpec>> {
    match SPECS.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Resolve (or fetch the memoized) tables for a record type.
///
/// Resolution failures are configuration errors; they are not cached, so a
/// broken declaration reports consistently on every call.
pub fn try_spec<R: AbstractRecord>() -> Result<&'static ResolvedSpec, SpecError> {
    let id = TypeId::of::<R>();

    if let Some(spec) = read_lock().get(&id).copied() {
        return Ok(spec);
    }

    // Build outside the write lock; declarations may themselves resolve
    // nested record types.
    let resolved = ResolvedSpec::resolve::<R>()?;
    tracing::debug!(record = R::NAME, "resolved attribute specifications");

    let mut specs = write_lock();
    Ok(*specs
        .entry(id)
        .or_insert_with(|| &*Box::leak(Box::new(resolved))))
}

/// Registry access for the engine itself.
///
/// A failure here means the record type's declaration is broken, which is a
/// programming fault rather than bad input, so it aborts.
pub(crate) fn expect_spec<R: AbstractRecord>() -> &'static ResolvedSpec {
    match try_spec::<R>() {
        Ok(spec) => spec,
        Err(err) => panic!("invalid attribute specifications for '{}': {err}", R::NAME),
    }
}
