//! Attest: declare an object's attributes once — validators, defaults,
//! nested classes, accessors — and get creation from plain mappings,
//! whole-batch validation with atomic assignment, and DTO conversion for
//! free.
//!
//! The `prelude` module mirrors the surface used by code declaring and
//! consuming records; engine internals stay one module level down.

pub mod generators;
pub mod vo;

// the core surface, re-exported wholesale
pub use attest_core::{base, error, path, record, record_storage, result, spec, types, value};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        generators,
        vo::{Password, Phone},
    };
    pub use attest_core::prelude::*;
}
