//! Core runtime for Attest: the value model, operation results, attribute
//! specifications, the validate-then-assign record engine, and the
//! ergonomics exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod base;
pub mod error;
pub mod path;
pub mod record;
pub mod result;
pub mod spec;
pub mod types;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No registries, engines, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        path::RecordPath,
        record::{AbstractRecord, Attributes, RecordKind, RecordStorage, ValidRecord},
        record::dto::{DataTransfer, Dto},
        result::{ErrorCode, OperationResult},
        spec::{AttributeContext, AttributeSpec},
        types::Timestamp,
        value::Value,
    };
}
