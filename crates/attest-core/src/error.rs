use thiserror::Error as ThisError;

///
/// SpecError
///
/// A broken attribute declaration. This is the fatal, programming-error
/// tier: it is raised when a record type's specifications are resolved,
/// never while handling input data. Data-dependent failures go through
/// `OperationResult` instead.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SpecError {
    #[error("record '{record}' declares attribute '{attribute}' more than once")]
    DuplicateAttribute {
        record: &'static str,
        attribute: &'static str,
    },

    #[error("record '{record}' attribute '{attribute}' references unknown validator '{name}'")]
    UnknownValidator {
        record: &'static str,
        attribute: &'static str,
        name: &'static str,
    },

    #[error(
        "record '{record}' attribute '{attribute}' has an unnamed inline validator at position {index}"
    )]
    UnnamedValidator {
        record: &'static str,
        attribute: &'static str,
        index: usize,
    },

    #[error("record '{record}' declares more than one primary key ('{first}' and '{second}')")]
    MultiplePrimaryKeys {
        record: &'static str,
        first: &'static str,
        second: &'static str,
    },
}
