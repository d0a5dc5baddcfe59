use thiserror::Error;

/// Result alias used by the dynamic runtime.
pub type DynamicResult<T> = Result<T, DynamicError>;

/// Errors produced while building dynamic objects from an accessor table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DynamicError {
    /// Computed members have no body that could run without generated code.
    #[error("computed member '{name}' of '{owner}' cannot be bound at run-time")]
    ComputedMember { owner: String, name: String },

    #[error("type '{owner}' has no field '{name}'")]
    UnknownField { owner: String, name: String },

    #[error("missing initial value for field '{name}' of '{owner}'")]
    MissingValue { owner: String, name: String },

    #[error("field '{name}' of '{owner}' was given more than one initial value")]
    DuplicateValue { owner: String, name: String },
}
