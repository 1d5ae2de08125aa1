use thiserror::Error;

/// Failure to parse an object identifier from its `space.type.instance` form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdParseError {
    #[error("malformed object id: {0}")]
    Malformed(String),

    #[error("wrong object type: expected {expected}, found {found}")]
    WrongType { expected: String, found: String },
}
