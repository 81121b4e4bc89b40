use thiserror::Error;

use crate::path::FieldPath;

/// Canonical result for core and the resolver.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unsupported type at '{path}': {ty}")]
    UnsupportedType { path: FieldPath, ty: String },

    #[error("decimal at '{path}' needs both max_digits and decimal_places")]
    DecimalParametersMissing { path: FieldPath },

    #[error("decimal at '{path}' has invalid parameters: precision {precision}, scale {scale}")]
    InvalidDecimalParameters {
        path: FieldPath,
        precision: u8,
        scale: i8,
    },

    #[error("{ty} at '{path}' only allowed if ok losing timezone information")]
    TimezoneLoss { path: FieldPath, ty: &'static str },

    #[error("cyclic record definition at '{path}': {cycle}")]
    CyclicStructure { path: FieldPath, cycle: String },

    #[error("map key at '{path}' is optional; columnar map keys cannot be null")]
    NullableMapKey { path: FieldPath },

    #[error("unknown record '{name}' referenced at '{path}'")]
    UnknownRecord { path: FieldPath, name: String },

    #[error("invalid model definition: {0}")]
    Definition(String),

    #[error("hashing error: {0}")]
    Hash(String),
}

/// Coarse error taxonomy so callers can match on the kind of failure
/// without destructuring the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnsupportedType,
    DecimalParametersMissing,
    InvalidDecimalParameters,
    TimezoneLoss,
    CyclicStructure,
    NullableMapKey,
    UnknownRecord,
    Definition,
    Hash,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            Error::DecimalParametersMissing { .. } => ErrorKind::DecimalParametersMissing,
            Error::InvalidDecimalParameters { .. } => ErrorKind::InvalidDecimalParameters,
            Error::TimezoneLoss { .. } => ErrorKind::TimezoneLoss,
            Error::CyclicStructure { .. } => ErrorKind::CyclicStructure,
            Error::NullableMapKey { .. } => ErrorKind::NullableMapKey,
            Error::UnknownRecord { .. } => ErrorKind::UnknownRecord,
            Error::Definition(_) => ErrorKind::Definition,
            Error::Hash(_) => ErrorKind::Hash,
        }
    }

    /// Path from the root record to the failing field, when the error has one.
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            Error::UnsupportedType { path, .. }
            | Error::DecimalParametersMissing { path }
            | Error::InvalidDecimalParameters { path, .. }
            | Error::TimezoneLoss { path, .. }
            | Error::CyclicStructure { path, .. }
            | Error::NullableMapKey { path }
            | Error::UnknownRecord { path, .. } => Some(path),
            Error::Definition(_) | Error::Hash(_) => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Hash(e.to_string())
    }
}
