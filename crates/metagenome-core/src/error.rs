//! Error types for metagenome-core.
//!
//! This module provides a unified error type with explicit variants for
//! decoding, service, and input validation errors.

use thiserror::Error;

use crate::schema::ValueKind;

/// The unified error type for metagenome-core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Wire-format errors raised while decoding or encoding records.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Errors reported by the service behind [`MetagenomeApi`](crate::MetagenomeApi).
    #[error("service error: {0}")]
    Service(#[from] ServiceError),

    /// Input validation errors (unknown sort column, colliding extras).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Errors raised by the record codec.
///
/// Decoding is fail-fast: the first incompatible value aborts the whole
/// decode and is reported here.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A declared field holds a value of the wrong kind.
    ///
    /// `field` is a path from the decoded root, e.g. `bins[1].gc`.
    #[error("field `{field}`: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: ValueKind,
        found: &'static str,
    },

    /// The value being decoded as a record is not a JSON object.
    #[error("{record}: expected a JSON object, found {found}")]
    NotAnObject {
        record: &'static str,
        found: &'static str,
    },

    /// Raw JSON text could not be parsed.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodecError {
    /// Returns the field path for a [`CodecError::TypeMismatch`].
    pub fn field(&self) -> Option<&str> {
        match self {
            CodecError::TypeMismatch { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Errors surfaced unchanged from the service collaborator.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The object reference does not resolve to a known object.
    #[error("unknown object reference '{reference}'")]
    UnknownRef { reference: String },

    /// A named item inside a known object does not exist.
    #[error("{what} '{id}' not found")]
    NotFound { what: &'static str, id: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// A sort column is not one of the columns the search supports.
    #[error("unknown column name '{column}', please use one of {allowed:?}")]
    UnknownSortColumn {
        column: String,
        allowed: &'static [&'static str],
    },

    /// An extras key names a field declared by the record's own schema.
    #[error("extra key '{key}' collides with a declared field of {record}")]
    ExtraCollides { key: String, record: &'static str },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
