//! Error types for parsing, navigating, mutating and serializing documents.

use crate::value::ValueKind;
use thiserror::Error;

/// Errors raised while turning text into a [`crate::Document`].
///
/// Positions are byte offsets into the whitespace-stripped input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A quote, brace or bracket was opened but the input ended first.
    #[error("unexpected end of input at offset {position}")]
    UnexpectedEndOfInput { position: usize },

    /// A structural character was expected (e.g. `:` after a key).
    #[error("unexpected character '{found}' at offset {position}")]
    UnexpectedCharacter { found: char, position: usize },

    /// A value span that is neither a string, container, bool, null nor number.
    #[error("invalid value '{text}' at offset {position}")]
    InvalidValue { text: String, position: usize },

    /// A numeric run that does not fit the target type.
    #[error("invalid number '{text}' at offset {position}")]
    InvalidNumber { text: String, position: usize },

    #[error("nesting deeper than {limit} levels")]
    DepthLimitExceeded { limit: usize },
}

/// Errors that can occur on any document operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JsonError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A read or update asked for a variant the value does not hold.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("key not found: '{0}'")]
    KeyNotFound(String),

    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Key or index access attempted on a scalar.
    #[error("cannot address into a {found} value")]
    NotAContainer { found: ValueKind },

    /// Index access attempted on an object.
    #[error("expected an array, found {found}")]
    NotAnArray { found: ValueKind },

    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// The value cannot be written in the text grammar.
    #[error("cannot serialize {0}")]
    Unrepresentable(String),
}

/// Convenience alias used throughout flatjson-core.
pub type Result<T> = std::result::Result<T, JsonError>;
