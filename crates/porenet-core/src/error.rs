//! Error types for store access and model evaluation.
//!
//! Session-level errors (unknown objects, invalid subsets, association
//! failures) live in `porenet-engine` and wrap these.

use std::error::Error;
use std::fmt;

use crate::array::DType;
use crate::element::ElementKind;

/// Errors from labeled element store operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// The requested key is not present in the store.
    UnknownProperty {
        /// The missing key.
        key: String,
    },
    /// A key is not of the form `"pore.<name>"` or `"throat.<name>"`.
    InvalidKey {
        /// The malformed key.
        key: String,
    },
    /// An array's length does not match the element count of its kind.
    ShapeMismatch {
        /// Key being written.
        key: String,
        /// Element count of the key's kind.
        expected: usize,
        /// Length of the supplied array.
        actual: usize,
    },
    /// A label query named a key whose array is not boolean.
    NotALabel {
        /// The non-boolean key.
        key: String,
        /// Its actual element type.
        dtype: DType,
    },
    /// An element index lies outside `0..count`.
    IndexOutOfBounds {
        /// Element kind being indexed.
        kind: ElementKind,
        /// The offending index.
        index: usize,
        /// Current element count.
        count: usize,
    },
    /// Attempted to overwrite or remove a reserved `"<kind>.all"` key.
    ReservedKey {
        /// The reserved key.
        key: String,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownProperty { key } => write!(f, "unknown property '{key}'"),
            Self::InvalidKey { key } => {
                write!(f, "invalid key '{key}': expected 'pore.<name>' or 'throat.<name>'")
            }
            Self::ShapeMismatch {
                key,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "shape mismatch for '{key}': expected {expected} elements, got {actual}"
                )
            }
            Self::NotALabel { key, dtype } => {
                write!(f, "'{key}' is not a label (dtype {dtype})")
            }
            Self::IndexOutOfBounds { kind, index, count } => {
                write!(f, "{kind} index {index} out of bounds for {count} {kind}s")
            }
            Self::ReservedKey { key } => write!(f, "'{key}' is reserved"),
        }
    }
}

impl Error for StoreError {}

/// Errors raised by a property model during evaluation.
#[derive(Clone, Debug, PartialEq)]
pub enum ModelError {
    /// A required parameter was not bound at registration.
    MissingParam {
        /// Parameter name.
        name: String,
    },
    /// A bound parameter has the wrong type.
    ParamType {
        /// Parameter name.
        name: String,
        /// Human-readable expected type.
        expected: &'static str,
    },
    /// The model read a property that is absent or malformed.
    Store(StoreError),
    /// Any other model-specific failure.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingParam { name } => write!(f, "missing parameter '{name}'"),
            Self::ParamType { name, expected } => {
                write!(f, "parameter '{name}' must be {expected}")
            }
            Self::Store(e) => write!(f, "store access failed: {e}"),
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
        }
    }
}

impl Error for ModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for ModelError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}
