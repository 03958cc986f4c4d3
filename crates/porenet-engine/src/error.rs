//! Session-level error type.

use std::error::Error;
use std::fmt;

use porenet_core::{ElementKind, ModelError, ObjectKind, StoreError};

use crate::config::ConfigError;

/// Errors from session construction and domain object operations.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionError {
    /// The session configuration failed validation.
    Config(ConfigError),
    /// No object of this kind is registered under `id`.
    UnknownObject {
        /// Object class looked up.
        kind: ObjectKind,
        /// The raw ID.
        id: u32,
    },
    /// A subset index falls outside the phase's element bounds.
    InvalidSubset {
        /// Element kind of the subset.
        kind: ElementKind,
        /// The offending index.
        index: usize,
        /// The phase's element count.
        count: usize,
    },
    /// A store operation failed (unknown key, shape mismatch, ...).
    Store(StoreError),
    /// A model failed while computing a property.
    ModelFailed {
        /// Target property.
        propname: String,
        /// Name of the failing model.
        model: String,
        /// The underlying model error.
        reason: ModelError,
    },
    /// A physics object's network or phase link cannot be resolved or
    /// is inconsistent.
    Association {
        /// Name of the physics object.
        physics: String,
        /// What is wrong with the link.
        reason: String,
    },
    /// Another object already uses this name.
    DuplicateName {
        /// The contested name.
        name: String,
    },
    /// The name cannot be used as a label.
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },
    /// Every generated name for this kind is already taken. Raise
    /// `name_suffix_len` or pass explicit names.
    NameSpaceExhausted {
        /// Object class whose names ran out.
        kind: ObjectKind,
    },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid config: {e}"),
            Self::UnknownObject { kind, id } => write!(f, "unknown {kind} id {id}"),
            Self::InvalidSubset { kind, index, count } => {
                write!(f, "{kind} subset index {index} outside phase bounds (0..{count})")
            }
            Self::Store(e) => write!(f, "{e}"),
            Self::ModelFailed {
                propname,
                model,
                reason,
            } => write!(f, "model '{model}' failed computing '{propname}': {reason}"),
            Self::Association { physics, reason } => {
                write!(f, "physics '{physics}' association error: {reason}")
            }
            Self::DuplicateName { name } => write!(f, "name '{name}' is already in use"),
            Self::InvalidName { name, reason } => write!(f, "invalid name '{name}': {reason}"),
            Self::NameSpaceExhausted { kind } => {
                write!(f, "no generated {kind} names left; raise name_suffix_len")
            }
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Store(e) => Some(e),
            Self::ModelFailed { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl From<StoreError> for SessionError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<ConfigError> for SessionError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
