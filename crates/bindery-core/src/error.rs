#![forbid(unsafe_code)]

//! Errors raised by element property hooks.

use std::fmt;

/// Errors from writing an element property through a custom setter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementError {
    /// The property cannot be written.
    ReadOnly { key: String },
    /// The value has the wrong shape for the property.
    InvalidValue { key: String, expected: &'static str },
}

impl fmt::Display for ElementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadOnly { key } => write!(f, "property '{key}' is read-only"),
            Self::InvalidValue { key, expected } => {
                write!(f, "property '{key}' expects {expected}")
            }
        }
    }
}

impl std::error::Error for ElementError {}
