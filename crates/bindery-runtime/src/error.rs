#![forbid(unsafe_code)]

//! Errors surfaced by binding fan-out.
//!
//! The registry itself never fails: binding and unbinding are infallible, and
//! unknown keys are silent no-ops. Errors come from targets while a value is
//! being delivered, and from the element when `set` writes through a setter
//! hook. Either way the error aborts the rest of the fan-out pass and is
//! returned to whoever called `set` or dispatched the change.

use std::fmt;

use bindery_core::{ElementError, ListenerError};

/// Errors from writing a bound property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// A settable target was dropped before it could be notified.
    TargetDropped { target_key: String },
    /// A plain target was already borrowed when a value arrived for it.
    TargetBusy { target_key: String },
    /// A target refused the value.
    Rejected { key: String, reason: String },
    /// The source element refused the write.
    Element(ElementError),
    /// A foreign change handler on the element failed.
    Listener(String),
}

impl BindError {
    /// Convenience constructor for targets that refuse a value.
    #[must_use]
    pub fn rejected(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Recover a `BindError` from a change-handler error.
    ///
    /// Handlers installed by the registry box a `BindError`; those unwrap to
    /// the original. Anything else is kept by its message.
    #[must_use]
    pub fn from_listener(err: ListenerError) -> Self {
        match err.downcast::<Self>() {
            Ok(bind) => *bind,
            Err(other) => Self::Listener(other.to_string()),
        }
    }
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetDropped { target_key } => {
                write!(f, "binding target for '{target_key}' was dropped")
            }
            Self::TargetBusy { target_key } => {
                write!(f, "binding target for '{target_key}' is already borrowed")
            }
            Self::Rejected { key, reason } => write!(f, "'{key}' rejected: {reason}"),
            Self::Element(err) => write!(f, "element write failed: {err}"),
            Self::Listener(msg) => write!(f, "change listener failed: {msg}"),
        }
    }
}

impl std::error::Error for BindError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Element(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ElementError> for BindError {
    fn from(err: ElementError) -> Self {
        Self::Element(err)
    }
}
