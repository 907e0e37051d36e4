#![forbid(unsafe_code)]

//! Core types for Bindery: property values, property bags, element hosts,
//! and the change events that user interaction dispatches.
//!
//! Nothing in this crate knows about bindings. It models the element and
//! property system that the binding registry in `bindery-runtime` layers onto.

pub mod bag;
pub mod element;
pub mod error;
pub mod properties;
pub mod value;

pub use bag::PropertyBag;
pub use element::{ChangeEvent, ChangeHandler, Element, ElementHost, ListenerError, ListenerId};
pub use error::ElementError;
pub use properties::{PropertyGetter, PropertyHook, PropertyHooks, PropertySetter};
pub use value::PropValue;
