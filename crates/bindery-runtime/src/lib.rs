#![forbid(unsafe_code)]

//! Binding registry for Bindery.
//!
//! A [`BoundElement`] wraps any [`ElementHost`] and lets one of its
//! properties be bound to properties of other objects: another bound element,
//! a plain [`PropertyBag`], or a callback. Writes through
//! [`BoundElement::set`] fan out to every target in registration order.
//! Bindings on user-editable form fields also fan out when the element
//! dispatches its "change" notification.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use bindery_core::{Element, PropValue, PropertyBag};
//! use bindery_runtime::{BindOptions, BoundElement, Target};
//!
//! let name = BoundElement::new(Element::new("input"));
//! let model = Rc::new(RefCell::new(PropertyBag::new()));
//!
//! name.bind_var("value", Target::plain(&model), &BindOptions::new().target_key("name"));
//! name.set("value", "Ada").unwrap();
//! assert_eq!(model.borrow().get("name"), Some(&PropValue::from("Ada")));
//! ```
//!
//! [`ElementHost`]: bindery_core::ElementHost
//! [`PropertyBag`]: bindery_core::PropertyBag

pub mod binding;
pub mod error;
pub mod options;
pub mod policy;

pub use binding::{
    Bindable, BindingEntry, BindingList, BoundElement, Settable, Target, TargetKind,
};
pub use error::BindError;
pub use options::BindOptions;
pub use policy::UserInputPolicy;
#[cfg(feature = "policy-config")]
pub use policy::PolicyConfigError;
