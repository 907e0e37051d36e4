#![forbid(unsafe_code)]

//! Bindery public facade.
//!
//! Bind a property on one element to properties on other elements, plain
//! property bags, or callbacks. Writes fan out synchronously in registration
//! order; user edits on form fields fan out the same way.
//!
//! ```
//! use bindery::prelude::*;
//!
//! let source = BoundElement::new(Element::new("input"));
//! let mirror = BoundElement::new(Element::new("span"));
//!
//! source.bind_var(
//!     "value",
//!     mirror.as_target(),
//!     &BindOptions::new().target_key("text").two_way(true),
//! );
//!
//! source.set("value", "hello").unwrap();
//! assert_eq!(mirror.get("text"), Some(PropValue::from("hello")));
//!
//! mirror.set("text", "back").unwrap();
//! assert_eq!(source.get("value"), Some(PropValue::from("back")));
//! ```

pub use bindery_core;
pub use bindery_runtime;

pub use bindery_core::{
    ChangeEvent, Element, ElementError, ElementHost, PropValue, PropertyBag, PropertyHooks,
};
pub use bindery_runtime::{
    BindError, BindOptions, Bindable, BindingList, BoundElement, Settable, Target, TargetKind,
    UserInputPolicy,
};

/// Everything needed to bind properties.
pub mod prelude {
    pub use bindery_core::{Element, ElementHost, PropValue, PropertyBag};
    pub use bindery_runtime::{
        BindError, BindOptions, Bindable, BoundElement, Settable, Target, UserInputPolicy,
    };
}
