#![forbid(unsafe_code)]

//! Custom property hooks.
//!
//! [`PropertyHooks`] maps property names to setter and getter overrides.
//! When an element writes a property through [`ElementHost::apply_property`],
//! a registered setter takes precedence over the generic map write. Reads
//! through [`ElementHost::property`] consult registered getters the same way.
//!
//! The [`standard`](PropertyHooks::standard) set covers the usual attribute
//! aliases (`class`, `for`, `text`, `html`), the read-only `tag`, boolean
//! attributes, and `tabindex`.
//!
//! [`ElementHost::apply_property`]: crate::element::ElementHost::apply_property
//! [`ElementHost::property`]: crate::element::ElementHost::property

use std::fmt;
use std::rc::Rc;

use ahash::AHashMap;

use crate::element::{Element, ElementHost};
use crate::error::ElementError;
use crate::value::PropValue;

/// Setter override for one property name.
pub type PropertySetter = Rc<dyn Fn(&mut Element, PropValue) -> Result<(), ElementError>>;

/// Getter override for one property name.
pub type PropertyGetter = Rc<dyn Fn(&Element) -> Option<PropValue>>;

/// Setter and getter overrides registered for a property name.
#[derive(Clone, Default)]
pub struct PropertyHook {
    pub set: Option<PropertySetter>,
    pub get: Option<PropertyGetter>,
}

impl fmt::Debug for PropertyHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyHook")
            .field("set", &self.set.is_some())
            .field("get", &self.get.is_some())
            .finish()
    }
}

/// Registry of property hooks, shared between elements.
#[derive(Clone, Default)]
pub struct PropertyHooks {
    hooks: AHashMap<String, PropertyHook>,
}

impl PropertyHooks {
    /// Create an empty registry. Every property uses the generic path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard hook set used by [`Element::new`].
    #[must_use]
    pub fn standard() -> Self {
        let mut hooks = Self::new();
        hooks.alias("class", "className");
        hooks.alias("for", "htmlFor");
        hooks.text_alias("text", "textContent");
        hooks.text_alias("html", "innerHTML");
        hooks.boolean("checked");
        hooks.boolean("selected");
        hooks.boolean("disabled");
        hooks.read_only("tag");
        hooks.register_getter("tag", |el| {
            Some(PropValue::Text(el.tag_name().to_ascii_lowercase()))
        });
        hooks.register_setter("tabindex", |el, value| {
            let index = match &value {
                PropValue::Int(i) => *i,
                PropValue::Text(s) => {
                    s.trim()
                        .parse::<i64>()
                        .map_err(|_| ElementError::InvalidValue {
                            key: "tabindex".into(),
                            expected: "an integer",
                        })?
                }
                _ => {
                    return Err(ElementError::InvalidValue {
                        key: "tabindex".into(),
                        expected: "an integer",
                    });
                }
            };
            el.set_raw("tabIndex", PropValue::Int(index));
            Ok(())
        });
        hooks.alias_getter("tabindex", "tabIndex");
        hooks
    }

    /// Register a setter override for `name`.
    pub fn register_setter(
        &mut self,
        name: impl Into<String>,
        setter: impl Fn(&mut Element, PropValue) -> Result<(), ElementError> + 'static,
    ) -> &mut Self {
        self.hooks.entry(name.into()).or_default().set = Some(Rc::new(setter));
        self
    }

    /// Register a getter override for `name`.
    pub fn register_getter(
        &mut self,
        name: impl Into<String>,
        getter: impl Fn(&Element) -> Option<PropValue> + 'static,
    ) -> &mut Self {
        self.hooks.entry(name.into()).or_default().get = Some(Rc::new(getter));
        self
    }

    /// Route reads and writes of `name` to the `canonical` property.
    pub fn alias(&mut self, name: &str, canonical: &str) -> &mut Self {
        let target = canonical.to_owned();
        self.register_setter(name, move |el, value| {
            el.set_raw(&target, value);
            Ok(())
        });
        self.alias_getter(name, canonical)
    }

    /// Like [`alias`](Self::alias), but values are stored as their text form.
    pub fn text_alias(&mut self, name: &str, canonical: &str) -> &mut Self {
        let target = canonical.to_owned();
        self.register_setter(name, move |el, value| {
            el.set_raw(&target, PropValue::Text(value.to_string()));
            Ok(())
        });
        self.alias_getter(name, canonical)
    }

    /// Store writes of `name` as their truthiness.
    pub fn boolean(&mut self, name: &str) -> &mut Self {
        let key = name.to_owned();
        self.register_setter(name, move |el, value| {
            el.set_raw(&key, PropValue::Bool(value.truthy()));
            Ok(())
        })
    }

    /// Reject every write of `name`.
    pub fn read_only(&mut self, name: &str) -> &mut Self {
        let key = name.to_owned();
        self.register_setter(name, move |_, _| {
            Err(ElementError::ReadOnly { key: key.clone() })
        })
    }

    fn alias_getter(&mut self, name: &str, canonical: &str) -> &mut Self {
        let source = canonical.to_owned();
        self.register_getter(name, move |el| el.raw(&source).cloned())
    }

    /// Look up the hooks registered for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyHook> {
        self.hooks.get(name)
    }

    /// The setter override for `name`, if any.
    #[must_use]
    pub fn setter(&self, name: &str) -> Option<PropertySetter> {
        self.hooks.get(name).and_then(|h| h.set.clone())
    }

    /// The getter override for `name`, if any.
    #[must_use]
    pub fn getter(&self, name: &str) -> Option<PropertyGetter> {
        self.hooks.get(name).and_then(|h| h.get.clone())
    }

    /// Number of hooked property names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether no property is hooked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl fmt::Debug for PropertyHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.hooks.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("PropertyHooks")
            .field("names", &names)
            .finish()
    }
}
