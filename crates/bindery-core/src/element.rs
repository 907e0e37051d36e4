#![forbid(unsafe_code)]

//! Element hosts and change events.
//!
//! [`ElementHost`] is the seam between the binding registry and whatever
//! actually stores element properties. The registry only reads and writes
//! properties and subscribes to the generic "change" notification; it never
//! renders anything.
//!
//! [`Element`] is the in-process host shipped with this crate: a tag name,
//! a property map, a shared [`PropertyHooks`] registry, and a list of change
//! handlers.
//!
//! # Invariants
//!
//! 1. Change handlers run in subscription order.
//! 2. [`ElementHost::set_property`] never consults hooks;
//!    [`ElementHost::apply_property`] always does.
//! 3. A [`ListenerId`] is never reused by the same element.

use std::fmt;
use std::rc::Rc;

use ahash::AHashMap;

use crate::error::ElementError;
use crate::properties::PropertyHooks;
use crate::value::PropValue;

thread_local! {
    static STANDARD_HOOKS: Rc<PropertyHooks> = Rc::new(PropertyHooks::standard());
}

/// Error type returned by change handlers.
pub type ListenerError = Box<dyn std::error::Error + 'static>;

/// A subscriber to an element's "change" notification.
pub type ChangeHandler = Rc<dyn Fn(&ChangeEvent) -> Result<(), ListenerError>>;

/// Handle for a change subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Wrap a raw id. Hosts allocate these monotonically.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Payload of a generic "change" notification.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeEvent {
    /// The property the host believes changed, when it knows.
    pub property: Option<String>,
}

impl ChangeEvent {
    /// An event that names the changed property.
    #[must_use]
    pub fn for_property(key: impl Into<String>) -> Self {
        Self {
            property: Some(key.into()),
        }
    }
}

/// Storage and change notification for one element.
pub trait ElementHost {
    /// Tag name as the host reports it (case is not normalized).
    fn tag_name(&self) -> &str;

    /// Read a property, honoring any getter hook.
    fn property(&self, key: &str) -> Option<PropValue>;

    /// Generic property write. Bypasses hooks.
    fn set_property(&mut self, key: &str, value: PropValue);

    /// Write a property through its setter hook when one exists, otherwise
    /// through [`set_property`](Self::set_property).
    fn apply_property(&mut self, key: &str, value: PropValue) -> Result<(), ElementError> {
        self.set_property(key, value);
        Ok(())
    }

    /// Subscribe to the "change" notification.
    fn add_change_listener(&mut self, handler: ChangeHandler) -> ListenerId;

    /// Current change subscribers, in subscription order.
    fn change_listeners(&self) -> Vec<ChangeHandler>;
}

/// In-process element with hookable properties.
pub struct Element {
    tag: String,
    properties: AHashMap<String, PropValue>,
    hooks: Rc<PropertyHooks>,
    listeners: Vec<(ListenerId, ChangeHandler)>,
    next_listener: u64,
}

impl Element {
    /// Create an element using the standard hook set.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self::with_hooks(tag, STANDARD_HOOKS.with(Rc::clone))
    }

    /// Create an element with a specific hook registry.
    #[must_use]
    pub fn with_hooks(tag: impl Into<String>, hooks: Rc<PropertyHooks>) -> Self {
        Self {
            tag: tag.into(),
            properties: AHashMap::new(),
            hooks,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Builder-style generic property write.
    #[must_use]
    pub fn with_property(mut self, key: &str, value: impl Into<PropValue>) -> Self {
        self.set_raw(key, value.into());
        self
    }

    /// Read a stored property without consulting hooks.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&PropValue> {
        self.properties.get(key)
    }

    /// Store a property without consulting hooks.
    pub fn set_raw(&mut self, key: &str, value: PropValue) {
        match self.properties.get_mut(key) {
            Some(slot) => *slot = value,
            None => {
                self.properties.insert(key.to_owned(), value);
            }
        }
    }

    /// The hook registry this element writes through.
    #[must_use]
    pub fn hooks(&self) -> &Rc<PropertyHooks> {
        &self.hooks
    }

    /// Number of change subscribers.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl ElementHost for Element {
    fn tag_name(&self) -> &str {
        &self.tag
    }

    fn property(&self, key: &str) -> Option<PropValue> {
        match self.hooks.getter(key) {
            Some(getter) => getter(self),
            None => self.properties.get(key).cloned(),
        }
    }

    fn set_property(&mut self, key: &str, value: PropValue) {
        self.set_raw(key, value);
    }

    fn apply_property(&mut self, key: &str, value: PropValue) -> Result<(), ElementError> {
        #[cfg(feature = "tracing")]
        tracing::trace!(tag = %self.tag, key, "apply_property");

        let hooks = Rc::clone(&self.hooks);
        match hooks.setter(key) {
            Some(setter) => setter(self, value),
            None => {
                self.set_raw(key, value);
                Ok(())
            }
        }
    }

    fn add_change_listener(&mut self, handler: ChangeHandler) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, handler));
        id
    }

    fn change_listeners(&self) -> Vec<ChangeHandler> {
        self.listeners.iter().map(|(_, h)| Rc::clone(h)).collect()
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag)
            .field("properties", &self.properties.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
