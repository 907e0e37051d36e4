#![forbid(unsafe_code)]

//! A hook-free element host that counts what the registry does to it.

use std::collections::BTreeMap;
use std::rc::Rc;

use bindery_core::{ChangeHandler, ElementHost, ListenerId, PropValue};

/// Element host for tests.
///
/// Every `add_change_listener` call is counted, every property write is
/// appended to [`writes`](Self::writes), and there are no setter hooks.
#[derive(Default)]
pub struct StubElement {
    tag: String,
    properties: BTreeMap<String, PropValue>,
    listeners: Vec<(ListenerId, ChangeHandler)>,
    next_listener: u64,
    subscribe_calls: usize,
    writes: Vec<(String, PropValue)>,
}

impl StubElement {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// How many times a change listener was subscribed.
    #[must_use]
    pub fn subscribe_calls(&self) -> usize {
        self.subscribe_calls
    }

    /// Currently subscribed change listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Every property write, in order.
    #[must_use]
    pub fn writes(&self) -> &[(String, PropValue)] {
        &self.writes
    }
}

impl ElementHost for StubElement {
    fn tag_name(&self) -> &str {
        &self.tag
    }

    fn property(&self, key: &str) -> Option<PropValue> {
        self.properties.get(key).cloned()
    }

    fn set_property(&mut self, key: &str, value: PropValue) {
        self.writes.push((key.to_owned(), value.clone()));
        self.properties.insert(key.to_owned(), value);
    }

    fn add_change_listener(&mut self, handler: ChangeHandler) -> ListenerId {
        self.subscribe_calls += 1;
        let id = ListenerId::new(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, handler));
        id
    }

    fn change_listeners(&self) -> Vec<ChangeHandler> {
        self.listeners.iter().map(|(_, h)| Rc::clone(h)).collect()
    }
}

impl std::fmt::Debug for StubElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StubElement")
            .field("tag", &self.tag)
            .field("subscribe_calls", &self.subscribe_calls)
            .field("writes", &self.writes.len())
            .finish()
    }
}
