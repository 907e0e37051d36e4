#![forbid(unsafe_code)]

//! Bound elements: an element host plus its binding tables.

use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use bindery_core::{ChangeEvent, ChangeHandler, ElementHost, ListenerError, ListenerId, PropValue};

use super::list::BindingList;
use super::target::{Bindable, Settable, Target};
use crate::error::BindError;
use crate::options::BindOptions;
use crate::policy::UserInputPolicy;

/// An element whose properties can be bound to other objects.
///
/// Always handled through `Rc`: targets refer back to it weakly, and the
/// change listeners it installs on its element hold a weak self-reference.
///
/// No internal borrow is held while a target runs, so targets may call
/// `set`, `bind_var` or `unbind_var` on the element that notified them.
/// A re-entrant write of a value that is already fanning out for the same
/// key is stored but not fanned out again; this is what stops two-way links
/// from echoing forever. A re-entrant write of a different value fans out
/// in full and supersedes the outer pass, which stops delivering the stale
/// value.
pub struct BoundElement<E: ElementHost> {
    this: Weak<Self>,
    element: RefCell<E>,
    bindings: RefCell<HashMap<String, BindingList>>,
    change_listeners: RefCell<HashMap<String, ListenerId>>,
    fanning_out: ActivePasses,
    policy: UserInputPolicy,
}

/// A fan-out pass in progress for one key.
struct ActivePass {
    value: PropValue,
    superseded: bool,
}

type ActivePasses = RefCell<HashMap<String, Vec<ActivePass>>>;

/// Marks a fan-out pass as running until dropped.
struct FanoutGuard<'a> {
    active: &'a ActivePasses,
    key: String,
    depth: usize,
}

impl FanoutGuard<'_> {
    /// Whether a nested pass for the same key started with a different value.
    fn superseded(&self) -> bool {
        self.active
            .borrow()
            .get(&self.key)
            .and_then(|stack| stack.get(self.depth))
            .is_some_and(|pass| pass.superseded)
    }
}

impl Drop for FanoutGuard<'_> {
    fn drop(&mut self) {
        let mut active = self.active.borrow_mut();
        if let Some(stack) = active.get_mut(&self.key) {
            stack.truncate(self.depth);
            if stack.is_empty() {
                active.remove(&self.key);
            }
        }
    }
}

/// Echo test for re-entrant writes. `NaN` echoes itself.
fn same_value(a: &PropValue, b: &PropValue) -> bool {
    match (a, b) {
        (PropValue::Float(x), PropValue::Float(y)) if x.is_nan() && y.is_nan() => true,
        _ => a == b,
    }
}

impl<E: ElementHost + 'static> BoundElement<E> {
    /// Wrap `element` with the default user-input policy.
    #[must_use]
    pub fn new(element: E) -> Rc<Self> {
        Self::with_policy(element, UserInputPolicy::default())
    }

    /// Wrap `element` with a custom user-input policy.
    #[must_use]
    pub fn with_policy(element: E, policy: UserInputPolicy) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            this: this.clone(),
            element: RefCell::new(element),
            bindings: RefCell::new(HashMap::new()),
            change_listeners: RefCell::new(HashMap::new()),
            fanning_out: RefCell::new(HashMap::new()),
            policy,
        })
    }

    /// This element as a binding target.
    #[must_use]
    pub fn as_target(&self) -> Target {
        let weak: Weak<Self> = self.this.clone();
        Target::Settable(weak)
    }

    /// Borrow the wrapped element.
    ///
    /// # Panics
    ///
    /// Panics if called while a setter hook on this element is running.
    pub fn element(&self) -> Ref<'_, E> {
        self.element.borrow()
    }

    /// The user-input policy this element was created with.
    #[must_use]
    pub fn policy(&self) -> &UserInputPolicy {
        &self.policy
    }

    /// Read a property from the element.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<PropValue> {
        self.element.borrow().property(key)
    }

    /// Write a property, then notify every target bound to it.
    ///
    /// The write goes through the element's setter hook for `key` when one
    /// exists. Targets are notified even when the value did not change,
    /// unless the same value is already fanning out for `key` on this
    /// element (an echo).
    /// The first target error stops the fan-out and is returned.
    pub fn set(&self, key: &str, value: impl Into<PropValue>) -> Result<(), BindError> {
        let value = value.into();
        self.element.borrow_mut().apply_property(key, value.clone())?;
        self.notify_all(key, &value)
    }

    /// Write several properties in order, each as by [`set`](Self::set).
    ///
    /// Stops at the first error; earlier pairs stay applied.
    pub fn set_many<I, K, V>(&self, pairs: I) -> Result<(), BindError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<PropValue>,
    {
        for (key, value) in pairs {
            self.set(key.as_ref(), value)?;
        }
        Ok(())
    }

    /// Bind `key` so that writes to it reach `target`.
    ///
    /// The target receives the property named by
    /// [`BindOptions::target_key`], or `key` when unset. With
    /// [`BindOptions::two_way`], a target that is itself [`Bindable`] gets
    /// the reverse binding too (one hop, never recursive).
    ///
    /// User-editable properties (see [`UserInputPolicy`]) also get a change
    /// listener on the element, attached once per key.
    pub fn bind_var(&self, key: &str, target: Target, options: &BindOptions) {
        let target_key = options.resolve_target_key(key);

        if self.is_user_input_change(key) {
            self.attach_change_listener(key);
        }

        tracing::debug!(
            key,
            target_key,
            kind = target.kind().as_str(),
            two_way = options.is_two_way(),
            "bind_var"
        );

        let reverse = options.is_two_way().then(|| target.upgrade_settable()).flatten();

        self.bindings
            .borrow_mut()
            .entry(key.to_owned())
            .or_default()
            .push(target, target_key);

        if let Some(settable) = reverse
            && let Some(peer) = settable.as_bindable()
        {
            peer.bind_var(
                target_key,
                self.as_target(),
                &BindOptions::new().target_key(key),
            );
        }
    }

    /// Remove bindings for `key`.
    ///
    /// Without a target, every entry for `key` goes. With one, only the first
    /// entry matching the target and resolved target key is cleared; later
    /// duplicates stay. With [`BindOptions::two_way`], the reverse entry on a
    /// [`Bindable`] target is removed first. Unknown keys and unmatched
    /// targets are ignored.
    ///
    /// The change listener for `key`, if any, stays attached.
    pub fn unbind_var(&self, key: &str, target: Option<&Target>, options: &BindOptions) {
        let target_key = options.resolve_target_key(key);

        let Some(target) = target else {
            if self.bindings.borrow_mut().remove(key).is_some() {
                tracing::debug!(key, "unbind_var all");
            }
            return;
        };

        let found = self
            .bindings
            .borrow()
            .get(key)
            .and_then(|list| list.position(target, target_key))
            .is_some();
        if !found {
            return;
        }

        if options.is_two_way()
            && let Some(settable) = target.upgrade_settable()
            && let Some(peer) = settable.as_bindable()
        {
            peer.unbind_var(
                target_key,
                Some(&self.as_target()),
                &BindOptions::new().target_key(key),
            );
        }

        if let Some(list) = self.bindings.borrow_mut().get_mut(key) {
            list.remove_first(target, target_key);
        }
        tracing::debug!(key, target_key, kind = target.kind().as_str(), "unbind_var");
    }

    /// Simulate a user edit: store `value` without notifying targets, then
    /// dispatch the element's "change" notification.
    pub fn user_edit(&self, key: &str, value: impl Into<PropValue>) -> Result<(), BindError> {
        self.element.borrow_mut().set_property(key, value.into());
        self.dispatch(&ChangeEvent::for_property(key))
    }

    /// Dispatch the element's "change" notification without writing anything.
    pub fn dispatch_change(&self) -> Result<(), BindError> {
        self.dispatch(&ChangeEvent::default())
    }

    /// Keys with a binding table, sorted.
    #[must_use]
    pub fn bound_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.bindings.borrow().keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    /// Whether `key` has a binding table (possibly with no live entries).
    #[must_use]
    pub fn is_bound(&self, key: &str) -> bool {
        self.bindings.borrow().contains_key(key)
    }

    /// Live bindings for `key`.
    #[must_use]
    pub fn binding_count(&self, key: &str) -> usize {
        self.bindings.borrow().get(key).map_or(0, BindingList::len)
    }

    /// Slots for `key`, holes left by removal included.
    #[must_use]
    pub fn slot_count(&self, key: &str) -> usize {
        self.bindings
            .borrow()
            .get(key)
            .map_or(0, BindingList::slot_count)
    }

    /// Drop holes from the table for `key`. Returns how many were removed.
    pub fn compact_bindings(&self, key: &str) -> usize {
        self.bindings
            .borrow_mut()
            .get_mut(key)
            .map_or(0, BindingList::compact)
    }

    /// Whether a change listener is attached for `key`.
    #[must_use]
    pub fn has_change_listener(&self, key: &str) -> bool {
        self.change_listeners.borrow().contains_key(key)
    }

    fn is_user_input_change(&self, key: &str) -> bool {
        let element = self.element.borrow();
        self.policy.is_user_input_change(element.tag_name(), key)
    }

    fn attach_change_listener(&self, key: &str) {
        if self.has_change_listener(key) {
            return;
        }

        let source = self.this.clone();
        let watched = key.to_owned();
        let handler: ChangeHandler = Rc::new(move |_: &ChangeEvent| -> Result<(), ListenerError> {
            let Some(source) = source.upgrade() else {
                return Ok(());
            };
            let value = source.get(&watched).unwrap_or_default();
            source.notify_all(&watched, &value)?;
            Ok(())
        });

        let id = self.element.borrow_mut().add_change_listener(handler);
        self.change_listeners.borrow_mut().insert(key.to_owned(), id);
        tracing::debug!(key, listener = id.get(), "change listener attached");
    }

    fn dispatch(&self, event: &ChangeEvent) -> Result<(), BindError> {
        let handlers = self.element.borrow().change_listeners();
        for handler in handlers {
            handler(event).map_err(BindError::from_listener)?;
        }
        Ok(())
    }

    fn enter_fanout(&self, key: &str, value: &PropValue) -> Option<FanoutGuard<'_>> {
        let mut active = self.fanning_out.borrow_mut();
        let stack = active.entry(key.to_owned()).or_default();
        if stack.iter().any(|pass| same_value(&pass.value, value)) {
            return None;
        }
        for pass in stack.iter_mut() {
            pass.superseded = true;
        }
        let depth = stack.len();
        stack.push(ActivePass {
            value: value.clone(),
            superseded: false,
        });
        Some(FanoutGuard {
            active: &self.fanning_out,
            key: key.to_owned(),
            depth,
        })
    }

    fn notify_all(&self, key: &str, value: &PropValue) -> Result<(), BindError> {
        let entries = match self.bindings.borrow().get(key) {
            Some(list) => list.snapshot(),
            None => return Ok(()),
        };
        let Some(guard) = self.enter_fanout(key, value) else {
            tracing::trace!(key, "echo suppressed");
            return Ok(());
        };

        let _span = tracing::debug_span!("bind_fanout", key, entries = entries.len()).entered();
        for entry in &entries {
            tracing::trace!(
                key,
                target_key = %entry.target_key,
                kind = entry.target.kind().as_str(),
                "notify"
            );
            entry.target.deliver(&entry.target_key, value)?;
            if guard.superseded() {
                tracing::trace!(key, "fan-out superseded by newer value");
                break;
            }
        }
        Ok(())
    }
}

impl<E: ElementHost + 'static> Settable for BoundElement<E> {
    fn set(&self, key: &str, value: PropValue) -> Result<(), BindError> {
        Self::set(self, key, value)
    }

    fn as_bindable(&self) -> Option<&dyn Bindable> {
        Some(self)
    }
}

impl<E: ElementHost + 'static> Bindable for BoundElement<E> {
    fn bind_var(&self, key: &str, target: Target, options: &BindOptions) {
        Self::bind_var(self, key, target, options);
    }

    fn unbind_var(&self, key: &str, target: Option<&Target>, options: &BindOptions) {
        Self::unbind_var(self, key, target, options);
    }
}

impl<E: ElementHost + fmt::Debug> fmt::Debug for BoundElement<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self.bindings.borrow().keys().cloned().collect();
        keys.sort_unstable();
        f.debug_struct("BoundElement")
            .field("element", &self.element.borrow())
            .field("bound_keys", &keys)
            .field("change_listeners", &self.change_listeners.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindery_core::{Element, ElementError, PropertyBag};
    use std::cell::Cell;

    type Log = Rc<RefCell<Vec<(String, PropValue)>>>;

    fn recorder() -> (Log, Target) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let target = Target::callback(move |k, v| sink.borrow_mut().push((k.to_owned(), v.clone())));
        (log, target)
    }

    #[test]
    fn set_writes_through_hooks_then_notifies_raw_value() {
        let el = BoundElement::new(Element::new("div"));
        let (log, cb) = recorder();
        el.bind_var("class", cb, &BindOptions::new());

        el.set("class", "wide").unwrap();
        assert_eq!(el.element().raw("className"), Some(&PropValue::from("wide")));
        assert_eq!(&*log.borrow(), &[("class".to_owned(), PropValue::from("wide"))]);
    }

    #[test]
    fn hook_error_skips_fan_out() {
        let el = BoundElement::new(Element::new("div"));
        let (log, cb) = recorder();
        el.bind_var("tag", cb, &BindOptions::new());

        let err = el.set("tag", "span").unwrap_err();
        assert_eq!(err, BindError::Element(ElementError::ReadOnly { key: "tag".into() }));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn unchanged_value_still_notifies() {
        let el = BoundElement::new(Element::new("div"));
        let (log, cb) = recorder();
        el.bind_var("title", cb, &BindOptions::new());
        el.set("title", "a").unwrap();
        el.set("title", "a").unwrap();
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn set_many_applies_in_order() {
        let el = BoundElement::new(Element::new("div"));
        let (log, cb) = recorder();
        el.bind_var("a", cb.clone(), &BindOptions::new());
        el.bind_var("b", cb, &BindOptions::new());

        el.set_many([("b", 2), ("a", 1)]).unwrap();
        let keys: Vec<String> = log.borrow().iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(el.get("a"), Some(PropValue::Int(1)));
    }

    #[test]
    fn set_many_stops_at_first_error() {
        let el = BoundElement::new(Element::new("div"));
        let (log, cb) = recorder();
        el.bind_var("a", cb.clone(), &BindOptions::new());
        el.bind_var("b", cb, &BindOptions::new());

        let err = el
            .set_many([
                ("a", PropValue::Int(1)),
                ("tag", PropValue::from("span")),
                ("b", PropValue::Int(2)),
            ])
            .unwrap_err();
        assert_eq!(err, BindError::Element(ElementError::ReadOnly { key: "tag".into() }));
        assert_eq!(el.get("a"), Some(PropValue::Int(1)));
        assert_eq!(el.get("b"), None);
        assert_eq!(&*log.borrow(), &[("a".to_owned(), PropValue::Int(1))]);
    }

    #[test]
    fn normalizing_handler_propagates_new_value() {
        let el = BoundElement::new(Element::new("div"));
        let weak_el = Rc::downgrade(&el);
        el.bind_var(
            "title",
            Target::try_callback(move |k, v| {
                let (Some(el), PropValue::Text(text)) = (weak_el.upgrade(), v) else {
                    return Ok(());
                };
                let trimmed = text.trim();
                if trimmed == text.as_str() {
                    return Ok(());
                }
                el.set(k, trimmed)
            }),
            &BindOptions::new(),
        );
        let (log, cb) = recorder();
        el.bind_var("title", cb, &BindOptions::new());

        el.set("title", "  hi  ").unwrap();
        assert_eq!(el.get("title"), Some(PropValue::from("hi")));
        assert_eq!(&*log.borrow(), &[("title".to_owned(), PropValue::from("hi"))]);
    }

    #[test]
    fn oscillating_handler_terminates() {
        let el = BoundElement::new(Element::new("div"));
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        let weak_el = Rc::downgrade(&el);
        el.bind_var(
            "v",
            Target::try_callback(move |k, v| {
                c.set(c.get() + 1);
                let flipped = if *v == PropValue::from("a") { "b" } else { "a" };
                match weak_el.upgrade() {
                    Some(el) => el.set(k, flipped),
                    None => Ok(()),
                }
            }),
            &BindOptions::new(),
        );

        el.set("v", "a").unwrap();
        assert_eq!(calls.get(), 2);
        assert_eq!(el.get("v"), Some(PropValue::from("a")));
    }

    #[test]
    fn nan_reentry_is_an_echo() {
        let el = BoundElement::new(Element::new("div"));
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        let weak_el = Rc::downgrade(&el);
        el.bind_var(
            "v",
            Target::try_callback(move |k, v| {
                c.set(c.get() + 1);
                match weak_el.upgrade() {
                    Some(el) => el.set(k, v.clone()),
                    None => Ok(()),
                }
            }),
            &BindOptions::new(),
        );

        el.set("v", f64::NAN).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn custom_target_key_is_used() {
        let el = BoundElement::new(Element::new("div"));
        let bag = Rc::new(RefCell::new(PropertyBag::new()));
        el.bind_var("title", Target::plain(&bag), &BindOptions::new().target_key("heading"));
        el.set("title", "Hi").unwrap();
        assert_eq!(bag.borrow().get("heading"), Some(&PropValue::from("Hi")));
        assert!(!bag.borrow().contains("title"));
    }

    #[test]
    fn two_way_between_elements_does_not_echo_forever() {
        let a = BoundElement::new(Element::new("div"));
        let b = BoundElement::new(Element::new("div"));
        let (log, cb) = recorder();
        b.bind_var("y", cb, &BindOptions::new());
        a.bind_var("x", b.as_target(), &BindOptions::new().target_key("y").two_way(true));

        a.set("x", 1).unwrap();
        assert_eq!(b.get("y"), Some(PropValue::Int(1)));
        assert_eq!(log.borrow().len(), 1);

        b.set("y", 2).unwrap();
        assert_eq!(a.get("x"), Some(PropValue::Int(2)));
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn two_way_has_no_initial_sync() {
        let a = BoundElement::new(Element::new("div").with_property("x", 5));
        let b = BoundElement::new(Element::new("div"));
        a.bind_var("x", b.as_target(), &BindOptions::new().target_key("y").two_way(true));
        assert_eq!(b.get("y"), None);
        assert_eq!(b.binding_count("y"), 1);
    }

    #[test]
    fn two_way_unbind_removes_both_directions() {
        let a = BoundElement::new(Element::new("div"));
        let b = BoundElement::new(Element::new("div"));
        let opts = BindOptions::new().target_key("y").two_way(true);
        a.bind_var("x", b.as_target(), &opts);

        a.unbind_var("x", Some(&b.as_target()), &opts);
        assert_eq!(a.binding_count("x"), 0);
        assert_eq!(b.binding_count("y"), 0);
        assert_eq!(a.slot_count("x"), 1);
    }

    #[test]
    fn one_way_unbind_leaves_reverse_entry() {
        let a = BoundElement::new(Element::new("div"));
        let b = BoundElement::new(Element::new("div"));
        a.bind_var("x", b.as_target(), &BindOptions::new().target_key("y").two_way(true));

        a.unbind_var("x", Some(&b.as_target()), &BindOptions::new().target_key("y"));
        assert_eq!(a.binding_count("x"), 0);
        assert_eq!(b.binding_count("y"), 1);
    }

    #[test]
    fn two_way_to_callback_is_one_way() {
        let a = BoundElement::new(Element::new("div"));
        let (log, cb) = recorder();
        a.bind_var("x", cb, &BindOptions::new().two_way(true));
        a.set("x", "v").unwrap();
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(a.bound_keys(), ["x"]);
    }

    #[test]
    fn target_error_aborts_remaining_notifications() {
        let el = BoundElement::new(Element::new("div"));
        let (log, first) = recorder();
        let (later, last) = recorder();
        el.bind_var("v", first, &BindOptions::new());
        el.bind_var(
            "v",
            Target::try_callback(|k, _| Err(BindError::rejected(k, "no"))),
            &BindOptions::new(),
        );
        el.bind_var("v", last, &BindOptions::new());

        assert_eq!(el.set("v", 1), Err(BindError::rejected("v", "no")));
        assert_eq!(log.borrow().len(), 1);
        assert!(later.borrow().is_empty());
        // The element still holds the written value.
        assert_eq!(el.get("v"), Some(PropValue::Int(1)));
    }

    #[test]
    fn dropped_settable_target_fails_at_notify() {
        let a = BoundElement::new(Element::new("div"));
        let b = BoundElement::new(Element::new("div"));
        a.bind_var("x", b.as_target(), &BindOptions::new());
        drop(b);
        assert_eq!(
            a.set("x", 1),
            Err(BindError::TargetDropped {
                target_key: "x".into()
            })
        );
    }

    #[test]
    fn handler_unbinding_itself_applies_from_next_write() {
        let el = BoundElement::new(Element::new("div"));
        let calls = Rc::new(Cell::new(0));
        let (log, after) = recorder();

        let me: Rc<RefCell<Option<Target>>> = Rc::new(RefCell::new(None));
        let weak_el = Rc::downgrade(&el);
        let me_inner = Rc::clone(&me);
        let c = Rc::clone(&calls);
        let selfish = Target::callback(move |_, _| {
            c.set(c.get() + 1);
            if let (Some(el), Some(me)) = (weak_el.upgrade(), me_inner.borrow().as_ref()) {
                el.unbind_var("v", Some(me), &BindOptions::new());
            }
        });
        *me.borrow_mut() = Some(selfish.clone());

        el.bind_var("v", selfish, &BindOptions::new());
        el.bind_var("v", after, &BindOptions::new());

        el.set("v", 1).unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(log.borrow().len(), 1, "snapshot still notifies later entries");

        el.set("v", 2).unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn handler_binding_during_fan_out_waits_for_next_write() {
        let el = BoundElement::new(Element::new("div"));
        let (log, late) = recorder();
        let weak_el = Rc::downgrade(&el);
        let pending = RefCell::new(Some(late));
        el.bind_var(
            "v",
            Target::callback(move |_, _| {
                if let (Some(el), Some(t)) = (weak_el.upgrade(), pending.borrow_mut().take()) {
                    el.bind_var("v", t, &BindOptions::new());
                }
            }),
            &BindOptions::new(),
        );

        el.set("v", 1).unwrap();
        assert!(log.borrow().is_empty());
        el.set("v", 2).unwrap();
        assert_eq!(&*log.borrow(), &[("v".to_owned(), PropValue::Int(2))]);
    }

    #[test]
    fn non_input_elements_get_no_change_listener() {
        let el = BoundElement::new(Element::new("div"));
        let (log, cb) = recorder();
        el.bind_var("value", cb, &BindOptions::new());
        assert!(!el.has_change_listener("value"));

        el.user_edit("value", "typed").unwrap();
        assert!(log.borrow().is_empty());
        assert_eq!(el.get("value"), Some(PropValue::from("typed")));
    }

    #[test]
    fn custom_policy_enables_listener() {
        let policy = UserInputPolicy {
            tags: vec!["textarea".into()],
            properties: vec!["value".into()],
        };
        let el = BoundElement::with_policy(Element::new("TEXTAREA"), policy);
        let (log, cb) = recorder();
        el.bind_var("value", cb, &BindOptions::new());
        assert!(el.has_change_listener("value"));

        el.user_edit("value", "note").unwrap();
        assert_eq!(&*log.borrow(), &[("value".to_owned(), PropValue::from("note"))]);
    }

    #[test]
    fn change_listener_after_drop_is_inert() {
        let el = BoundElement::new(Element::new("input"));
        el.bind_var("value", Target::callback(|_, _| {}), &BindOptions::new());
        let handlers = el.element().change_listeners();
        drop(el);
        for handler in handlers {
            assert!(handler(&ChangeEvent::default()).is_ok());
        }
    }

    #[test]
    fn unbind_all_keeps_change_listener() {
        let el = BoundElement::new(Element::new("input"));
        el.bind_var("value", Target::callback(|_, _| {}), &BindOptions::new());
        el.unbind_var("value", None, &BindOptions::new());
        assert!(!el.is_bound("value"));
        assert!(el.has_change_listener("value"));
        assert!(el.dispatch_change().is_ok());
    }

    #[test]
    fn compact_reclaims_holes() {
        let el = BoundElement::new(Element::new("div"));
        let (_, a) = recorder();
        let (_, b) = recorder();
        el.bind_var("k", a.clone(), &BindOptions::new());
        el.bind_var("k", b, &BindOptions::new());
        el.unbind_var("k", Some(&a), &BindOptions::new());

        assert_eq!((el.binding_count("k"), el.slot_count("k")), (1, 2));
        assert_eq!(el.compact_bindings("k"), 1);
        assert_eq!((el.binding_count("k"), el.slot_count("k")), (1, 1));
        assert_eq!(el.compact_bindings("missing"), 0);
    }

    #[test]
    fn debug_lists_keys() {
        let el = BoundElement::new(Element::new("div"));
        el.bind_var("b", Target::callback(|_, _| {}), &BindOptions::new());
        el.bind_var("a", Target::callback(|_, _| {}), &BindOptions::new());
        let debug = format!("{el:?}");
        assert!(debug.contains(r#"bound_keys: ["a", "b"]"#), "{debug}");
    }
}
