#![forbid(unsafe_code)]

//! Binding targets.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use bindery_core::{PropValue, PropertyBag};

use crate::error::BindError;
use crate::options::BindOptions;

/// Something that accepts property writes by name.
pub trait Settable {
    /// Write `value` to the property `key`.
    fn set(&self, key: &str, value: PropValue) -> Result<(), BindError>;

    /// The binding capability of this target, if it has one.
    ///
    /// Two-way binds use this to register the reverse direction.
    fn as_bindable(&self) -> Option<&dyn Bindable> {
        None
    }
}

/// An object whose properties can be bound to targets.
pub trait Bindable: Settable {
    /// Bind `key` so writes to it reach `target`.
    fn bind_var(&self, key: &str, target: Target, options: &BindOptions);

    /// Remove bindings for `key`. `None` removes all of them.
    fn unbind_var(&self, key: &str, target: Option<&Target>, options: &BindOptions);
}

type Callback = dyn Fn(&str, &PropValue) -> Result<(), BindError>;

/// Where a bound value is delivered.
///
/// Cloning a `Target` keeps its identity: a clone unbinds the original.
#[derive(Clone)]
pub enum Target {
    /// Invoked as `f(target_key, value)`.
    Callback(Rc<Callback>),
    /// Receives `target.set(target_key, value)`. Held weakly so two-way
    /// links between elements do not keep each other alive.
    Settable(Weak<dyn Settable>),
    /// Receives a direct `bag[target_key] = value`.
    Plain(Rc<RefCell<PropertyBag>>),
}

/// The shape of a [`Target`], for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetKind {
    Callback,
    Settable,
    Plain,
}

impl TargetKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Callback => "callback",
            Self::Settable => "settable",
            Self::Plain => "plain",
        }
    }
}

impl Target {
    /// A callback target that cannot fail.
    pub fn callback(f: impl Fn(&str, &PropValue) + 'static) -> Self {
        Self::Callback(Rc::new(
            move |key: &str, value: &PropValue| -> Result<(), BindError> {
                f(key, value);
                Ok(())
            },
        ))
    }

    /// A callback target whose error aborts the fan-out.
    pub fn try_callback(f: impl Fn(&str, &PropValue) -> Result<(), BindError> + 'static) -> Self {
        Self::Callback(Rc::new(f))
    }

    /// A settable target. Only a weak reference is kept.
    pub fn settable<T: Settable + 'static>(target: &Rc<T>) -> Self {
        let weak: Weak<T> = Rc::downgrade(target);
        Self::Settable(weak)
    }

    /// A plain property bag target.
    pub fn plain(bag: &Rc<RefCell<PropertyBag>>) -> Self {
        Self::Plain(Rc::clone(bag))
    }

    #[must_use]
    pub fn kind(&self) -> TargetKind {
        match self {
            Self::Callback(_) => TargetKind::Callback,
            Self::Settable(_) => TargetKind::Settable,
            Self::Plain(_) => TargetKind::Plain,
        }
    }

    /// Identity comparison: same shape and same underlying allocation.
    #[must_use]
    pub fn same_target(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Callback(a), Self::Callback(b)) => {
                std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
            }
            (Self::Settable(a), Self::Settable(b)) => {
                std::ptr::addr_eq(Weak::as_ptr(a), Weak::as_ptr(b))
            }
            (Self::Plain(a), Self::Plain(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// The live settable behind this target, if it is one and still alive.
    #[must_use]
    pub fn upgrade_settable(&self) -> Option<Rc<dyn Settable>> {
        match self {
            Self::Settable(weak) => weak.upgrade(),
            _ => None,
        }
    }

    /// Deliver `value` to `target_key` on this target.
    pub(crate) fn deliver(&self, target_key: &str, value: &PropValue) -> Result<(), BindError> {
        match self {
            Self::Callback(f) => f(target_key, value),
            Self::Settable(weak) => match weak.upgrade() {
                Some(target) => target.set(target_key, value.clone()),
                None => {
                    tracing::warn!(target_key, "settable binding target dropped");
                    Err(BindError::TargetDropped {
                        target_key: target_key.to_owned(),
                    })
                }
            },
            Self::Plain(bag) => {
                let mut bag = bag.try_borrow_mut().map_err(|_| BindError::TargetBusy {
                    target_key: target_key.to_owned(),
                })?;
                bag.assign(target_key, value.clone());
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callback(cb) => f
                .debug_tuple("Callback")
                .field(&Rc::as_ptr(cb).cast::<()>())
                .finish(),
            Self::Settable(weak) => f
                .debug_struct("Settable")
                .field("alive", &(weak.strong_count() > 0))
                .finish(),
            Self::Plain(bag) => f
                .debug_tuple("Plain")
                .field(&Rc::as_ptr(bag))
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sink {
        log: RefCell<Vec<(String, PropValue)>>,
    }

    impl Settable for Sink {
        fn set(&self, key: &str, value: PropValue) -> Result<(), BindError> {
            self.log.borrow_mut().push((key.to_owned(), value));
            Ok(())
        }
    }

    fn sink() -> Rc<Sink> {
        Rc::new(Sink {
            log: RefCell::new(Vec::new()),
        })
    }

    #[test]
    fn callback_receives_key_and_value() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let target = Target::callback(move |k, v| s.borrow_mut().push((k.to_owned(), v.clone())));
        target.deliver("title", &"x".into()).unwrap();
        assert_eq!(&*seen.borrow(), &[("title".to_owned(), PropValue::from("x"))]);
        assert_eq!(target.kind(), TargetKind::Callback);
    }

    #[test]
    fn settable_receives_set() {
        let s = sink();
        let target = Target::settable(&s);
        target.deliver("y", &PropValue::Int(4)).unwrap();
        assert_eq!(&*s.log.borrow(), &[("y".to_owned(), PropValue::Int(4))]);
    }

    #[test]
    fn dropped_settable_fails_at_delivery() {
        let s = sink();
        let target = Target::settable(&s);
        drop(s);
        assert_eq!(
            target.deliver("y", &PropValue::Null),
            Err(BindError::TargetDropped {
                target_key: "y".into()
            })
        );
        assert!(target.upgrade_settable().is_none());
    }

    #[test]
    fn plain_bag_is_assigned() {
        let bag = Rc::new(RefCell::new(PropertyBag::new()));
        let target = Target::plain(&bag);
        target.deliver("z", &true.into()).unwrap();
        assert_eq!(bag.borrow().get("z"), Some(&PropValue::Bool(true)));
    }

    #[test]
    fn borrowed_bag_reports_busy() {
        let bag = Rc::new(RefCell::new(PropertyBag::new()));
        let target = Target::plain(&bag);
        let _guard = bag.borrow();
        assert!(matches!(
            target.deliver("z", &PropValue::Null),
            Err(BindError::TargetBusy { .. })
        ));
    }

    #[test]
    fn identity_follows_allocation() {
        let a = sink();
        let b = sink();
        let ta = Target::settable(&a);
        assert!(ta.same_target(&ta.clone()));
        assert!(ta.same_target(&Target::settable(&a)));
        assert!(!ta.same_target(&Target::settable(&b)));

        let cb = Target::callback(|_, _| {});
        assert!(cb.same_target(&cb.clone()));
        assert!(!cb.same_target(&Target::callback(|_, _| {})));
        assert!(!cb.same_target(&ta));
    }

    #[test]
    fn try_callback_error_passes_through() {
        let target = Target::try_callback(|k, _| Err(BindError::rejected(k, "locked")));
        assert_eq!(
            target.deliver("value", &PropValue::Null),
            Err(BindError::rejected("value", "locked"))
        );
    }
}
