#![forbid(unsafe_code)]

//! Recording callback targets.

use std::cell::RefCell;
use std::rc::Rc;

use bindery_core::PropValue;
use bindery_runtime::Target;

/// A callback target that logs every delivery.
///
/// [`target`](Self::target) always returns the same identity, so the
/// recorder can be unbound after it was bound.
#[derive(Clone)]
pub struct Recorder {
    log: Rc<RefCell<Vec<(String, PropValue)>>>,
    target: Target,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::tagged(None)
    }

    /// A recorder that also appends `label` to a shared sequence log on
    /// every delivery, so ordering across recorders can be checked.
    #[must_use]
    pub fn in_sequence(label: &'static str, sequence: &SequenceLog) -> Self {
        Self::tagged(Some((label, Rc::clone(&sequence.0))))
    }

    fn tagged(sequence: Option<(&'static str, Rc<RefCell<Vec<&'static str>>>)>) -> Self {
        let log: Rc<RefCell<Vec<(String, PropValue)>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let target = Target::callback(move |key, value| {
            sink.borrow_mut().push((key.to_owned(), value.clone()));
            if let Some((label, seq)) = &sequence {
                seq.borrow_mut().push(*label);
            }
        });
        Self { log, target }
    }

    /// The target to bind. Clones share identity.
    #[must_use]
    pub fn target(&self) -> Target {
        self.target.clone()
    }

    /// Deliveries so far.
    #[must_use]
    pub fn calls(&self) -> Vec<(String, PropValue)> {
        self.log.borrow().clone()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.log.borrow().len()
    }

    /// The most recent delivery.
    #[must_use]
    pub fn last(&self) -> Option<(String, PropValue)> {
        self.log.borrow().last().cloned()
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Recorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recorder")
            .field("calls", &self.call_count())
            .finish()
    }
}

/// Shared ordering log for [`Recorder::in_sequence`].
#[derive(Clone, Debug, Default)]
pub struct SequenceLog(Rc<RefCell<Vec<&'static str>>>);

impl SequenceLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels in delivery order.
    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        self.0.borrow().clone()
    }
}
