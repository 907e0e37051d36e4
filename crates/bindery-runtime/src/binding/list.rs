#![forbid(unsafe_code)]

//! Ordered binding entries for one source property.
//!
//! Removing an entry clears its slot instead of shifting the rest, so the
//! list can hold holes. Every reader skips them. [`BindingList::compact`]
//! drops the holes on request while keeping the live order.

use super::target::Target;

/// One recorded link from a source property to a target property.
#[derive(Clone, Debug)]
pub struct BindingEntry {
    pub target: Target,
    pub target_key: String,
}

impl BindingEntry {
    fn matches(&self, target: &Target, target_key: &str) -> bool {
        self.target_key == target_key && self.target.same_target(target)
    }
}

/// Registration-ordered binding entries with tombstone removal.
#[derive(Clone, Debug, Default)]
pub struct BindingList {
    slots: Vec<Option<BindingEntry>>,
}

impl BindingList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Duplicates are kept.
    pub fn push(&mut self, target: Target, target_key: impl Into<String>) {
        self.slots.push(Some(BindingEntry {
            target,
            target_key: target_key.into(),
        }));
    }

    /// Slot index of the first live entry for `(target, target_key)`.
    #[must_use]
    pub fn position(&self, target: &Target, target_key: &str) -> Option<usize> {
        self.slots.iter().position(|slot| {
            slot.as_ref()
                .is_some_and(|entry| entry.matches(target, target_key))
        })
    }

    /// Clear the first live entry for `(target, target_key)`, leaving a hole.
    pub fn remove_first(&mut self, target: &Target, target_key: &str) -> Option<BindingEntry> {
        let index = self.position(target, target_key)?;
        self.slots[index].take()
    }

    /// Live entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &BindingEntry> {
        self.slots.iter().flatten()
    }

    /// Owned copy of the live entries, for iteration that may re-enter.
    #[must_use]
    pub fn snapshot(&self) -> Vec<BindingEntry> {
        self.iter().cloned().collect()
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether there are no live entries (holes may remain).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Number of slots, holes included.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Drop holes. Returns how many were removed.
    pub fn compact(&mut self) -> usize {
        let before = self.slots.len();
        self.slots.retain(Option::is_some);
        before - self.slots.len()
    }
}
