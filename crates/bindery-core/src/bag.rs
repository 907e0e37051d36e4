#![forbid(unsafe_code)]

//! Plain property bags.
//!
//! A [`PropertyBag`] is the bare-object case of a binding target: it has no
//! setter logic, so a binding writes straight into its map.

use ahash::AHashMap;

use crate::value::PropValue;

/// A string-keyed map of property values with no behavior of its own.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyBag {
    values: AHashMap<String, PropValue>,
}

impl PropertyBag {
    /// Create an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a property.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.values.get(key)
    }

    /// Assign a property, returning the previous value.
    pub fn assign(&mut self, key: impl Into<String>, value: PropValue) -> Option<PropValue> {
        self.values.insert(key.into(), value)
    }

    /// Remove a property.
    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.values.remove(key)
    }

    /// Whether the property is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the bag holds no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate properties in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
