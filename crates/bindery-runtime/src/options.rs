#![forbid(unsafe_code)]

//! Options for `bind_var` / `unbind_var`.

/// How a binding is established or removed.
///
/// ```
/// use bindery_runtime::BindOptions;
///
/// let opts = BindOptions::new().target_key("title").two_way(true);
/// assert_eq!(opts.resolve_target_key("name"), "title");
/// assert!(opts.is_two_way());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BindOptions {
    target_key: Option<String>,
    two_way: bool,
}

impl BindOptions {
    /// One-way binding onto the same property name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver to `key` on the target instead of the source key.
    #[must_use]
    pub fn target_key(mut self, key: impl Into<String>) -> Self {
        self.target_key = Some(key.into());
        self
    }

    /// Also bind (or unbind) the reverse direction on the target.
    #[must_use]
    pub fn two_way(mut self, enabled: bool) -> Self {
        self.two_way = enabled;
        self
    }

    /// The property name the target receives for source `key`.
    #[must_use]
    pub fn resolve_target_key<'a>(&'a self, key: &'a str) -> &'a str {
        self.target_key.as_deref().unwrap_or(key)
    }

    /// Whether the reverse direction is requested.
    #[must_use]
    pub const fn is_two_way(&self) -> bool {
        self.two_way
    }
}
