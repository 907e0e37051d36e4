#![forbid(unsafe_code)]

//! Which elements and properties users can edit directly.
//!
//! User edits to form fields bypass `set`, so the registry subscribes to the
//! element's "change" notification for those properties. The
//! [`UserInputPolicy`] decides which `(tag, property)` pairs qualify.
//!
//! With the `policy-config` feature the policy can be loaded from TOML or
//! JSON:
//!
//! ```toml
//! tags = ["input", "select", "textarea"]
//! properties = ["value", "checked", "selected"]
//! ```

/// User-editable element tags and property names.
///
/// Tag matching is ASCII case-insensitive; property matching is exact.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "policy-config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default, deny_unknown_fields))]
pub struct UserInputPolicy {
    pub tags: Vec<String>,
    pub properties: Vec<String>,
}

impl Default for UserInputPolicy {
    fn default() -> Self {
        Self {
            tags: vec!["input".into(), "select".into()],
            properties: vec!["value".into(), "checked".into(), "selected".into()],
        }
    }
}

impl UserInputPolicy {
    /// A policy under which nothing is user-editable.
    #[must_use]
    pub fn none() -> Self {
        Self {
            tags: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Whether `key` on an element tagged `tag` can change by user input.
    #[must_use]
    pub fn is_user_input_change(&self, tag: &str, key: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
            && self.properties.iter().any(|p| p == key)
    }
}

#[cfg(feature = "policy-config")]
mod config {
    use std::fmt;
    use std::path::Path;

    use super::UserInputPolicy;

    /// Errors from loading a [`UserInputPolicy`].
    #[derive(Debug)]
    pub enum PolicyConfigError {
        Io(std::io::Error),
        Toml(toml::de::Error),
        Json(serde_json::Error),
        /// The file extension is neither `.toml` nor `.json`.
        UnknownFormat(String),
    }

    impl fmt::Display for PolicyConfigError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::Io(err) => write!(f, "policy read failed: {err}"),
                Self::Toml(err) => write!(f, "policy TOML invalid: {err}"),
                Self::Json(err) => write!(f, "policy JSON invalid: {err}"),
                Self::UnknownFormat(path) => {
                    write!(f, "unknown policy format for '{path}' (expected .toml or .json)")
                }
            }
        }
    }

    impl std::error::Error for PolicyConfigError {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            match self {
                Self::Io(err) => Some(err),
                Self::Toml(err) => Some(err),
                Self::Json(err) => Some(err),
                Self::UnknownFormat(_) => None,
            }
        }
    }

    impl UserInputPolicy {
        /// Parse a policy from TOML. Missing fields take their defaults.
        pub fn from_toml_str(src: &str) -> Result<Self, PolicyConfigError> {
            toml::from_str(src).map_err(PolicyConfigError::Toml)
        }

        /// Parse a policy from JSON. Missing fields take their defaults.
        pub fn from_json_str(src: &str) -> Result<Self, PolicyConfigError> {
            serde_json::from_str(src).map_err(PolicyConfigError::Json)
        }

        /// Load a policy file, picking the format from its extension.
        pub fn load(path: impl AsRef<Path>) -> Result<Self, PolicyConfigError> {
            let path = path.as_ref();
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_ascii_lowercase);
            let parse: fn(&str) -> Result<Self, PolicyConfigError> = match ext.as_deref() {
                Some("toml") => Self::from_toml_str,
                Some("json") => Self::from_json_str,
                _ => return Err(PolicyConfigError::UnknownFormat(path.display().to_string())),
            };
            let src = std::fs::read_to_string(path).map_err(PolicyConfigError::Io)?;
            let policy = parse(&src)?;
            tracing::debug!(
                path = %path.display(),
                tags = policy.tags.len(),
                properties = policy.properties.len(),
                "loaded user input policy"
            );
            Ok(policy)
        }
    }
}

#[cfg(feature = "policy-config")]
pub use config::PolicyConfigError;
