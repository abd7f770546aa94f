//! Trusted request fields.
//!
//! A sandstorm proxy asserts facts about the user (permissions, preferences)
//! as key/value pairs. Only the keys in [`VALID_FIELDS`] are ever stored;
//! anything else is dropped when the map is built.

use std::collections::HashMap;

use tracing::debug;

/// Field names that may be supplied by the trusted proxy.
pub const VALID_FIELDS: [&str; 17] = [
    "sandstorm.action",
    "user.scope",
    "user.locale",
    "user.viewMode",
    "user.singleClick",
    "user.sorting.by",
    "user.sorting.asc",
    "user.commands",
    "user.hideDotfiles",
    "user.perm.admin",
    "user.perm.execute",
    "user.perm.create",
    "user.perm.rename",
    "user.perm.modify",
    "user.perm.delete",
    "user.perm.share",
    "user.perm.download",
];

/// Check if the provided field name is on the allow-list.
///
/// The match is exact; use [`canonical_field`] for names that may have lost
/// their case on the way (HTTP header names).
#[inline]
pub fn is_valid(name: &str) -> bool {
    VALID_FIELDS.contains(&name)
}

/// Map a field name to its allow-listed spelling, ignoring ASCII case.
pub fn canonical_field(name: &str) -> Option<&'static str> {
    VALID_FIELDS
        .iter()
        .copied()
        .find(|valid| valid.eq_ignore_ascii_case(name))
}

/// Request-scoped trusted fields with typed, defaulted accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustedFields {
    values: HashMap<&'static str, String>,
}

impl TrustedFields {
    /// Create an empty field set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from key/value pairs, dropping keys that are not allow-listed.
    ///
    /// # Example
    /// ```
    /// use sandgate_auth::TrustedFields;
    ///
    /// let fields = TrustedFields::from_pairs([("user.perm.admin", "true"), ("bogus", "1")]);
    /// assert_eq!(fields.len(), 1);
    /// assert!(fields.get_boolean("user.perm.admin", false));
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut fields = Self::new();
        for (key, value) in pairs {
            fields.insert(key.as_ref(), value);
        }
        fields
    }

    /// Insert a field, replacing any previous value.
    ///
    /// Returns `false` (and stores nothing) if the key is not allow-listed.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) -> bool {
        match canonical_field(key) {
            Some(canonical) => {
                self.values.insert(canonical, value.into());
                true
            }
            None => {
                debug!(field = key, "dropping unknown trusted field");
                false
            }
        }
    }

    /// Overlay `other` on top of `self`; values from `other` win.
    pub fn merge(&mut self, other: TrustedFields) {
        self.values.extend(other.values);
    }

    /// Raw value of a field, if present.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Number of fields present.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no fields are present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// String value or the provided default.
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    /// Boolean value or the provided default.
    ///
    /// A present value is true only if it is exactly `"true"`; `"TRUE"`,
    /// `"1"` and `"yes"` are all false.
    pub fn get_boolean(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(value) => value == "true",
            None => default,
        }
    }

    /// Space-separated list value or the provided default.
    ///
    /// A value that is blank after trimming falls back to the default. The
    /// split is on single spaces, so consecutive spaces yield empty items.
    pub fn get_array(&self, key: &str, default: &[String]) -> Vec<String> {
        match self.get(key) {
            Some(value) if !value.trim().is_empty() => {
                value.split(' ').map(str::to_string).collect()
            }
            _ => default.to_vec(),
        }
    }
}
