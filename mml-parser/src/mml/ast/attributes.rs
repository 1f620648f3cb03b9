//! Ordered attribute bags

use crate::mml::error::{MmlError, MmlResult};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_\-]*$").expect("key regex is valid"));

/// String to string attributes in insertion order.
///
/// Values are always strings at this layer; typed interpretation belongs to
/// the caller. Updating an existing key keeps its position, removing a key
/// keeps the order of the rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(IndexMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Attributes(IndexMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert or overwrite a value, returning the previous one
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy every pair of `other` into self, in `other`'s order
    pub fn extend_from(&mut self, other: &Attributes) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }

    /// Render as ` key="value"` pairs, ready to sit after a marker id
    pub fn to_markup(&self) -> String {
        self.iter()
            .map(|(k, v)| format!(" {k}=\"{v}\""))
            .collect()
    }

    /// Check a pair before it enters a document.
    ///
    /// Keys must be identifiers and may not be `id`. Values may not hold a
    /// double quote, a line break or the comment terminator: there is no
    /// escaping scheme. Only API writes are checked; values read from markup
    /// are kept as the lexer found them.
    pub fn validate_pair(key: &str, value: &str) -> MmlResult<()> {
        if !KEY_RE.is_match(key) {
            return Err(MmlError::invalid(format!("invalid attribute key {key:?}")));
        }
        if key == "id" {
            return Err(MmlError::invalid("the id attribute is reserved"));
        }
        if value.contains('"') || value.contains("-->") || value.contains('\n') {
            return Err(MmlError::invalid(format!(
                "unsupported attribute value for {key}: {value:?}"
            )));
        }
        Ok(())
    }

    /// Validate every pair
    pub fn validate(&self) -> MmlResult<()> {
        self.iter()
            .try_for_each(|(key, value)| Self::validate_pair(key, value))
    }
}

impl PartialEq for Attributes {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().eq(other.0.iter())
    }
}

impl Eq for Attributes {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut attributes = Attributes::new();
        for (key, value) in iter {
            attributes.insert(key, value);
        }
        attributes
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
