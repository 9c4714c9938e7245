//! Attribute sets describing what a consumer asks for and what a variant offers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// An immutable, sorted set of `name = value` attributes.
///
/// Used both for the attributes a consumer requests and for the attributes a
/// variant advertises.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImmutableAttributes(BTreeMap<String, String>);

impl ImmutableAttributes {
    /// The empty attribute set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an attribute set from `(name, value)` pairs. Later pairs win.
    pub fn of<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// A new set with `overrides` layered on top of `self`.
    pub fn merged(&self, overrides: &ImmutableAttributes) -> Self {
        let mut map = self.0.clone();
        for (k, v) in &overrides.0 {
            map.insert(k.clone(), v.clone());
        }
        Self(map)
    }
}

impl fmt::Display for ImmutableAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}={v}")?;
        }
        f.write_str("}")
    }
}
