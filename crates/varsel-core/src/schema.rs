//! Declarative attribute compatibility and disambiguation rules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-attribute rules consulted by attribute matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributesSchema {
    pub attributes: BTreeMap<String, AttributeRules>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRules {
    /// `[consumer value, producer value]` pairs accepted besides equality.
    #[serde(default)]
    pub compatible: Vec<[String; 2]>,
    /// Producer values to favour, best first, when several variants match.
    #[serde(default)]
    pub prefer: Vec<String>,
}

impl AttributesSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `producer` when the consumer asks for `consumer` on `attribute`.
    pub fn compatible(
        mut self,
        attribute: impl Into<String>,
        consumer: impl Into<String>,
        producer: impl Into<String>,
    ) -> Self {
        self.attributes
            .entry(attribute.into())
            .or_default()
            .compatible
            .push([consumer.into(), producer.into()]);
        self
    }

    pub fn prefer(mut self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .entry(attribute.into())
            .or_default()
            .prefer
            .push(value.into());
        self
    }

    pub fn is_compatible(&self, attribute: &str, consumer: &str, producer: &str) -> bool {
        consumer == producer
            || self.attributes.get(attribute).is_some_and(|rules| {
                rules
                    .compatible
                    .iter()
                    .any(|[c, p]| c == consumer && p == producer)
            })
    }

    /// Rank of `producer` in the preference list for `attribute`; lower is better.
    pub fn preference_rank(&self, attribute: &str, producer: &str) -> Option<usize> {
        self.attributes
            .get(attribute)?
            .prefer
            .iter()
            .position(|v| v == producer)
    }

    /// Attributes that declare preferences, in name order.
    pub fn preferred_attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|(_, rules)| !rules.prefer.is_empty())
            .map(|(name, _)| name.as_str())
    }
}
