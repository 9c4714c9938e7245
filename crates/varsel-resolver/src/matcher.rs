//! Attribute-based selection of a single variant.

use std::sync::Arc;

use thiserror::Error;
use varsel_core::attributes::ImmutableAttributes;
use varsel_core::component::{ComponentResolveMetadata, ConfigurationMetadata};
use varsel_core::schema::AttributesSchema;

/// Why attribute matching could not pick a variant.
///
/// Carries no edge context; the caller attributes it to the requesting edge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchFailure {
    #[error("no compatible variant")]
    NoMatch,
    #[error("several variants match equally well: {}", .candidates.join(", "))]
    Ambiguous { candidates: Vec<String> },
}

/// Chooses exactly one variant of a component for a consumer.
pub trait AttributeMatcher: Send + Sync {
    fn select_single_configuration(
        &self,
        consumer: &ImmutableAttributes,
        target: &ComponentResolveMetadata,
        schema: &AttributesSchema,
    ) -> Result<Arc<ConfigurationMetadata>, MatchFailure>;
}

/// Matches on the compatibility and preference rules of an [`AttributesSchema`].
///
/// A variant is a candidate when every attribute it shares with the consumer is
/// compatible. Ties go to the candidate with the most exact matches, then to the
/// schema's preferred values.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaMatcher;

impl AttributeMatcher for SchemaMatcher {
    fn select_single_configuration(
        &self,
        consumer: &ImmutableAttributes,
        target: &ComponentResolveMetadata,
        schema: &AttributesSchema,
    ) -> Result<Arc<ConfigurationMetadata>, MatchFailure> {
        let candidates: Vec<&Arc<ConfigurationMetadata>> = target
            .variants_for_graph_traversal()
            .iter()
            .filter(|variant| is_compatible(consumer, variant.attributes(), schema))
            .collect();

        match candidates.len() {
            0 => Err(MatchFailure::NoMatch),
            1 => Ok(Arc::clone(candidates[0])),
            _ => disambiguate(candidates, consumer, schema),
        }
    }
}

fn is_compatible(
    consumer: &ImmutableAttributes,
    produced: &ImmutableAttributes,
    schema: &AttributesSchema,
) -> bool {
    consumer.iter().all(|(name, requested)| match produced.get(name) {
        Some(value) => schema.is_compatible(name, requested, value),
        None => true,
    })
}

fn exact_matches(consumer: &ImmutableAttributes, produced: &ImmutableAttributes) -> usize {
    consumer
        .iter()
        .filter(|(name, requested)| produced.get(name) == Some(*requested))
        .count()
}

fn disambiguate(
    mut candidates: Vec<&Arc<ConfigurationMetadata>>,
    consumer: &ImmutableAttributes,
    schema: &AttributesSchema,
) -> Result<Arc<ConfigurationMetadata>, MatchFailure> {
    let best = candidates
        .iter()
        .map(|c| exact_matches(consumer, c.attributes()))
        .max()
        .unwrap_or(0);
    candidates.retain(|c| exact_matches(consumer, c.attributes()) == best);

    for attribute in schema.preferred_attributes() {
        if candidates.len() == 1 {
            break;
        }
        let rank = |c: &&Arc<ConfigurationMetadata>| {
            c.attributes()
                .get(attribute)
                .and_then(|value| schema.preference_rank(attribute, value))
        };
        if let Some(top) = candidates.iter().filter_map(rank).min() {
            candidates.retain(|c| rank(c) == Some(top));
        }
    }

    match candidates.len() {
        1 => Ok(Arc::clone(candidates[0])),
        _ => {
            let names: Vec<String> = candidates.iter().map(|c| c.name().to_string()).collect();
            tracing::debug!("attribute matching left {} candidates: {:?}", names.len(), names);
            Err(MatchFailure::Ambiguous { candidates: names })
        }
    }
}
