//! Choice between attribute matching and legacy configuration selection.

use varsel_core::attributes::ImmutableAttributes;
use varsel_core::component::{ComponentOrigin, ComponentResolveMetadata};

/// How the configurations of a target component are selected for an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantSelectionStrategy {
    /// Pick exactly one variant by attribute matching.
    AttributeMatching,
    /// Let the dependency descriptor pick configurations by name.
    Legacy,
}

impl VariantSelectionStrategy {
    /// Attribute matching applies when the target has variants and either the
    /// consumer requests attributes or the target is published.
    ///
    /// Published components get attribute matching even for an attribute-free
    /// consumer, since they have no implicit `default` configuration. Project
    /// components keep legacy selection until the consumer declares attributes.
    pub fn choose(
        target_has_variants: bool,
        consumer_has_attributes: bool,
        origin: ComponentOrigin,
    ) -> Self {
        let target_is_external = origin == ComponentOrigin::External;
        if target_has_variants && (consumer_has_attributes || target_is_external) {
            Self::AttributeMatching
        } else {
            Self::Legacy
        }
    }

    pub fn for_target(consumer: &ImmutableAttributes, target: &ComponentResolveMetadata) -> Self {
        Self::choose(
            !target.variants_for_graph_traversal().is_empty(),
            !consumer.is_empty(),
            target.origin(),
        )
    }
}
