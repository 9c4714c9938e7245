//! Dependency edges bound to the configuration that declared them.
//!
//! Edges are immutable and shared through `Arc`. Every `with_*` derivation
//! returns the very same `Arc` when the requested change is a value no-op, so
//! the graph walker can use pointer equality to recognise edges it has already
//! seen.

use std::fmt;
use std::sync::Arc;

use varsel_core::artifact::{ArtifactName, ExcludeRule};
use varsel_core::attributes::ImmutableAttributes;
use varsel_core::component::{ComponentResolveMetadata, ConfigurationMetadata, ModuleComponentId};
use varsel_core::schema::AttributesSchema;
use varsel_core::selector::{ComponentSelector, ModuleSelector, ProjectSelector};
use varsel_core::version::VersionConstraint;
use varsel_util::errors::VarselError;

use crate::descriptor::TargetDescriptor;
use crate::matcher::{AttributeMatcher, MatchFailure};
use crate::strategy::VariantSelectionStrategy;

/// A declared dependency on an external module, bound to the source
/// configuration it was declared in.
///
/// Maven and Ivy pick target configurations differently depending on the
/// source configuration, so the descriptor alone is not enough to resolve it.
#[derive(Debug)]
pub struct DependencyEdge {
    configuration: Arc<ConfigurationMetadata>,
    component_id: ModuleComponentId,
    descriptor: Arc<dyn TargetDescriptor>,
    reason: Option<String>,
}

impl DependencyEdge {
    pub fn new(
        configuration: Arc<ConfigurationMetadata>,
        component_id: ModuleComponentId,
        descriptor: Arc<dyn TargetDescriptor>,
    ) -> Arc<Self> {
        Arc::new(Self {
            configuration,
            component_id,
            descriptor,
            reason: None,
        })
    }

    /// Choose the target configurations that satisfy this edge.
    ///
    /// Never returns an empty list: legacy selection that picks nothing is
    /// reported as [`VarselError::NoConfigurationSelected`].
    pub fn select_configurations(
        &self,
        consumer_attributes: &ImmutableAttributes,
        target: &ComponentResolveMetadata,
        schema: &AttributesSchema,
        matcher: &dyn AttributeMatcher,
    ) -> Result<Vec<Arc<ConfigurationMetadata>>, VarselError> {
        let strategy = VariantSelectionStrategy::for_target(consumer_attributes, target);
        tracing::debug!("{} selects from {} using {:?}", self, target.id(), strategy);

        match strategy {
            VariantSelectionStrategy::AttributeMatching => {
                let selected = matcher
                    .select_single_configuration(consumer_attributes, target, schema)
                    .map_err(|failure| self.match_error(failure, consumer_attributes, target))?;
                Ok(vec![selected])
            }
            VariantSelectionStrategy::Legacy => {
                let selected = self.descriptor.select_legacy_configurations(
                    &self.component_id,
                    &self.configuration,
                    target,
                )?;
                if selected.is_empty() {
                    return Err(VarselError::NoConfigurationSelected {
                        requested_by: self.requested_by(),
                        target: target.id().to_string(),
                    });
                }
                Ok(selected)
            }
        }
    }

    fn match_error(
        &self,
        failure: MatchFailure,
        consumer_attributes: &ImmutableAttributes,
        target: &ComponentResolveMetadata,
    ) -> VarselError {
        match failure {
            MatchFailure::NoMatch => VarselError::NoMatchingVariant {
                requested_by: self.requested_by(),
                target: target.id().to_string(),
                attributes: consumer_attributes.to_string(),
            },
            MatchFailure::Ambiguous { candidates } => VarselError::AmbiguousVariant {
                requested_by: self.requested_by(),
                target: target.id().to_string(),
                candidates,
            },
        }
    }

    fn requested_by(&self) -> String {
        format!("{} ({})", self.component_id, self.configuration.name())
    }

    pub fn artifacts(&self) -> Vec<ArtifactName> {
        self.descriptor.configuration_artifacts(&self.configuration)
    }

    pub fn excludes(&self) -> Vec<ExcludeRule> {
        self.descriptor
            .configuration_excludes(self.configuration.hierarchy())
    }

    /// Retarget this edge.
    ///
    /// A module selector equal to the current one returns this edge; a project
    /// selector yields a project edge backed by this one. Library binaries
    /// cannot be the target of a module dependency.
    pub fn with_target(
        self: &Arc<Self>,
        target: &ComponentSelector,
    ) -> Result<DependencyMetadata, VarselError> {
        match target {
            ComponentSelector::Module(selector) => {
                if selector == self.selector() {
                    return Ok(DependencyMetadata::Module(Arc::clone(self)));
                }
                Ok(DependencyMetadata::Module(self.with_requested(selector.clone())))
            }
            ComponentSelector::Project(selector) => {
                tracing::debug!("{} substituted by {}", self, selector);
                Ok(DependencyMetadata::Project(Arc::new(ProjectDependencyEdge::new(
                    selector.clone(),
                    Arc::clone(self),
                ))))
            }
            ComponentSelector::Library(selector) => Err(VarselError::InvalidSelector {
                message: format!("unexpected selector provided for {}: {}", self, selector),
            }),
        }
    }

    pub fn with_requested_version(self: &Arc<Self>, version: &VersionConstraint) -> Arc<Self> {
        let selector = self.selector();
        if *version == selector.version {
            return Arc::clone(self);
        }
        self.with_requested(selector.with_version(version.clone()))
    }

    pub fn with_reason(self: &Arc<Self>, reason: Option<&str>) -> Arc<Self> {
        if reason == self.reason() {
            return Arc::clone(self);
        }
        Arc::new(Self {
            configuration: Arc::clone(&self.configuration),
            component_id: self.component_id.clone(),
            descriptor: Arc::clone(&self.descriptor),
            reason: reason.map(str::to_string),
        })
    }

    fn with_requested(&self, selector: ModuleSelector) -> Arc<Self> {
        tracing::debug!("{} retargeted to {}", self, selector);
        Arc::new(Self {
            configuration: Arc::clone(&self.configuration),
            component_id: self.component_id.clone(),
            descriptor: self.descriptor.with_requested(selector),
            reason: self.reason.clone(),
        })
    }

    pub fn selector(&self) -> &ModuleSelector {
        self.descriptor.selector()
    }

    pub fn configuration(&self) -> &Arc<ConfigurationMetadata> {
        &self.configuration
    }

    pub fn component_id(&self) -> &ModuleComponentId {
        &self.component_id
    }

    pub fn is_changing(&self) -> bool {
        self.descriptor.is_changing()
    }

    pub fn is_transitive(&self) -> bool {
        self.descriptor.is_transitive()
    }

    /// Optional dependencies stay pending until something else requires them.
    pub fn is_pending(&self) -> bool {
        self.descriptor.is_optional()
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

impl fmt::Display for DependencyEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) -> {}",
            self.component_id,
            self.configuration.name(),
            self.selector()
        )
    }
}

/// A module edge substituted by a project of the current build.
///
/// Everything but the selector comes from the edge it replaced.
#[derive(Debug)]
pub struct ProjectDependencyEdge {
    selector: ProjectSelector,
    source: Arc<DependencyEdge>,
}

impl ProjectDependencyEdge {
    pub fn new(selector: ProjectSelector, source: Arc<DependencyEdge>) -> Self {
        Self { selector, source }
    }

    pub fn selector(&self) -> &ProjectSelector {
        &self.selector
    }

    /// The module edge this project edge was derived from.
    pub fn source(&self) -> &Arc<DependencyEdge> {
        &self.source
    }

    pub fn artifacts(&self) -> Vec<ArtifactName> {
        self.source.artifacts()
    }

    pub fn excludes(&self) -> Vec<ExcludeRule> {
        self.source.excludes()
    }

    pub fn is_changing(&self) -> bool {
        self.source.is_changing()
    }

    pub fn is_transitive(&self) -> bool {
        self.source.is_transitive()
    }

    pub fn is_pending(&self) -> bool {
        self.source.is_pending()
    }

    pub fn reason(&self) -> Option<&str> {
        self.source.reason()
    }
}

/// Either flavour of edge produced by retargeting.
#[derive(Debug, Clone)]
pub enum DependencyMetadata {
    Module(Arc<DependencyEdge>),
    Project(Arc<ProjectDependencyEdge>),
}

impl DependencyMetadata {
    pub fn selector(&self) -> ComponentSelector {
        match self {
            Self::Module(edge) => ComponentSelector::Module(edge.selector().clone()),
            Self::Project(edge) => ComponentSelector::Project(edge.selector().clone()),
        }
    }

    pub fn as_module(&self) -> Option<&Arc<DependencyEdge>> {
        match self {
            Self::Module(edge) => Some(edge),
            Self::Project(_) => None,
        }
    }

    pub fn as_project(&self) -> Option<&Arc<ProjectDependencyEdge>> {
        match self {
            Self::Module(_) => None,
            Self::Project(edge) => Some(edge),
        }
    }

    pub fn artifacts(&self) -> Vec<ArtifactName> {
        match self {
            Self::Module(edge) => edge.artifacts(),
            Self::Project(edge) => edge.artifacts(),
        }
    }

    pub fn excludes(&self) -> Vec<ExcludeRule> {
        match self {
            Self::Module(edge) => edge.excludes(),
            Self::Project(edge) => edge.excludes(),
        }
    }

    pub fn is_changing(&self) -> bool {
        match self {
            Self::Module(edge) => edge.is_changing(),
            Self::Project(edge) => edge.is_changing(),
        }
    }

    pub fn is_transitive(&self) -> bool {
        match self {
            Self::Module(edge) => edge.is_transitive(),
            Self::Project(edge) => edge.is_transitive(),
        }
    }

    pub fn is_pending(&self) -> bool {
        match self {
            Self::Module(edge) => edge.is_pending(),
            Self::Project(edge) => edge.is_pending(),
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Module(edge) => edge.reason(),
            Self::Project(edge) => edge.reason(),
        }
    }
}
