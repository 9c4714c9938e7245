//! Component identifiers and the read-only metadata of resolved components.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::artifact::ArtifactName;
use crate::attributes::ImmutableAttributes;

/// A published module at a concrete version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleComponentId {
    pub group: String,
    pub module: String,
    pub version: String,
}

impl ModuleComponentId {
    pub fn new(
        group: impl Into<String>,
        module: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            module: module.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ModuleComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.module, self.version)
    }
}

/// A project of the current build.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectComponentId {
    pub build_path: String,
    pub project_path: String,
}

impl fmt::Display for ProjectComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.build_path == ":" {
            write!(f, "project {}", self.project_path)
        } else {
            write!(f, "project {}{}", self.build_path, self.project_path)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentId {
    Module(ModuleComponentId),
    Project(ProjectComponentId),
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module(id) => id.fmt(f),
            Self::Project(id) => id.fmt(f),
        }
    }
}

impl From<ModuleComponentId> for ComponentId {
    fn from(id: ModuleComponentId) -> Self {
        Self::Module(id)
    }
}

impl From<ProjectComponentId> for ComponentId {
    fn from(id: ProjectComponentId) -> Self {
        Self::Project(id)
    }
}

/// Where a component's metadata came from.
///
/// Published components have no implicit `default` configuration to fall back
/// on, which changes how their variants are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentOrigin {
    /// Fetched from a repository.
    External,
    /// Produced by a project of the current build.
    Project,
}

/// A named configuration (or variant) of a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationMetadata {
    name: String,
    hierarchy: Vec<String>,
    attributes: ImmutableAttributes,
    artifacts: Vec<ArtifactName>,
    has_dependencies: bool,
}

impl ConfigurationMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            hierarchy: vec![name.clone()],
            name,
            attributes: ImmutableAttributes::empty(),
            artifacts: Vec::new(),
            has_dependencies: false,
        }
    }

    /// Declare the configurations this one directly extends. Their own parents
    /// are followed when the hierarchy is expanded against a component.
    pub fn extends<S: Into<String>>(mut self, parents: impl IntoIterator<Item = S>) -> Self {
        for parent in parents {
            let parent = parent.into();
            if !self.hierarchy.contains(&parent) {
                self.hierarchy.push(parent);
            }
        }
        self
    }

    pub fn with_attributes(mut self, attributes: ImmutableAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_artifact(mut self, artifact: ArtifactName) -> Self {
        self.artifacts.push(artifact);
        self
    }

    pub fn with_dependencies(mut self, has_dependencies: bool) -> Self {
        self.has_dependencies = has_dependencies;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// This configuration's name followed by the configurations it was declared
    /// to extend.
    pub fn hierarchy(&self) -> &[String] {
        &self.hierarchy
    }

    pub fn attributes(&self) -> &ImmutableAttributes {
        &self.attributes
    }

    pub fn artifacts(&self) -> &[ArtifactName] {
        &self.artifacts
    }

    pub fn has_dependencies(&self) -> bool {
        self.has_dependencies
    }
}

/// The resolved metadata of a target component.
#[derive(Debug, Clone)]
pub struct ComponentResolveMetadata {
    id: ComponentId,
    origin: ComponentOrigin,
    configurations: BTreeMap<String, Arc<ConfigurationMetadata>>,
    variants: Vec<Arc<ConfigurationMetadata>>,
}

impl ComponentResolveMetadata {
    pub fn builder(
        id: impl Into<ComponentId>,
        origin: ComponentOrigin,
    ) -> ComponentMetadataBuilder {
        ComponentMetadataBuilder {
            metadata: Self {
                id: id.into(),
                origin,
                configurations: BTreeMap::new(),
                variants: Vec::new(),
            },
        }
    }

    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    pub fn origin(&self) -> ComponentOrigin {
        self.origin
    }

    pub fn is_external(&self) -> bool {
        self.origin == ComponentOrigin::External
    }

    pub fn configuration(&self, name: &str) -> Option<&Arc<ConfigurationMetadata>> {
        self.configurations.get(name)
    }

    pub fn configurations(&self) -> impl Iterator<Item = &Arc<ConfigurationMetadata>> {
        self.configurations.values()
    }

    /// Variants that take part in attribute matching; may be empty.
    pub fn variants_for_graph_traversal(&self) -> &[Arc<ConfigurationMetadata>] {
        &self.variants
    }
}

pub struct ComponentMetadataBuilder {
    metadata: ComponentResolveMetadata,
}

impl ComponentMetadataBuilder {
    /// Add a legacy configuration, reachable only by name.
    pub fn configuration(mut self, configuration: ConfigurationMetadata) -> Self {
        self.metadata
            .configurations
            .insert(configuration.name.clone(), Arc::new(configuration));
        self
    }

    /// Add a variant; variants are also addressable as configurations.
    pub fn variant(mut self, variant: ConfigurationMetadata) -> Self {
        let variant = Arc::new(variant);
        self.metadata
            .configurations
            .insert(variant.name.clone(), Arc::clone(&variant));
        self.metadata.variants.push(variant);
        self
    }

    pub fn build(self) -> ComponentResolveMetadata {
        self.metadata
    }
}
