//! Dependencies declared in an Ivy module descriptor.

use std::collections::BTreeMap;
use std::sync::Arc;

use varsel_core::artifact::{ArtifactName, ExcludeRule};
use varsel_core::component::{ComponentResolveMetadata, ConfigurationMetadata, ModuleComponentId};
use varsel_core::selector::ModuleSelector;
use varsel_util::errors::VarselError;

use crate::descriptor::{expand_hierarchy, find_target_configuration, TargetDescriptor};

/// Matches every configuration, on either side of a mapping.
const WILDCARD: &str = "*";
/// On the target side, the configuration named like the source one.
const SAME_NAME: &str = "@";

/// A `<dependency>` element from an `ivy.xml`, with its `conf` mappings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IvyDependencyDescriptor {
    selector: ModuleSelector,
    conf_mappings: BTreeMap<String, Vec<String>>,
    artifacts: Vec<(ArtifactName, Vec<String>)>,
    excludes: Vec<ExcludeRule>,
    changing: bool,
    transitive: bool,
    optional: bool,
}

impl IvyDependencyDescriptor {
    pub fn new(selector: ModuleSelector) -> Self {
        Self {
            selector,
            conf_mappings: BTreeMap::new(),
            artifacts: Vec::new(),
            excludes: Vec::new(),
            changing: false,
            transitive: true,
            optional: false,
        }
    }

    /// Add a `from->targets` mapping, e.g. `compile->default`.
    pub fn map<S: Into<String>>(
        mut self,
        from: impl Into<String>,
        targets: impl IntoIterator<Item = S>,
    ) -> Self {
        let entry = self.conf_mappings.entry(from.into()).or_default();
        for target in targets {
            let target = target.into();
            if !entry.contains(&target) {
                entry.push(target);
            }
        }
        self
    }

    /// Request an artifact in the given source configurations (all when empty).
    pub fn artifact<S: Into<String>>(
        mut self,
        artifact: ArtifactName,
        configurations: impl IntoIterator<Item = S>,
    ) -> Self {
        self.artifacts
            .push((artifact, configurations.into_iter().map(Into::into).collect()));
        self
    }

    pub fn exclude(mut self, rule: ExcludeRule) -> Self {
        self.excludes.push(rule);
        self
    }

    pub fn changing(mut self, changing: bool) -> Self {
        self.changing = changing;
        self
    }

    pub fn transitive(mut self, transitive: bool) -> Self {
        self.transitive = transitive;
        self
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Target configuration names mapped from one source configuration.
    fn mapped_targets<'a>(&'a self, from_name: &'a str) -> impl Iterator<Item = &'a str> {
        [from_name, WILDCARD]
            .into_iter()
            .filter_map(move |key| self.conf_mappings.get(key))
            .flatten()
            .map(move |target| match target.as_str() {
                SAME_NAME => from_name,
                other => other,
            })
    }
}

impl TargetDescriptor for IvyDependencyDescriptor {
    fn selector(&self) -> &ModuleSelector {
        &self.selector
    }

    fn select_legacy_configurations(
        &self,
        from_component: &ModuleComponentId,
        from_configuration: &ConfigurationMetadata,
        target: &ComponentResolveMetadata,
    ) -> Result<Vec<Arc<ConfigurationMetadata>>, VarselError> {
        let mut selected: Vec<Arc<ConfigurationMetadata>> = Vec::new();
        for from_name in from_configuration.hierarchy() {
            for target_name in self.mapped_targets(from_name) {
                if target_name == WILDCARD {
                    for configuration in target.configurations() {
                        if !selected.iter().any(|c| c.name() == configuration.name()) {
                            selected.push(Arc::clone(configuration));
                        }
                    }
                    continue;
                }
                if selected.iter().any(|c| c.name() == target_name) {
                    continue;
                }
                selected.push(find_target_configuration(
                    from_component,
                    from_configuration,
                    target,
                    target_name,
                )?);
            }
        }
        tracing::debug!(
            "ivy mapping for {} ({}) selected {} configuration(s) of {}",
            from_component,
            from_configuration.name(),
            selected.len(),
            target.id()
        );
        expand_hierarchy(from_component, from_configuration, target, &selected)
    }

    fn configuration_artifacts(
        &self,
        from_configuration: &ConfigurationMetadata,
    ) -> Vec<ArtifactName> {
        let hierarchy = from_configuration.hierarchy();
        let mut artifacts: Vec<ArtifactName> = Vec::new();
        for (artifact, configurations) in &self.artifacts {
            let applies = configurations.is_empty()
                || configurations
                    .iter()
                    .any(|c| c == WILDCARD || hierarchy.contains(c));
            if applies && !artifacts.contains(artifact) {
                artifacts.push(artifact.clone());
            }
        }
        artifacts
    }

    fn configuration_excludes(&self, hierarchy: &[String]) -> Vec<ExcludeRule> {
        self.excludes
            .iter()
            .filter(|rule| rule.applies_to(hierarchy))
            .cloned()
            .collect()
    }

    fn with_requested(&self, selector: ModuleSelector) -> Arc<dyn TargetDescriptor> {
        Arc::new(Self {
            selector,
            ..self.clone()
        })
    }

    fn is_changing(&self) -> bool {
        self.changing
    }

    fn is_transitive(&self) -> bool {
        self.transitive
    }

    fn is_optional(&self) -> bool {
        self.optional
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use varsel_core::component::ComponentOrigin;
    use varsel_core::version::VersionConstraint;

    fn selector() -> ModuleSelector {
        ModuleSelector::new("org.example", "lib", VersionConstraint::require("1.0"))
    }

    fn from_id() -> ModuleComponentId {
        ModuleComponentId::new("com.example", "app", "1.0")
    }

    fn target() -> ComponentResolveMetadata {
        ComponentResolveMetadata::builder(
            ModuleComponentId::new("org.example", "lib", "1.0"),
            ComponentOrigin::External,
        )
        .configuration(ConfigurationMetadata::new("compile"))
        .configuration(ConfigurationMetadata::new("runtime").extends(["compile"]))
        .configuration(ConfigurationMetadata::new("default").extends(["runtime", "compile"]))
        .configuration(ConfigurationMetadata::new("test"))
        .build()
    }

    fn names(configs: &[Arc<ConfigurationMetadata>]) -> Vec<String> {
        configs.iter().map(|c| c.name().to_string()).collect()
    }

    fn select(
        descriptor: &IvyDependencyDescriptor,
        from: &str,
    ) -> Result<Vec<Arc<ConfigurationMetadata>>, VarselError> {
        let from = ConfigurationMetadata::new(from);
        descriptor.select_legacy_configurations(&from_id(), &from, &target())
    }

    #[test]
    fn mapping_is_followed_through_source_hierarchy() {
        let descriptor = IvyDependencyDescriptor::new(selector())
            .map("compile", ["compile"])
            .map("runtime", ["runtime"]);
        let from = ConfigurationMetadata::new("runtime").extends(["compile"]);
        let selected = descriptor
            .select_legacy_configurations(&from_id(), &from, &target())
            .unwrap();
        assert_eq!(names(&selected), ["compile", "runtime"]);
    }

    #[test]
    fn same_name_mapping() {
        let descriptor = IvyDependencyDescriptor::new(selector()).map("*", ["@"]);
        let selected = select(&descriptor, "test").unwrap();
        assert_eq!(names(&selected), ["test"]);
    }

    #[test]
    fn wildcard_target_selects_everything() {
        let descriptor = IvyDependencyDescriptor::new(selector()).map("compile", ["*"]);
        let selected = select(&descriptor, "compile").unwrap();
        assert_eq!(selected.len(), 4);
    }

    #[test]
    fn unmapped_configuration_selects_nothing() {
        let descriptor = IvyDependencyDescriptor::new(selector()).map("compile", ["default"]);
        let selected = select(&descriptor, "docs").unwrap();
        assert!(selected.is_empty());
    }

    #[test]
    fn missing_mapped_configuration_fails() {
        let descriptor = IvyDependencyDescriptor::new(selector()).map("compile", ["sources"]);
        let err = select(&descriptor, "compile").unwrap_err();
        assert!(err.to_string().contains("'sources'"), "got: {err}");
    }

    #[test]
    fn artifacts_follow_source_hierarchy() {
        let descriptor = IvyDependencyDescriptor::new(selector())
            .artifact(ArtifactName::jar("lib"), Vec::<String>::new())
            .artifact(ArtifactName::jar("lib").with_classifier("tests"), ["test"]);

        let compile = ConfigurationMetadata::new("compile");
        assert_eq!(descriptor.configuration_artifacts(&compile), [ArtifactName::jar("lib")]);

        let test = ConfigurationMetadata::new("test").extends(["compile"]);
        assert_eq!(descriptor.configuration_artifacts(&test).len(), 2);
    }

    #[test]
    fn excludes_are_scoped_to_configurations() {
        let descriptor = IvyDependencyDescriptor::new(selector())
            .exclude(ExcludeRule::module("commons-logging", None))
            .exclude(ExcludeRule::module("junit", None).in_configurations(["test"]));

        assert_eq!(descriptor.configuration_excludes(&["compile".to_string()]).len(), 1);
        assert_eq!(
            descriptor
                .configuration_excludes(&["test".to_string(), "compile".to_string()])
                .len(),
            2
        );
    }

    fn layered_target(default_extends: &[&str]) -> ComponentResolveMetadata {
        let default = ConfigurationMetadata::new("default").extends(default_extends.iter().copied());
        ComponentResolveMetadata::builder(
            ModuleComponentId::new("org.example", "lib", "1.0"),
            ComponentOrigin::External,
        )
        .configuration(ConfigurationMetadata::new("compile"))
        .configuration(ConfigurationMetadata::new("runtime").extends(["compile"]))
        .configuration(default)
        .build()
    }

    #[test]
    fn mapped_configuration_brings_every_level_of_its_hierarchy() {
        let descriptor = IvyDependencyDescriptor::new(selector()).map("compile", ["default"]);
        let from = ConfigurationMetadata::new("compile");
        let selected = descriptor
            .select_legacy_configurations(&from_id(), &from, &layered_target(&["runtime"]))
            .unwrap();
        assert_eq!(names(&selected), ["compile", "runtime", "default"]);
    }

    #[test]
    fn hierarchy_order_does_not_depend_on_declaration_order() {
        let descriptor = IvyDependencyDescriptor::new(selector()).map("compile", ["default"]);
        let from = ConfigurationMetadata::new("compile");
        let target = layered_target(&["compile", "runtime"]);
        let selected = descriptor
            .select_legacy_configurations(&from_id(), &from, &target)
            .unwrap();
        assert_eq!(names(&selected), ["compile", "runtime", "default"]);
    }
}
