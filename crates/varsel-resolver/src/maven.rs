//! Dependencies declared in a Maven POM.

use std::sync::Arc;

use varsel_core::artifact::{ArtifactName, ExcludeRule};
use varsel_core::component::{ComponentResolveMetadata, ConfigurationMetadata, ModuleComponentId};
use varsel_core::selector::ModuleSelector;
use varsel_util::errors::VarselError;

use crate::descriptor::{expand_hierarchy, find_target_configuration, TargetDescriptor};

/// A `<dependency>` entry from a POM.
///
/// Maven exclusions are not scoped to configurations, and a POM dependency is
/// never changing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenDependencyDescriptor {
    selector: ModuleSelector,
    optional: bool,
    artifact: Option<ArtifactName>,
    exclusions: Vec<ExcludeRule>,
}

impl MavenDependencyDescriptor {
    pub fn new(selector: ModuleSelector) -> Self {
        Self {
            selector,
            optional: false,
            artifact: None,
            exclusions: Vec::new(),
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Request a specific artifact, e.g. one with a `<classifier>`.
    pub fn artifact(mut self, artifact: ArtifactName) -> Self {
        self.artifact = Some(artifact);
        self
    }

    pub fn exclude(mut self, rule: ExcludeRule) -> Self {
        self.exclusions.push(rule);
        self
    }
}

impl TargetDescriptor for MavenDependencyDescriptor {
    fn selector(&self) -> &ModuleSelector {
        &self.selector
    }

    /// From `compile`, take the target's `compile`. From anything else take
    /// `runtime`, plus `compile` when `runtime` does not already extend it.
    /// A non-empty `master` is always added.
    fn select_legacy_configurations(
        &self,
        from_component: &ModuleComponentId,
        from_configuration: &ConfigurationMetadata,
        target: &ComponentResolveMetadata,
    ) -> Result<Vec<Arc<ConfigurationMetadata>>, VarselError> {
        let mut selected = Vec::new();
        let mut requires_compile = from_configuration.name() == "compile";
        if !requires_compile {
            let runtime =
                find_target_configuration(from_component, from_configuration, target, "runtime")?;
            let runtime_hierarchy = expand_hierarchy(
                from_component,
                from_configuration,
                target,
                std::slice::from_ref(&runtime),
            )?;
            requires_compile = !runtime_hierarchy.iter().any(|c| c.name() == "compile");
            selected.push(runtime);
        }
        if requires_compile {
            selected.push(find_target_configuration(
                from_component,
                from_configuration,
                target,
                "compile",
            )?);
        }
        if let Some(master) = target.configuration("master") {
            if master.has_dependencies() || !master.artifacts().is_empty() {
                selected.push(Arc::clone(master));
            }
        }
        expand_hierarchy(from_component, from_configuration, target, &selected)
    }

    fn configuration_artifacts(
        &self,
        _from_configuration: &ConfigurationMetadata,
    ) -> Vec<ArtifactName> {
        self.artifact.iter().cloned().collect()
    }

    fn configuration_excludes(&self, _hierarchy: &[String]) -> Vec<ExcludeRule> {
        self.exclusions.clone()
    }

    fn with_requested(&self, selector: ModuleSelector) -> Arc<dyn TargetDescriptor> {
        Arc::new(Self {
            selector,
            ..self.clone()
        })
    }

    fn is_changing(&self) -> bool {
        false
    }

    fn is_transitive(&self) -> bool {
        true
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

    fn descriptor() -> MavenDependencyDescriptor {
        MavenDependencyDescriptor::new(ModuleSelector::new(
            "org.example",
            "lib",
            VersionConstraint::require("1.0"),
        ))
    }

    fn from_id() -> ModuleComponentId {
        ModuleComponentId::new("com.example", "app", "1.0")
    }

    fn target(
        runtime_extends_compile: bool,
        master: Option<ConfigurationMetadata>,
    ) -> ComponentResolveMetadata {
        let runtime = if runtime_extends_compile {
            ConfigurationMetadata::new("runtime").extends(["compile"])
        } else {
            ConfigurationMetadata::new("runtime")
        };
        let mut builder = ComponentResolveMetadata::builder(
            ModuleComponentId::new("org.example", "lib", "1.0"),
            ComponentOrigin::External,
        )
        .configuration(ConfigurationMetadata::new("compile"))
        .configuration(runtime);
        if let Some(master) = master {
            builder = builder.configuration(master);
        }
        builder.build()
    }

    fn names(configs: &[Arc<ConfigurationMetadata>]) -> Vec<String> {
        configs.iter().map(|c| c.name().to_string()).collect()
    }

    fn select(
        from: &str,
        target: &ComponentResolveMetadata,
    ) -> Result<Vec<Arc<ConfigurationMetadata>>, VarselError> {
        let from = ConfigurationMetadata::new(from);
        descriptor().select_legacy_configurations(&from_id(), &from, target)
    }

    #[test]
    fn compile_selects_compile_only() {
        let selected = select("compile", &target(true, None)).unwrap();
        assert_eq!(names(&selected), ["compile"]);
    }

    #[test]
    fn runtime_extending_compile_brings_compile_through_hierarchy() {
        let selected = select("runtime", &target(true, None)).unwrap();
        assert_eq!(names(&selected), ["compile", "runtime"]);
    }

    #[test]
    fn detached_runtime_adds_compile_explicitly() {
        let selected = select("test", &target(false, None)).unwrap();
        assert_eq!(names(&selected), ["runtime", "compile"]);
    }

    #[test]
    fn master_only_when_not_empty() {
        let empty_master = target(true, Some(ConfigurationMetadata::new("master")));
        let selected = select("compile", &empty_master).unwrap();
        assert_eq!(names(&selected), ["compile"]);

        let master = target(
            true,
            Some(ConfigurationMetadata::new("master").with_artifact(ArtifactName::jar("lib"))),
        );
        let selected = select("compile", &master).unwrap();
        assert_eq!(names(&selected), ["compile", "master"]);
    }

    #[test]
    fn missing_runtime_is_configuration_not_found() {
        let target = ComponentResolveMetadata::builder(
            ModuleComponentId::new("org.example", "lib", "1.0"),
            ComponentOrigin::External,
        )
        .configuration(ConfigurationMetadata::new("compile"))
        .build();
        let err = select("runtime", &target).unwrap_err();
        match err {
            VarselError::ConfigurationNotFound { configuration, .. } => {
                assert_eq!(configuration, "runtime")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn with_requested_keeps_everything_but_selector() {
        let original = descriptor()
            .optional(true)
            .artifact(ArtifactName::jar("lib").with_classifier("tests"))
            .exclude(ExcludeRule::module("org.slf4j", None));
        let selector = ModuleSelector::new("org.example", "lib", VersionConstraint::require("2.0"));
        let derived = original.with_requested(selector.clone());

        assert_eq!(derived.selector(), &selector);
        assert!(derived.is_optional());
        let from = ConfigurationMetadata::new("compile");
        assert_eq!(
            derived.configuration_artifacts(&from),
            original.configuration_artifacts(&from)
        );
        assert_eq!(derived.configuration_excludes(&[]), original.configuration_excludes(&[]));
    }

    #[test]
    fn runtime_extending_compile_indirectly_does_not_repeat_compile() {
        let target = ComponentResolveMetadata::builder(
            ModuleComponentId::new("org.example", "lib", "1.0"),
            ComponentOrigin::External,
        )
        .configuration(ConfigurationMetadata::new("compile"))
        .configuration(ConfigurationMetadata::new("provided").extends(["compile"]))
        .configuration(ConfigurationMetadata::new("runtime").extends(["provided"]))
        .build();
        let selected = select("test", &target).unwrap();
        assert_eq!(names(&selected), ["compile", "provided", "runtime"]);
    }
}
