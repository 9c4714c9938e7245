//! The boundary to format-specific dependency declarations.

use std::fmt;
use std::sync::Arc;

use varsel_core::artifact::{ArtifactName, ExcludeRule};
use varsel_core::component::{ComponentResolveMetadata, ConfigurationMetadata, ModuleComponentId};
use varsel_core::selector::ModuleSelector;
use varsel_util::errors::VarselError;

/// A parsed dependency declaration, independent of the configuration it was
/// declared in.
///
/// Implementations are immutable; `with_requested` returns a new descriptor.
pub trait TargetDescriptor: fmt::Debug + Send + Sync {
    fn selector(&self) -> &ModuleSelector;

    /// Pick target configurations by name, the way the declaring format did
    /// before variants existed.
    fn select_legacy_configurations(
        &self,
        from_component: &ModuleComponentId,
        from_configuration: &ConfigurationMetadata,
        target: &ComponentResolveMetadata,
    ) -> Result<Vec<Arc<ConfigurationMetadata>>, VarselError>;

    /// Artifacts explicitly requested when declared from `from_configuration`.
    fn configuration_artifacts(
        &self,
        from_configuration: &ConfigurationMetadata,
    ) -> Vec<ArtifactName>;

    /// Exclude rules active for a source configuration hierarchy.
    fn configuration_excludes(&self, hierarchy: &[String]) -> Vec<ExcludeRule>;

    fn with_requested(&self, selector: ModuleSelector) -> Arc<dyn TargetDescriptor>;

    fn is_changing(&self) -> bool;

    fn is_transitive(&self) -> bool;

    fn is_optional(&self) -> bool;
}

/// Look up a configuration of `target` that legacy selection depends on.
pub fn find_target_configuration(
    from_component: &ModuleComponentId,
    from_configuration: &ConfigurationMetadata,
    target: &ComponentResolveMetadata,
    name: &str,
) -> Result<Arc<ConfigurationMetadata>, VarselError> {
    target
        .configuration(name)
        .cloned()
        .ok_or_else(|| VarselError::ConfigurationNotFound {
            from_component: from_component.to_string(),
            from_configuration: from_configuration.name().to_string(),
            target: target.id().to_string(),
            configuration: name.to_string(),
        })
}

/// Expand selected configurations through everything they extend.
///
/// Parents are followed through their own declared hierarchies, so a
/// configuration always comes after all of its ancestors. The first
/// occurrence of each name wins.
pub fn expand_hierarchy(
    from_component: &ModuleComponentId,
    from_configuration: &ConfigurationMetadata,
    target: &ComponentResolveMetadata,
    selected: &[Arc<ConfigurationMetadata>],
) -> Result<Vec<Arc<ConfigurationMetadata>>, VarselError> {
    let mut expansion = Expansion {
        from_component,
        from_configuration,
        target,
        in_progress: Vec::new(),
        expanded: Vec::new(),
    };
    for configuration in selected {
        expansion.visit(configuration)?;
    }
    Ok(expansion.expanded)
}

/// Depth-first post-order walk over a target's configuration hierarchy.
struct Expansion<'a> {
    from_component: &'a ModuleComponentId,
    from_configuration: &'a ConfigurationMetadata,
    target: &'a ComponentResolveMetadata,
    in_progress: Vec<String>,
    expanded: Vec<Arc<ConfigurationMetadata>>,
}

impl Expansion<'_> {
    fn visit(&mut self, configuration: &Arc<ConfigurationMetadata>) -> Result<(), VarselError> {
        let name = configuration.name();
        // A name still in progress is part of an extension cycle.
        if self.expanded.iter().any(|c| c.name() == name)
            || self.in_progress.iter().any(|n| n == name)
        {
            return Ok(());
        }
        self.in_progress.push(name.to_string());
        for parent in configuration.hierarchy().iter().skip(1) {
            let parent = find_target_configuration(
                self.from_component,
                self.from_configuration,
                self.target,
                parent,
            )?;
            self.visit(&parent)?;
        }
        self.in_progress.pop();
        self.expanded.push(Arc::clone(configuration));
        Ok(())
    }
}
