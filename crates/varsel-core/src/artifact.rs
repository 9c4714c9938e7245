//! Artifact names and exclude rules carried by dependency edges.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single file published for a component, identified Ivy-style.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactName {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub classifier: Option<String>,
}

impl ArtifactName {
    /// A `jar` artifact named after its module.
    pub fn jar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_: "jar".to_string(),
            extension: Some("jar".to_string()),
            classifier: None,
        }
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    /// File name as published, e.g. `lib-sources.jar`.
    pub fn file_name(&self) -> String {
        let ext = self.extension.as_deref().unwrap_or(&self.type_);
        match self.classifier {
            Some(ref c) => format!("{}-{c}.{ext}", self.name),
            None => format!("{}.{ext}", self.name),
        }
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

/// A transitive dependency (or artifact) to leave out of the graph.
///
/// `None` fields match anything. An empty `configurations` list applies the
/// rule to every source configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExcludeRule {
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub artifact: Option<String>,
    #[serde(default)]
    pub configurations: Vec<String>,
}

impl ExcludeRule {
    /// Exclude `group`, or `group:module` when `module` is given.
    pub fn module(group: impl Into<String>, module: Option<&str>) -> Self {
        Self {
            group: Some(group.into()),
            module: module.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn in_configurations<S: Into<String>>(
        mut self,
        configurations: impl IntoIterator<Item = S>,
    ) -> Self {
        self.configurations = configurations.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this rule is active for a source configuration hierarchy.
    pub fn applies_to(&self, hierarchy: &[String]) -> bool {
        self.configurations.is_empty() || self.configurations.iter().any(|c| hierarchy.contains(c))
    }

    pub fn excludes_module(&self, group: &str, module: &str) -> bool {
        self.group.as_deref().map_or(true, |g| g == group)
            && self.module.as_deref().map_or(true, |m| m == module)
    }
}
