//! Selectors identifying the target of a dependency edge.

use std::fmt;

use serde::{Deserialize, Serialize};
use varsel_util::errors::VarselError;

use crate::component::ModuleComponentId;
use crate::version::VersionConstraint;

/// An external module requested by `group:module` and a version constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleSelector {
    pub group: String,
    pub module: String,
    #[serde(default)]
    pub version: VersionConstraint,
}

impl ModuleSelector {
    pub fn new(
        group: impl Into<String>,
        module: impl Into<String>,
        version: VersionConstraint,
    ) -> Self {
        Self {
            group: group.into(),
            module: module.into(),
            version,
        }
    }

    /// The same module with a different version constraint.
    pub fn with_version(&self, version: VersionConstraint) -> Self {
        Self::new(self.group.clone(), self.module.clone(), version)
    }

    /// `group:module` identifier (without version).
    pub fn key(&self) -> String {
        format!("{}:{}", self.group, self.module)
    }

    /// Whether `id` is the same module at a version this selector accepts.
    pub fn matches(&self, id: &ModuleComponentId) -> bool {
        self.group == id.group && self.module == id.module && self.version.accepts(&id.version)
    }
}

impl fmt::Display for ModuleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.module)?;
        if !self.version.is_empty() {
            write!(f, ":{}", self.version)?;
        }
        Ok(())
    }
}

/// A project in the current build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectSelector {
    /// `:` for the root build, or the path of an included build.
    pub build_path: String,
    pub project_path: String,
}

impl ProjectSelector {
    pub fn new(build_path: impl Into<String>, project_path: impl Into<String>) -> Self {
        Self {
            build_path: build_path.into(),
            project_path: project_path.into(),
        }
    }

    /// A project of the root build.
    pub fn root_build(project_path: impl Into<String>) -> Self {
        Self::new(":", project_path)
    }
}

impl fmt::Display for ProjectSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.build_path == ":" {
            write!(f, "project {}", self.project_path)
        } else {
            write!(f, "project {}{}", self.build_path, self.project_path)
        }
    }
}

/// A native library binary produced by a project of the current build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LibrarySelector {
    pub project_path: String,
    pub library_name: String,
    #[serde(default)]
    pub variant: Option<String>,
}

impl fmt::Display for LibrarySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "library {}:{}", self.project_path, self.library_name)?;
        if let Some(ref variant) = self.variant {
            write!(f, " ({variant})")?;
        }
        Ok(())
    }
}

/// Every kind of component a dependency can point at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentSelector {
    Module(ModuleSelector),
    Project(ProjectSelector),
    Library(LibrarySelector),
}

impl ComponentSelector {
    /// Parse `group:module[:version]` or `project <path>`.
    pub fn parse(notation: &str) -> Result<Self, VarselError> {
        let s = notation.trim();
        if let Some(path) = s.strip_prefix("project ") {
            let path = path.trim();
            if !path.starts_with(':') {
                return Err(VarselError::InvalidSelector {
                    message: format!("project path must start with ':' in '{notation}'"),
                });
            }
            return Ok(Self::Project(ProjectSelector::root_build(path)));
        }

        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [group, module] if !group.is_empty() && !module.is_empty() => Ok(Self::Module(
                ModuleSelector::new(*group, *module, VersionConstraint::default()),
            )),
            [group, module, version]
                if !group.is_empty() && !module.is_empty() && !version.is_empty() =>
            {
                Ok(Self::Module(ModuleSelector::new(
                    *group,
                    *module,
                    VersionConstraint::require(*version),
                )))
            }
            _ => Err(VarselError::InvalidSelector {
                message: format!("cannot parse '{notation}' as a component selector"),
            }),
        }
    }
}

impl From<ModuleSelector> for ComponentSelector {
    fn from(selector: ModuleSelector) -> Self {
        Self::Module(selector)
    }
}

impl From<ProjectSelector> for ComponentSelector {
    fn from(selector: ProjectSelector) -> Self {
        Self::Project(selector)
    }
}

impl From<LibrarySelector> for ComponentSelector {
    fn from(selector: LibrarySelector) -> Self {
        Self::Library(selector)
    }
}

impl fmt::Display for ComponentSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module(s) => s.fmt(f),
            Self::Project(s) => s.fmt(f),
            Self::Library(s) => s.fmt(f),
        }
    }
}
