use serde::{Deserialize, Serialize};
use std::path::Path;

use varsel_util::errors::{VarselError, VarselResult};

use crate::attributes::ImmutableAttributes;
use crate::schema::AttributesSchema;

/// Resolution settings loaded from a `varsel.toml` file.
///
/// ```toml
/// [attributes]
/// "org.gradle.usage" = "java-runtime"
///
/// [schema."org.gradle.usage"]
/// compatible = [["java-runtime", "java-api"]]
/// prefer = ["java-runtime"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveConfig {
    /// Attributes every consumer requests unless it overrides them.
    #[serde(default)]
    pub attributes: ImmutableAttributes,

    #[serde(default)]
    pub schema: AttributesSchema,
}

impl ResolveConfig {
    /// Load and parse a resolution config from the given path.
    pub fn from_path(path: &Path) -> VarselResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| VarselError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Ok(Self::parse_toml(&content)?)
    }

    pub fn parse_toml(content: &str) -> Result<Self, VarselError> {
        toml::from_str(content).map_err(|e| VarselError::Config {
            message: format!("Failed to parse resolution config: {e}"),
        })
    }

    /// Load the config at `path`, or return defaults if it is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.is_file() {
            return Self::default();
        }
        match Self::from_path(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load resolution config, using defaults: {e}");
                Self::default()
            }
        }
    }

    /// The attributes a consumer effectively requests.
    pub fn consumer_attributes(&self, overrides: &ImmutableAttributes) -> ImmutableAttributes {
        self.attributes.merged(overrides)
    }
}
