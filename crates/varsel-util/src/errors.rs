use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all varsel operations.
#[derive(Debug, Error, Diagnostic)]
pub enum VarselError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A selector that cannot be used where it was supplied.
    #[error("Invalid selector: {message}")]
    #[diagnostic(help("Module edges can only be retargeted to module or project selectors"))]
    InvalidSelector { message: String },

    /// Attribute matching found no compatible variant.
    #[error("No matching variant of {target} was found for {requested_by} with attributes {attributes}")]
    #[diagnostic(help("Check that the consumer attributes are compatible with a published variant"))]
    NoMatchingVariant {
        requested_by: String,
        target: String,
        attributes: String,
    },

    /// Attribute matching found several equally good variants.
    #[error("Ambiguous variants of {target} for {requested_by}: {}", .candidates.join(", "))]
    #[diagnostic(help("Add a consumer attribute or a schema preference to break the tie"))]
    AmbiguousVariant {
        requested_by: String,
        target: String,
        candidates: Vec<String>,
    },

    /// Legacy selection referenced a configuration the target does not declare.
    #[error("{from_component} ({from_configuration}) requires configuration '{configuration}' which does not exist in {target}")]
    ConfigurationNotFound {
        from_component: String,
        from_configuration: String,
        target: String,
        configuration: String,
    },

    /// Legacy selection completed without choosing any configuration.
    #[error("No configuration of {target} was selected for {requested_by}")]
    NoConfigurationSelected { requested_by: String, target: String },

    /// Invalid or unreadable resolution configuration.
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check the resolution config file for syntax errors"))]
    Config { message: String },
}

impl VarselError {
    /// Whether the error is a resolution failure attributable to a dependency
    /// declaration, as opposed to a contract violation or an environment problem.
    pub fn is_selection_failure(&self) -> bool {
        matches!(
            self,
            Self::NoMatchingVariant { .. }
                | Self::AmbiguousVariant { .. }
                | Self::ConfigurationNotFound { .. }
                | Self::NoConfigurationSelected { .. }
        )
    }
}

/// Convenience alias for `miette::Result<T>`.
pub type VarselResult<T> = miette::Result<T>;
