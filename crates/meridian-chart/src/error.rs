//! Error types for component registration and option handling.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while registering component types at bootstrap.
///
/// These are fatal: a catalog that failed to register a type cannot create
/// instances of it.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The axis kind name was empty or whitespace.
    #[error("axis kind name must not be empty")]
    EmptyKind,

    /// The kind was already registered from a different option shape.
    #[error("axis kind '{kind}' is registered with shape {existing}, cannot re-register it as {requested}")]
    ShapeConflict {
        /// The kind name.
        kind: String,
        /// Shape recorded by the earlier registration.
        existing: &'static str,
        /// Shape of the rejected registration.
        requested: &'static str,
    },

    /// A component type name could not be parsed.
    #[error("invalid component type name '{0}'")]
    InvalidTypeName(String),

    /// Default options could not be composed.
    #[error("invalid default options for '{type_name}': {source}")]
    Defaults {
        /// Full type name being registered.
        type_name: String,
        /// The underlying merge failure.
        #[source]
        source: MergeError,
    },
}

/// Errors raised when two option mappings cannot be merged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// A value that must be a mapping was something else.
    #[error("option '{path}' must be a mapping, found {found}")]
    NotAMapping {
        /// Dotted field path of the offending value.
        path: String,
        /// Kind of value that was found.
        found: &'static str,
    },

    /// The override does not fit the shape of the default.
    #[error("option '{path}' expects {expected}, found {found}")]
    ShapeMismatch {
        /// Dotted field path of the offending value.
        path: String,
        /// Kind of value the default holds.
        expected: &'static str,
        /// Kind of value the override holds.
        found: &'static str,
    },
}

/// Errors raised while turning user options into component instances.
#[derive(Debug, Error)]
pub enum OptionError {
    /// No registered type matches the requested main-type / sub-type.
    #[error("unknown component type '{0}'")]
    UnknownComponent(String),

    /// User options clashed with the defaults.
    #[error(transparent)]
    Merge(#[from] MergeError),

    /// Effective options failed typed validation.
    #[error("invalid options for '{type_name}': {source}")]
    Invalid {
        /// Full type name of the component.
        type_name: String,
        /// The validation failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while loading a [`ChartConfig`](crate::ChartConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config '{}': {source}", path.display())]
    Io {
        /// Path that failed to load.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The config text is not valid.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type alias for option handling.
pub type OptionResult<T> = Result<T, OptionError>;
