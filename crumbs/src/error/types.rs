//! Primary error enum for parameter declaration and resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type CrumbsResult<T> = Result<T, CrumbsError>;

/// Errors that can occur while declaring, parsing or resolving parameters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CrumbsError {
    /// Lookup of a name that was never registered.
    #[error("unknown parameter '{name}'")]
    UnknownParameter {
        /// Name as supplied by the caller, without the implicit group.
        name: String,
    },

    /// A parameter with the same qualified name is already registered.
    #[error("parameter '{name}' is already registered")]
    DuplicateParameter {
        /// Qualified name of the conflicting parameter.
        name: String,
    },

    /// A raw value could not be converted to the declared type.
    #[error("cannot convert {value:?} for parameter '{name}': {message}")]
    Coercion {
        /// Qualified name of the parameter being resolved.
        name: String,
        /// Raw value that failed conversion.
        value: String,
        /// Explanation produced by the coercion function.
        message: String,
    },

    /// A parameter declaration is malformed or conflicts with another one.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Name (or first option) of the offending declaration.
        name: String,
        /// Human-readable explanation of the problem.
        message: String,
    },

    /// Error parsing command-line arguments.
    #[error("Failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),

    /// Error originating from a configuration file.
    #[error("Configuration file error in '{path}': {source}")]
    File {
        /// Path that triggered the configuration failure.
        path: PathBuf,
        /// Underlying error reported by the file loader.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The resolved value could not be deserialised into the requested type.
    #[error("cannot extract parameter '{name}': {source}")]
    Extraction {
        /// Qualified name of the parameter being extracted.
        name: String,
        /// Underlying deserialisation failure.
        #[source]
        source: serde_json::Error,
    },
}
