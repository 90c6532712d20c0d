//! Domain-specific error types for manifest generation.
//!
//! Internal modules return the typed [`ManifestError`]; the command handler at
//! the CLI boundary converts it to [`anyhow::Error`] via the standard `?`
//! operator, so every failure surfaces as a clean diagnostic and exit code 1.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading, mutating, or serializing the manifest document.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The template file does not exist.
    #[error("{} not found", .path.display())]
    TemplateNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// An I/O error occurred while reading the template.
    #[error("failed to read template {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The template is not valid YAML.
    #[error("failed to parse template {path}: {source}")]
    Parse {
        /// Path to the file that could not be parsed.
        path: String,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },

    /// The mutated document could not be serialized back to YAML.
    #[error("failed to serialize manifest: {0}")]
    Serialize(#[source] serde_yaml::Error),

    /// A required part is absent from the `parts` mapping.
    #[error("manifest has no part named '{0}'")]
    MissingPart(String),

    /// A part descriptor is missing a required key.
    #[error("part '{part}' has no '{key}' key")]
    MissingKey {
        /// Part whose descriptor was inspected.
        part: String,
        /// Key that was expected.
        key: String,
    },

    /// A package expected in a `build-packages` list is not present.
    #[error("'{package}' not present in build-packages of part '{part}'")]
    MissingPackage {
        /// Part whose package list was inspected.
        part: String,
        /// Package name that was expected.
        package: String,
    },

    /// No `build-environment` entry defines `BUILD_FLAGS`.
    #[error("no build-environment entry defines BUILD_FLAGS")]
    MissingBuildFlags,

    /// A key held a value of the wrong YAML shape.
    #[error("expected '{key}' to be a {expected}")]
    UnexpectedShape {
        /// Key whose value had the wrong shape.
        key: String,
        /// Shape the generator requires (`"mapping"` or `"sequence"`).
        expected: &'static str,
    },
}
