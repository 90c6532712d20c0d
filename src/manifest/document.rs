//! Ordered YAML document wrapper.
//!
//! The manifest is held as a [`serde_yaml::Mapping`], which preserves key
//! insertion order on both parse and emit, so a load → mutate → dump cycle
//! never reorders untouched keys.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde_yaml::{Mapping, Value};

use crate::error::ManifestError;

/// A snapcraft manifest document with ordered-mapping semantics.
#[derive(Debug, Clone, PartialEq)]
pub struct Document(Mapping);

impl Document {
    /// Load a template document from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::TemplateNotFound`] if the file does not exist,
    /// [`ManifestError::Io`] for any other read failure, and
    /// [`ManifestError::Parse`] if the contents are not a YAML mapping.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let contents = fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ManifestError::TemplateNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ManifestError::Io {
                    path: path.display().to_string(),
                    source,
                }
            }
        })?;

        let mapping = serde_yaml::from_str(&contents).map_err(|source| ManifestError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self(mapping))
    }

    /// Serialize the document, preserving key insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Serialize`] if YAML emission fails.
    pub fn to_yaml(&self) -> Result<String, ManifestError> {
        serde_yaml::to_string(&self.0).map_err(ManifestError::Serialize)
    }

    /// Borrow the underlying mapping.
    #[must_use]
    pub const fn mapping(&self) -> &Mapping {
        &self.0
    }

    /// Mutable access to the descriptor of the part named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::UnexpectedShape`] if `parts` is absent or not
    /// a mapping, [`ManifestError::MissingPart`] if the part does not exist,
    /// and [`ManifestError::UnexpectedShape`] if the descriptor itself is not
    /// a mapping.
    pub fn part_mut(&mut self, name: &str) -> Result<&mut Mapping, ManifestError> {
        self.parts_mut()?
            .get_mut(name)
            .ok_or_else(|| ManifestError::MissingPart(name.to_string()))?
            .as_mapping_mut()
            .ok_or_else(|| ManifestError::UnexpectedShape {
                key: name.to_string(),
                expected: "mapping",
            })
    }

    /// Remove the part named `name` from `parts`, keeping the order of the
    /// remaining parts intact.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::MissingPart`] if the part does not exist.
    pub fn remove_part(&mut self, name: &str) -> Result<(), ManifestError> {
        self.parts_mut()?
            .shift_remove(name)
            .map(|_| ())
            .ok_or_else(|| ManifestError::MissingPart(name.to_string()))
    }

    fn parts_mut(&mut self) -> Result<&mut Mapping, ManifestError> {
        self.0
            .get_mut("parts")
            .and_then(Value::as_mapping_mut)
            .ok_or_else(|| ManifestError::UnexpectedShape {
                key: "parts".to_string(),
                expected: "mapping",
            })
    }
}

impl FromStr for Document {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mapping = serde_yaml::from_str(s).map_err(|source| ManifestError::Parse {
            path: "<inline>".to_string(),
            source,
        })?;
        Ok(Self(mapping))
    }
}
