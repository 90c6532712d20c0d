//! Structural edits applied to the manifest template.
//!
//! The builder owns a loaded [`Document`] and exposes one setter per edit the
//! generator performs, so every mutation is an explicit, typed operation
//! instead of an ad hoc key deletion. [`ManifestBuilder::build`] runs the full
//! edit sequence for a normal (non-plugin) run.

use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use crate::error::ManifestError;
use crate::manifest::document::Document;
use crate::manifest::features::{Feature, FeatureSet};

/// The part every edit targets.
const MAIN_PART: &str = "handbrake";

/// The part stripped when Dolby Vision support is not requested.
const RUST_TOOLCHAIN_PART: &str = "rust-toolchain";

/// Applies feature-driven edits to a loaded manifest template.
#[derive(Debug)]
pub struct ManifestBuilder {
    document: Document,
}

impl ManifestBuilder {
    /// Load the template at `path`.
    ///
    /// # Errors
    ///
    /// Propagates [`Document::load`] failures.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        Ok(Self {
            document: Document::load(path)?,
        })
    }

    /// Run the full edit sequence: rewrite `BUILD_FLAGS`, strip the rust
    /// toolchain unless `libdovi` is enabled, and point `source` at the
    /// archive when one is given.
    ///
    /// # Errors
    ///
    /// Returns the first failure from loading or any edit.
    pub fn build(
        template: &Path,
        archive: Option<&str>,
        features: &FeatureSet,
    ) -> Result<Document, ManifestError> {
        let mut builder = Self::load(template)?;
        builder.set_build_flags(features)?;
        if !features.contains(Feature::Libdovi) {
            builder.strip_rust_toolchain()?;
        }
        if let Some(archive) = archive {
            builder.set_source_archive(archive)?;
        }
        Ok(builder.into_document())
    }

    /// Overwrite the value of every `build-environment` entry that defines
    /// `BUILD_FLAGS` with the rendered flag list.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::MissingKey`] if the part has no
    /// `build-environment`, [`ManifestError::UnexpectedShape`] if it is not a
    /// sequence, and [`ManifestError::MissingBuildFlags`] if no entry defines
    /// `BUILD_FLAGS`.
    pub fn set_build_flags(&mut self, features: &FeatureSet) -> Result<(), ManifestError> {
        let flags = features.build_flags();
        debug!("BUILD_FLAGS: {flags}");

        let part = self.document.part_mut(MAIN_PART)?;
        let build_env = part
            .get_mut("build-environment")
            .ok_or_else(|| ManifestError::MissingKey {
                part: MAIN_PART.to_string(),
                key: "build-environment".to_string(),
            })?
            .as_sequence_mut()
            .ok_or_else(|| ManifestError::UnexpectedShape {
                key: "build-environment".to_string(),
                expected: "sequence",
            })?;

        let mut rewritten = 0;
        for entry in build_env.iter_mut() {
            if let Some(entry) = entry.as_mapping_mut()
                && entry.contains_key("BUILD_FLAGS")
            {
                entry.insert(
                    Value::from("BUILD_FLAGS"),
                    Value::from(flags.clone()),
                );
                rewritten += 1;
            }
        }

        if rewritten == 0 {
            return Err(ManifestError::MissingBuildFlags);
        }
        Ok(())
    }

    /// Remove everything that only exists to provide a Rust toolchain: the
    /// `rust-toolchain` part, the `after` ordering key, and the `rustup`
    /// build package.
    ///
    /// # Errors
    ///
    /// Each of the three removals is mandatory; the first absent key yields a
    /// [`ManifestError::MissingPart`], [`ManifestError::MissingKey`], or
    /// [`ManifestError::MissingPackage`].
    pub fn strip_rust_toolchain(&mut self) -> Result<(), ManifestError> {
        self.document.remove_part(RUST_TOOLCHAIN_PART)?;

        let part = self.document.part_mut(MAIN_PART)?;
        part.shift_remove("after")
            .ok_or_else(|| ManifestError::MissingKey {
                part: MAIN_PART.to_string(),
                key: "after".to_string(),
            })?;

        let packages = part
            .get_mut("build-packages")
            .ok_or_else(|| ManifestError::MissingKey {
                part: MAIN_PART.to_string(),
                key: "build-packages".to_string(),
            })?
            .as_sequence_mut()
            .ok_or_else(|| ManifestError::UnexpectedShape {
                key: "build-packages".to_string(),
                expected: "sequence",
            })?;

        let position = packages
            .iter()
            .position(|package| package.as_str() == Some("rustup"))
            .ok_or_else(|| ManifestError::MissingPackage {
                part: MAIN_PART.to_string(),
                package: "rustup".to_string(),
            })?;
        packages.remove(position);
        Ok(())
    }

    /// Point the main part at a local source archive.
    ///
    /// Rewrites `source-type`/`source` in place when the template already has
    /// them, appends them otherwise.
    ///
    /// # Errors
    ///
    /// Fails if the main part is absent or not a mapping.
    pub fn set_source_archive(&mut self, archive: &str) -> Result<(), ManifestError> {
        let part = self.document.part_mut(MAIN_PART)?;
        part.insert(Value::from("source-type"), Value::from("tar"));
        part.insert(Value::from("source"), Value::from(archive));
        Ok(())
    }

    /// Consume the builder and return the mutated document.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Cut-down version of HandBrake's real snapcraft.yaml template.
    const TEMPLATE: &str = "\
name: handbrake
parts:
  rust-toolchain:
    plugin: rust
  handbrake:
    after:
      - rust-toolchain
    build-environment:
      - PATH: /usr/bin:$PATH
      - BUILD_FLAGS: ''
    build-packages:
      - cmake
      - rustup
      - nasm
    source-type: git
    source: https://github.com/HandBrake/HandBrake.git
";

    fn builder(template: &str) -> ManifestBuilder {
        ManifestBuilder {
            document: template.parse().expect("parse template"),
        }
    }

    fn build_flags_of(document: &Document) -> String {
        let env = document
            .mapping()
            .get("parts")
            .and_then(|parts| parts.get("handbrake"))
            .and_then(|part| part.get("build-environment"))
            .and_then(Value::as_sequence)
            .expect("build-environment");
        env.iter()
            .find_map(|entry| entry.get("BUILD_FLAGS"))
            .and_then(Value::as_str)
            .expect("BUILD_FLAGS")
            .to_string()
    }

    #[test]
    fn build_flags_rewritten_for_empty_feature_set() {
        let mut b = builder(TEMPLATE);
        b.set_build_flags(&FeatureSet::default()).expect("flags");
        assert_eq!(
            build_flags_of(&b.into_document()),
            "--snap --prefix=/usr --build=build-snap"
        );
    }

    #[test]
    fn build_flags_follow_fixed_feature_order() {
        let mut b = builder(TEMPLATE);
        let features = FeatureSet::from_tokens(["qsv", "nvenc"]);
        b.set_build_flags(&features).expect("flags");
        assert_eq!(
            build_flags_of(&b.into_document()),
            "--snap --prefix=/usr --build=build-snap --enable-nvenc --enable-nvdec --enable-qsv"
        );
    }

    #[test]
    fn missing_build_flags_entry_is_an_error() {
        let template = "\
parts:
  handbrake:
    build-environment:
      - PATH: /usr/bin
";
        let mut b = builder(template);
        let err = b
            .set_build_flags(&FeatureSet::default())
            .expect_err("should fail");
        assert!(matches!(err, ManifestError::MissingBuildFlags));
    }

    #[test]
    fn missing_build_environment_is_an_error() {
        let template = "\
parts:
  handbrake:
    source: .
";
        let mut b = builder(template);
        let err = b
            .set_build_flags(&FeatureSet::default())
            .expect_err("should fail");
        assert!(matches!(err, ManifestError::MissingKey { key, .. } if key == "build-environment"));
    }

    #[test]
    fn strip_rust_toolchain_removes_all_three() {
        let mut b = builder(TEMPLATE);
        b.strip_rust_toolchain().expect("strip");
        let document = b.into_document();

        let parts = document
            .mapping()
            .get("parts")
            .and_then(Value::as_mapping)
            .expect("parts");
        assert!(!parts.contains_key("rust-toolchain"));

        let handbrake = parts
            .get("handbrake")
            .and_then(Value::as_mapping)
            .expect("handbrake");
        assert!(!handbrake.contains_key("after"));

        let packages: Vec<&str> = handbrake
            .get("build-packages")
            .and_then(Value::as_sequence)
            .expect("build-packages")
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(packages, vec!["cmake", "nasm"]);
    }

    #[test]
    fn strip_without_rust_toolchain_part_is_fatal() {
        let template = "\
parts:
  handbrake:
    after:
      - rust-toolchain
    build-packages:
      - rustup
";
        let mut b = builder(template);
        let err = b.strip_rust_toolchain().expect_err("should fail");
        assert!(matches!(err, ManifestError::MissingPart(name) if name == "rust-toolchain"));
    }

    #[test]
    fn strip_without_after_key_is_fatal() {
        let template = "\
parts:
  rust-toolchain:
    plugin: rust
  handbrake:
    build-packages:
      - rustup
";
        let mut b = builder(template);
        let err = b.strip_rust_toolchain().expect_err("should fail");
        assert!(matches!(err, ManifestError::MissingKey { key, .. } if key == "after"));
    }

    #[test]
    fn strip_without_rustup_package_is_fatal() {
        let template = "\
parts:
  rust-toolchain:
    plugin: rust
  handbrake:
    after:
      - rust-toolchain
    build-packages:
      - cmake
";
        let mut b = builder(template);
        let err = b.strip_rust_toolchain().expect_err("should fail");
        assert!(matches!(err, ManifestError::MissingPackage { package, .. } if package == "rustup"));
    }

    #[test]
    fn archive_rewrites_source_fields_in_place() {
        let mut b = builder(TEMPLATE);
        b.set_source_archive("HandBrake-1.9.0.tar.gz")
            .expect("set archive");
        let document = b.into_document();
        let handbrake = document
            .mapping()
            .get("parts")
            .and_then(|parts| parts.get("handbrake"))
            .and_then(Value::as_mapping)
            .expect("handbrake");
        assert_eq!(
            handbrake.get("source-type").and_then(Value::as_str),
            Some("tar")
        );
        assert_eq!(
            handbrake.get("source").and_then(Value::as_str),
            Some("HandBrake-1.9.0.tar.gz")
        );
    }

    #[test]
    fn build_runs_the_full_sequence() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("snapcraft.yaml");
        std::fs::write(&path, TEMPLATE).expect("write template");

        let features = FeatureSet::from_tokens(["nvenc", "fdk-aac"]);
        let document = ManifestBuilder::build(&path, Some("hb.tar.gz"), &features)
            .expect("build");

        assert_eq!(
            build_flags_of(&document),
            "--snap --prefix=/usr --build=build-snap --enable-nvenc --enable-nvdec --enable-fdk-aac"
        );
        let parts = document
            .mapping()
            .get("parts")
            .and_then(Value::as_mapping)
            .expect("parts");
        assert!(!parts.contains_key("rust-toolchain"));
    }

    #[test]
    fn libdovi_keeps_rust_toolchain() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("snapcraft.yaml");
        std::fs::write(&path, TEMPLATE).expect("write template");

        let features = FeatureSet::from_tokens(["libdovi"]);
        let document = ManifestBuilder::build(&path, None, &features).expect("build");

        let parts = document
            .mapping()
            .get("parts")
            .and_then(Value::as_mapping)
            .expect("parts");
        assert!(parts.contains_key("rust-toolchain"));
        let handbrake = parts
            .get("handbrake")
            .and_then(Value::as_mapping)
            .expect("handbrake");
        assert!(handbrake.contains_key("after"));
        let packages: Vec<&str> = handbrake
            .get("build-packages")
            .and_then(Value::as_sequence)
            .expect("build-packages")
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(packages.contains(&"rustup"));
    }
}
