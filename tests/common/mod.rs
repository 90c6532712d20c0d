// Shared helpers for integration tests.
//
// Provides a snapcraft.yaml template fixture modelled on HandBrake's real
// template, plus small builders so each test can set up an isolated
// temp-directory environment without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use snap_manifest_cli::cli::Cli;

/// Cut-down snapcraft.yaml template with every key path the generator edits.
pub const TEMPLATE: &str = "\
name: handbrake
base: core22
summary: Video transcoder
grade: stable
parts:
  rust-toolchain:
    plugin: rust
    source: .
  handbrake:
    plugin: nil
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

/// Write the fixture template into `dir` and return its path.
pub fn write_template(dir: &Path) -> PathBuf {
    let path = dir.join("snapcraft.yaml");
    std::fs::write(&path, TEMPLATE).expect("write template fixture");
    path
}

/// A `Cli` with the given template and everything else defaulted.
pub fn cli_for(template: &Path) -> Cli {
    Cli {
        archive: None,
        template: template.to_path_buf(),
        features: Vec::new(),
        plugin: false,
        verbose: false,
        dst: None,
    }
}
