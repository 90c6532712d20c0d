//! Command-line surface for the manifest generator.
use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI entry point for the snapcraft manifest generator.
#[derive(Parser, Debug)]
#[command(
    name = "create-snapcraft-manifest",
    about = "Generate a snapcraft.yaml manifest for a HandBrake snap build",
    version = version()
)]
pub struct Cli {
    /// Main source archive (the HandBrake sources)
    #[arg(short, long)]
    pub archive: Option<String>,

    /// snapcraft.yaml template path
    #[arg(short, long, default_value = "snapcraft.yaml")]
    pub template: PathBuf,

    /// Build with <FEATURE> support (repeatable)
    #[arg(short, long = "feature", value_name = "FEATURE")]
    pub features: Vec<String>,

    /// Generate the manifest for a HandBrake snap plugin (template pass-through)
    #[arg(short, long)]
    pub plugin: bool,

    /// Enable verbose (debug-level) diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Destination path; the manifest prints to stdout when omitted
    pub dst: Option<PathBuf>,
}

/// Version string embedded by `build.rs`, falling back to the crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("SNAP_MANIFEST_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}
