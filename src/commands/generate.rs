//! The generate command: load, mutate, and emit the manifest.

use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};
use tracing::{debug, info};

use crate::cli::Cli;
use crate::manifest::{Document, FeatureSet, ManifestBuilder};

/// Run the manifest generator.
///
/// Plugin mode passes the template through unmodified; a normal run applies
/// the full edit sequence. The result goes to `dst` when given, stdout
/// otherwise.
///
/// # Errors
///
/// Returns an error if the template is missing or malformed, a mandatory key
/// is absent during mutation, or the output cannot be written.
pub fn run(args: &Cli) -> Result<()> {
    let document = build_document(args)?;
    let yaml = document.to_yaml()?;

    match &args.dst {
        Some(dst) => write_manifest(dst, &yaml)?,
        None => {
            // stdout is the manifest sink; diagnostics stay on stderr.
            #[allow(clippy::print_stdout)]
            {
                print!("{yaml}");
            }
        }
    }
    Ok(())
}

/// Produce the output document for the requested mode.
///
/// # Errors
///
/// Propagates template and mutation failures.
pub fn build_document(args: &Cli) -> Result<Document> {
    if args.plugin {
        debug!("plugin mode: passing template through unmodified");
        return Ok(Document::load(&args.template)?);
    }

    let features = FeatureSet::from_tokens(&args.features);
    let document = ManifestBuilder::build(&args.template, args.archive.as_deref(), &features)?;
    Ok(document)
}

fn write_manifest(dst: &Path, yaml: &str) -> Result<()> {
    fs::write(dst, yaml)
        .with_context(|| format!("failed to write manifest to {}", dst.display()))?;
    info!("wrote manifest to {}", dst.display());
    Ok(())
}
