//! Binary entry point for the `create-snapcraft-manifest` CLI.

use anyhow::Result;
use clap::Parser;

use snap_manifest_cli::{cli, commands, logging};

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    logging::init(args.verbose);
    commands::generate::run(&args)
}
