//! Snapcraft manifest generator for HandBrake snap builds.
//!
//! One-shot build-time tool: load a `snapcraft.yaml` template, rewrite the
//! `handbrake` part according to the requested hardware/codec features, and
//! serialize the result with key order preserved.
//!
//! The public API is organised into three layers:
//!
//! - **[`manifest`]** — the ordered YAML document, feature tokens, and the
//!   builder that applies the structural edits
//! - **[`commands`]** — top-level orchestration wired to the CLI surface
//! - **[`error`]** — typed failures for missing template keys and I/O

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod manifest;
