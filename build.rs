//! Build script that embeds a version string via `SNAP_MANIFEST_VERSION`.

use std::process::Command;

fn main() {
    // Prefer SNAP_MANIFEST_VERSION if set (e.g., by the snap build pipeline),
    // otherwise fall back to git describe for local development builds.
    if let Ok(version) = std::env::var("SNAP_MANIFEST_VERSION") {
        println!("cargo:rustc-env=SNAP_MANIFEST_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=SNAP_MANIFEST_VERSION={version}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=SNAP_MANIFEST_VERSION");
}
