//! Native installer package creation via the system `pkgbuild` tool.

use std::path::Path;

use crate::{
    error::{Error, Result},
    settings::PackageSettings,
    stage::Staging,
};

/// Build a macOS installer package from the staged layout.
///
/// # Process
/// 1. Locate `pkgbuild` on `PATH`
/// 2. Run it with the staged `root` as the package root and the staged
///    `scripts` directory as the script source
/// 3. Surface captured stderr if the tool exits non-zero
///
/// The output path is whatever the caller resolved; `pkgbuild` writes the
/// finished package there itself.
pub async fn build_pkg(settings: &PackageSettings, staging: &Staging, out: &Path) -> Result<()> {
    let pkgbuild = which::which("pkgbuild").map_err(|error| Error::ToolNotFound {
        tool: "pkgbuild",
        error,
    })?;

    log::debug!(
        "Running {} for {} {}",
        pkgbuild.display(),
        settings.identifier(),
        settings.version()
    );

    let output = tokio::process::Command::new(&pkgbuild)
        .arg("--root")
        .arg(staging.root())
        .arg("--install-location")
        .arg(settings.install_location())
        .arg("--identifier")
        .arg(settings.identifier())
        .arg("--version")
        .arg(settings.version())
        .arg("--scripts")
        .arg(staging.scripts())
        .arg("--ownership")
        .arg("recommended")
        .arg(out)
        .output()
        .await
        .map_err(|error| Error::CommandFailed {
            command: "pkgbuild".into(),
            error,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(Error::CommandStatus {
            command: "pkgbuild".into(),
            status: output.status,
            stderr,
        });
    }

    log::info!("pkgbuild wrote {}", out.display());
    Ok(())
}
