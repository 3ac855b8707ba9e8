//! Package creation from a staged layout.
//!
//! The output format is selected once from the platform identity: macOS
//! builds a real installer package with the system `pkgbuild` tool, every
//! other platform falls back to a plain tar archive of the staged
//! directories. There is no retry and no cross-format fallback on failure.

pub mod macos;
pub mod tarball;

use std::{fmt, path::Path};

use crate::{error::Result, settings::PackageSettings, stage::Staging};

/// Output formats the packaging step can produce.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PackageFormat {
    /// Native installer package built with `pkgbuild`.
    InstallerPkg,
    /// Plain tar archive of the staged `root` and `scripts` trees.
    ///
    /// Not a real installer package; non-macOS builds still produce an
    /// artifact from the same pipeline.
    Tarball,
}

impl PackageFormat {
    /// Format used on the current platform.
    pub fn for_current_platform() -> Self {
        if cfg!(target_os = "macos") {
            Self::InstallerPkg
        } else {
            Self::Tarball
        }
    }

    /// Short name used in log output.
    pub fn short_name(self) -> &'static str {
        match self {
            Self::InstallerPkg => "pkg",
            Self::Tarball => "tar",
        }
    }
}

impl fmt::Display for PackageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Build the final artifact at `out` from the staged layout.
pub async fn create_package(
    format: PackageFormat,
    settings: &PackageSettings,
    staging: &Staging,
    out: &Path,
) -> Result<()> {
    log::info!("Building {} artifact at {}", format, out.display());

    match format {
        PackageFormat::InstallerPkg => macos::build_pkg(settings, staging, out).await,
        PackageFormat::Tarball => tarball::build_tarball(staging, out).await,
    }
}
