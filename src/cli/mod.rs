//! Command line interface for pkgstage.

mod args;

pub use args::Args;

use std::path::Path;

use crate::{
    error::{Context, ErrorExt, Result},
    package::{self, PackageFormat},
    settings::PackageSettings,
    stage::{InstallScripts, Staging},
};

/// Main CLI entry point. Returns the process exit code.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args()?;
    execute(args).await?;
    Ok(0)
}

/// Run the staging and packaging pipeline for the parsed arguments.
pub async fn execute(args: Args) -> Result<()> {
    remove_stale_output(&args.out)?;

    let settings = PackageSettings::new(args.identifier, args.version, args.install_location);
    let scripts = InstallScripts {
        preinstall: args.preinstall,
        postinstall: args.postinstall,
    };

    let staging = Staging::prepare(&args.data, &scripts)
        .await
        .context("failed to stage payload")?;

    let format = PackageFormat::for_current_platform();
    package::create_package(format, &settings, &staging, &args.out)
        .await
        .context("failed to build package")
}

/// Remove a leftover artifact from an earlier run. A missing file is fine.
fn remove_stale_output(out: &Path) -> Result<()> {
    match std::fs::remove_file(out) {
        Ok(()) => {
            log::debug!("Removed stale output {}", out.display());
            Ok(())
        }
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(error).fs_context("removing stale output", out),
    }
}
