//! Payload staging.
//!
//! Builds the scratch layout the packaging step consumes: a `root` directory
//! populated from the payload archive and a `scripts` directory holding any
//! install-time scripts. The whole layout lives in a uniquely named scratch
//! directory inside the current working directory and is removed when the
//! [`Staging`] value is dropped, on success and failure alike.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Read},
    path::{Path, PathBuf},
};

use flate2::read::GzDecoder;
use tempfile::TempDir;

use crate::error::{Error, ErrorExt, Result};

/// Magic bytes identifying a gzip-compressed payload.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Install-time scripts copied into the staged `scripts` directory.
///
/// Both scripts are optional; an absent script simply leaves no file behind.
#[derive(Debug, Clone, Default)]
pub struct InstallScripts {
    /// Script run before the payload is installed.
    pub preinstall: Option<PathBuf>,
    /// Script run after the payload is installed.
    pub postinstall: Option<PathBuf>,
}

/// Scratch directory layout consumed by the packaging step.
///
/// Dropping the value removes the scratch directory and everything staged
/// under it.
pub struct Staging {
    dir: TempDir,
    root: PathBuf,
    scripts: PathBuf,
}

impl Staging {
    /// Create the scratch layout and populate it from the payload archive.
    ///
    /// `data` names a tar archive, optionally gzip-compressed; `-` reads the
    /// archive from standard input. The archive's internal paths and
    /// permission bits are preserved as given.
    pub async fn prepare(data: &Path, scripts: &InstallScripts) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let dir = tempfile::Builder::new()
            .prefix("_pkgstage_root_")
            .tempdir_in(&cwd)
            .fs_context("creating scratch directory in", &cwd)?;

        let root = dir.path().join("root");
        std::fs::create_dir(&root).fs_context("creating payload root", &root)?;

        let scripts_dir = dir.path().join("scripts");
        std::fs::create_dir(&scripts_dir).fs_context("creating scripts directory", &scripts_dir)?;

        extract_payload(data, &root).await?;
        write_scripts(scripts, &scripts_dir)?;

        Ok(Self {
            dir,
            root,
            scripts: scripts_dir,
        })
    }

    /// Staged payload tree that becomes the installed file layout.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Staged directory holding the install-time scripts.
    pub fn scripts(&self) -> &Path {
        &self.scripts
    }

    /// Common parent of the `root` and `scripts` directories.
    pub fn base(&self) -> &Path {
        self.dir.path()
    }
}

/// Extract the payload archive into the staged `root` directory.
async fn extract_payload(data: &Path, root: &Path) -> Result<()> {
    log::info!("Extracting payload into {}", root.display());

    let data = data.to_path_buf();
    let root = root.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        let reader: Box<dyn Read> = if data.as_os_str() == "-" {
            Box::new(io::stdin())
        } else {
            Box::new(File::open(&data).fs_context("opening payload archive", &data)?)
        };
        let mut reader = BufReader::new(reader);

        // Gzip-compressed payloads are accepted transparently.
        let gzipped = reader.fill_buf()?.starts_with(&GZIP_MAGIC);
        let reader: Box<dyn Read> = if gzipped {
            Box::new(GzDecoder::new(reader))
        } else {
            Box::new(reader)
        };

        let mut archive = tar::Archive::new(reader);
        archive.set_preserve_permissions(true);
        archive
            .unpack(&root)
            .fs_context("extracting payload archive into", &root)?;
        Ok(())
    })
    .await
    .map_err(|e| Error::Generic(format!("payload extraction task failed: {e}")))?
}

/// Copy any provided install scripts into the staged `scripts` directory
/// under the names the packaging tool expects.
fn write_scripts(scripts: &InstallScripts, dir: &Path) -> Result<()> {
    let entries = [
        (&scripts.preinstall, "preinstall"),
        (&scripts.postinstall, "postinstall"),
    ];

    for (source, name) in entries {
        let Some(source) = source else {
            continue;
        };

        let dest = dir.join(name);
        let text = std::fs::read_to_string(source).fs_context("reading install script", source)?;
        std::fs::write(&dest, &text).fs_context("writing install script", &dest)?;

        // Installer scripts must be executable to run.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&dest, std::fs::Permissions::from_mode(0o755))
                .fs_context("setting install script permissions", &dest)?;
        }

        log::debug!("Staged {} script from {}", name, source.display());
    }

    Ok(())
}
