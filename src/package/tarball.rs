//! Plain tar fallback for platforms without `pkgbuild`.

use std::{
    fs::File,
    io,
    path::Path,
};

use tar::HeaderMode;
use walkdir::WalkDir;

use crate::{
    error::{Context, Error, ErrorExt, Result},
    stage::Staging,
};

/// Archive the staged `root` and `scripts` trees into a plain tar at `out`.
///
/// The two directories become the archive's only top-level entries, named by
/// their base names relative to the scratch directory.
pub async fn build_tarball(staging: &Staging, out: &Path) -> Result<()> {
    let root = staging.root().to_path_buf();
    let scripts = staging.scripts().to_path_buf();
    let out = out.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        let file = File::create(&out).fs_context("creating output archive", &out)?;
        let mut tar = tar::Builder::new(file);

        append_tree(&mut tar, &root)?;
        append_tree(&mut tar, &scripts)?;

        let file = tar.into_inner()?;
        file.sync_all()?;
        Ok(())
    })
    .await
    .map_err(|e| Error::Generic(format!("archive task failed: {e}")))?
}

/// Append `dir` and its contents under the directory's own base name.
fn append_tree(tar: &mut tar::Builder<File>, dir: &Path) -> Result<()> {
    let base = dir
        .file_name()
        .with_context(|| format!("staged directory {} has no base name", dir.display()))?;
    let base = Path::new(base);

    for entry in WalkDir::new(dir) {
        let entry = entry?;
        let path = entry.path();
        let rel = base.join(path.strip_prefix(dir)?);

        let metadata = entry.metadata()?;
        let mut header = tar::Header::new_gnu();
        header.set_metadata_in_mode(&metadata, HeaderMode::Complete);

        if entry.file_type().is_dir() {
            tar.append_data(&mut header, &rel, &mut io::empty())?;
        } else {
            let mut file = File::open(path).fs_context("opening staged file", path)?;
            tar.append_data(&mut header, &rel, &mut file)?;
        }
    }

    Ok(())
}
