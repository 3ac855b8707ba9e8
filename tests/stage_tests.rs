//! Staging behavior: extraction fidelity, script placement, scratch cleanup.

use std::{fs, path::Path, path::PathBuf};

use pkgstage::stage::{InstallScripts, Staging};

/// Build a small payload archive holding `a/b.txt` and `c/d.txt`.
fn payload_tar(dir: &Path) -> PathBuf {
    let path = dir.join("payload.tar");
    let file = fs::File::create(&path).unwrap();
    let mut tar = tar::Builder::new(file);

    for (name, contents) in [("a/b.txt", "alpha"), ("c/d.txt", "delta")] {
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        tar.append_data(&mut header, name, contents.as_bytes())
            .unwrap();
    }

    tar.finish().unwrap();
    path
}

#[tokio::test]
async fn extracts_payload_tree_into_root() {
    let tmp = tempfile::tempdir().unwrap();
    let payload = payload_tar(tmp.path());

    let staging = Staging::prepare(&payload, &InstallScripts::default())
        .await
        .unwrap();

    assert_eq!(
        fs::read_to_string(staging.root().join("a/b.txt")).unwrap(),
        "alpha"
    );
    assert_eq!(
        fs::read_to_string(staging.root().join("c/d.txt")).unwrap(),
        "delta"
    );
}

#[tokio::test]
async fn gzipped_payloads_are_accepted() {
    use std::io::Write;

    let tmp = tempfile::tempdir().unwrap();
    let plain = payload_tar(tmp.path());

    let gz_path = tmp.path().join("payload.tar.gz");
    let gz_file = fs::File::create(&gz_path).unwrap();
    let mut encoder = flate2::write::GzEncoder::new(gz_file, flate2::Compression::default());
    encoder.write_all(&fs::read(&plain).unwrap()).unwrap();
    encoder.finish().unwrap();

    let staging = Staging::prepare(&gz_path, &InstallScripts::default())
        .await
        .unwrap();

    assert_eq!(
        fs::read_to_string(staging.root().join("a/b.txt")).unwrap(),
        "alpha"
    );
}

#[tokio::test]
async fn stages_provided_scripts_verbatim() {
    let tmp = tempfile::tempdir().unwrap();
    let payload = payload_tar(tmp.path());

    let post = tmp.path().join("post.sh");
    fs::write(&post, "echo hi").unwrap();

    let scripts = InstallScripts {
        preinstall: None,
        postinstall: Some(post),
    };
    let staging = Staging::prepare(&payload, &scripts).await.unwrap();

    assert_eq!(
        fs::read_to_string(staging.scripts().join("postinstall")).unwrap(),
        "echo hi"
    );
    assert!(!staging.scripts().join("preinstall").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn staged_scripts_are_executable() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().unwrap();
    let payload = payload_tar(tmp.path());

    let pre = tmp.path().join("pre.sh");
    fs::write(&pre, "#!/bin/sh\nexit 0\n").unwrap();

    let scripts = InstallScripts {
        preinstall: Some(pre),
        postinstall: None,
    };
    let staging = Staging::prepare(&payload, &scripts).await.unwrap();

    let mode = fs::metadata(staging.scripts().join("preinstall"))
        .unwrap()
        .permissions()
        .mode();
    assert_ne!(mode & 0o111, 0);
}

#[tokio::test]
async fn scripts_dir_is_empty_without_scripts() {
    let tmp = tempfile::tempdir().unwrap();
    let payload = payload_tar(tmp.path());

    let staging = Staging::prepare(&payload, &InstallScripts::default())
        .await
        .unwrap();

    let entries: Vec<_> = fs::read_dir(staging.scripts()).unwrap().collect();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn scratch_directory_removed_on_drop() {
    let tmp = tempfile::tempdir().unwrap();
    let payload = payload_tar(tmp.path());

    let staging = Staging::prepare(&payload, &InstallScripts::default())
        .await
        .unwrap();
    let scratch = staging.base().to_path_buf();
    assert!(scratch.exists());

    drop(staging);
    assert!(!scratch.exists());
}

#[tokio::test]
async fn missing_payload_is_an_error() {
    let missing = Path::new("definitely-not-a-payload.tar");
    let result = Staging::prepare(missing, &InstallScripts::default()).await;
    assert!(result.is_err());
}
