//! Fallback tarball creation from a staged layout.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use pkgstage::{
    package::tarball,
    stage::{InstallScripts, Staging},
};

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
async fn tarball_holds_exactly_root_and_scripts() {
    let tmp = tempfile::tempdir().unwrap();
    let payload = payload_tar(tmp.path());

    let post = tmp.path().join("post.sh");
    fs::write(&post, "echo hi").unwrap();
    let scripts = InstallScripts {
        preinstall: None,
        postinstall: Some(post),
    };

    let staging = Staging::prepare(&payload, &scripts).await.unwrap();
    let out = tmp.path().join("out.pkg");
    tarball::build_tarball(&staging, &out).await.unwrap();

    let mut archive = tar::Archive::new(fs::File::open(&out).unwrap());
    let top_level: BTreeSet<String> = archive
        .entries()
        .unwrap()
        .map(|entry| {
            let entry = entry.unwrap();
            let path = entry.path().unwrap().into_owned();
            path.components()
                .next()
                .unwrap()
                .as_os_str()
                .to_string_lossy()
                .into_owned()
        })
        .collect();

    let expected: BTreeSet<String> = ["root", "scripts"].iter().map(|s| s.to_string()).collect();
    assert_eq!(top_level, expected);
}

#[tokio::test]
async fn tarball_preserves_staged_contents() {
    let tmp = tempfile::tempdir().unwrap();
    let payload = payload_tar(tmp.path());

    let post = tmp.path().join("post.sh");
    fs::write(&post, "echo hi").unwrap();
    let scripts = InstallScripts {
        preinstall: None,
        postinstall: Some(post),
    };

    let staging = Staging::prepare(&payload, &scripts).await.unwrap();
    let out = tmp.path().join("out.pkg");
    tarball::build_tarball(&staging, &out).await.unwrap();

    let unpacked = tmp.path().join("unpacked");
    let mut archive = tar::Archive::new(fs::File::open(&out).unwrap());
    archive.unpack(&unpacked).unwrap();

    assert_eq!(
        fs::read_to_string(unpacked.join("root/a/b.txt")).unwrap(),
        "alpha"
    );
    assert_eq!(
        fs::read_to_string(unpacked.join("root/c/d.txt")).unwrap(),
        "delta"
    );
    assert_eq!(
        fs::read_to_string(unpacked.join("scripts/postinstall")).unwrap(),
        "echo hi"
    );
}
