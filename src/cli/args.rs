//! Command line argument parsing.
//!
//! Mirrors the surface of the packaging step: required output, payload, and
//! package identity arguments plus the two optional install scripts. Any
//! `@file` argument is replaced by the arguments listed in that file before
//! parsing.

use std::{ffi::OsString, path::PathBuf};

use clap::Parser;

use crate::error::{ErrorExt, Result};

/// Build a macOS installer package from a tar payload.
///
/// Note: clap's automatic `--version` flag stays disabled because
/// `--version` is a required data argument of this tool.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pkgstage",
    about = "Build a macOS installer package from a tar payload",
    long_about = "Stage a tar payload plus optional install scripts, then build a \
macOS installer package with pkgbuild. Platforms without pkgbuild produce a \
plain tar archive of the staged layout instead.

Arguments may be supplied via @file response files, one argument per line."
)]
pub struct Args {
    /// Destination path for the finished artifact
    #[arg(long, value_name = "PATH")]
    pub out: PathBuf,

    /// Tar archive holding the payload tree, or `-` for stdin
    #[arg(long, value_name = "PATH")]
    pub data: PathBuf,

    /// Package identifier recorded in the installer
    #[arg(long, value_name = "ID")]
    pub identifier: String,

    /// Filesystem location the payload installs into
    #[arg(long = "install-location", value_name = "PATH")]
    pub install_location: String,

    /// Package version string
    #[arg(long, value_name = "VERSION")]
    pub version: String,

    /// Script to run after installation
    #[arg(long, value_name = "PATH")]
    pub postinstall: Option<PathBuf>,

    /// Script to run before installation
    #[arg(long, value_name = "PATH")]
    pub preinstall: Option<PathBuf>,
}

impl Args {
    /// Parse command line arguments, expanding `@file` response files.
    ///
    /// Missing or malformed arguments terminate the process with a usage
    /// error; an unreadable response file is surfaced as a filesystem error.
    pub fn parse_args() -> Result<Self> {
        let argv = expand_response_files(std::env::args_os().collect())?;
        Ok(Self::parse_from(argv))
    }
}

/// Replace any `@path` argument with the arguments listed in that file, one
/// per line. Response files may themselves contain further `@path` entries;
/// empty lines are skipped.
fn expand_response_files(argv: Vec<OsString>) -> Result<Vec<OsString>> {
    let mut out = Vec::with_capacity(argv.len());

    for arg in argv {
        match arg.to_str() {
            Some(s) if s.len() > 1 && s.starts_with('@') => {
                let path = PathBuf::from(&s[1..]);
                let text = std::fs::read_to_string(&path)
                    .fs_context("reading response file", &path)?;
                let nested = text
                    .lines()
                    .filter(|line| !line.is_empty())
                    .map(OsString::from)
                    .collect();
                out.extend(expand_response_files(nested)?);
            }
            _ => out.push(arg),
        }
    }

    Ok(out)
}
