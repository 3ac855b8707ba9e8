//! # pkgstage
//!
//! Build-pipeline helper that turns a tar payload plus optional install
//! scripts into a platform installer package.
//!
//! The pipeline is strictly sequential: parse arguments, stage the payload
//! into the scratch layout the packaging tool expects (`root` and `scripts`
//! directories), then invoke the native macOS `pkgbuild` tool. On platforms
//! without `pkgbuild` the staged layout is archived into a plain tar file
//! instead.
//!
//! ## Usage
//!
//! ```bash
//! pkgstage --out app.pkg --data payload.tar \
//!     --identifier com.example.app \
//!     --install-location /usr/local \
//!     --version 1.2.3 \
//!     --postinstall scripts/postinstall
//! ```
//!
//! Arguments may also be supplied via `@file` response files, one argument
//! per line, and `--data -` reads the payload archive from standard input.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod cli;
pub mod error;
pub mod package;
pub mod settings;
pub mod stage;

// Re-export main types for public API
pub use cli::Args;
pub use error::{Error, Result};
pub use package::PackageFormat;
pub use settings::PackageSettings;
pub use stage::{InstallScripts, Staging};
