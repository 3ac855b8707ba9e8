//! Package metadata shared between the staging and packaging steps.

/// Identity metadata recorded in the finished installer package.
///
/// The identifier and version are passed through to the packaging tool
/// verbatim; neither is validated beyond being present.
#[derive(Debug, Clone)]
pub struct PackageSettings {
    identifier: String,
    version: String,
    install_location: String,
}

impl PackageSettings {
    /// Create settings from the resolved CLI arguments.
    pub fn new(identifier: String, version: String, install_location: String) -> Self {
        Self {
            identifier,
            version,
            install_location,
        }
    }

    /// Package identifier, e.g. `com.example.app`.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Package version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Filesystem location the payload installs into.
    pub fn install_location(&self) -> &str {
        &self.install_location
    }
}
