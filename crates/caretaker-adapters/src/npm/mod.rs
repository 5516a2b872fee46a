//! npm project adapter

mod manifest;

use std::path::Path;

use tracing::{info, instrument, warn};

pub use manifest::{PackageJson, Result};

/// Outcome of a manifest version update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionUpdate {
    /// Previous version, if the manifest had one
    pub old: Option<String>,
    /// Version written to the manifest (no `v` prefix)
    pub new: String,
}

/// Strip any leading `v` characters from a version string
pub fn normalize_version(version: &str) -> &str {
    version.trim_start_matches('v')
}

/// Rewrite the `version` field of the manifest at `path`
#[instrument(fields(path = %path.display()))]
pub fn update_version(path: &Path, version: &str) -> Result<VersionUpdate> {
    let new = normalize_version(version).to_string();
    if semver::Version::parse(&new).is_err() {
        warn!(version = %new, "version is not valid semver, writing it anyway");
    }

    let mut manifest = PackageJson::load(path)?;
    let old = manifest.set_version(&new);
    manifest.save()?;

    info!(old = ?old, new = %new, "manifest version updated");
    Ok(VersionUpdate { old, new })
}
