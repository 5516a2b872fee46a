//! Configuration types

use serde::Deserialize;
use std::path::PathBuf;

use super::defaults;

/// Main configuration for Caretaker
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project name shown in the maintenance report
    pub project: Option<String>,

    /// Release notes configuration
    pub release_notes: ReleaseNotesConfig,

    /// Maintenance audit configuration
    pub audit: AuditConfig,
}

/// Release notes configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReleaseNotesConfig {
    /// Default output file
    pub output: PathBuf,

    /// Manifest whose `version` field is updated on request
    pub manifest: PathBuf,
}

impl Default for ReleaseNotesConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(defaults::DEFAULT_RELEASE_NOTES_FILE),
            manifest: PathBuf::from(defaults::DEFAULT_MANIFEST_FILE),
        }
    }
}

/// Maintenance audit configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Cyclomatic complexity threshold passed to the complexity scanner
    pub ccn_threshold: u32,

    /// Function length (NLOC) threshold passed to the complexity scanner
    pub nloc_threshold: u32,

    /// Directories scanned for complexity
    pub targets: Vec<PathBuf>,

    /// External tool names
    pub tools: ToolsConfig,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            ccn_threshold: defaults::DEFAULT_CCN_THRESHOLD,
            nloc_threshold: defaults::DEFAULT_NLOC_THRESHOLD,
            targets: defaults::DEFAULT_TARGETS.iter().map(PathBuf::from).collect(),
            tools: ToolsConfig::default(),
        }
    }
}

/// Names of the external analyzers
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Complexity scanner executable
    pub complexity: String,

    /// Secret scanner executable
    pub secrets: String,

    /// Package manager used for dependency audit and scripts
    pub package_manager: String,

    /// Dev-dependency that must be declared for the dead-code audit
    pub deadcode_package: String,

    /// Package script that runs the dead-code scanner
    pub deadcode_script: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            complexity: "lizard".to_string(),
            secrets: "gitleaks".to_string(),
            package_manager: "npm".to_string(),
            deadcode_package: "knip".to_string(),
            deadcode_script: "deadcode".to_string(),
        }
    }
}
