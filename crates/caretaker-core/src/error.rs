//! Error types for Caretaker

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using CaretakerError
pub type Result<T> = std::result::Result<T, CaretakerError>;

/// Main error type for Caretaker operations
#[derive(Debug, Error)]
pub enum CaretakerError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Manifest-related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// External tool errors
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Output errors
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// A revision could not be resolved to a commit
    #[error("Cannot resolve reference '{reference}': {reason}")]
    ReferenceNotFound { reference: String, reason: String },

    /// Walking the commit range failed
    #[error("Invalid commit range {range}: {reason}")]
    InvalidRange { range: String, reason: String },

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Project manifest errors
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("Manifest not found at {0}")]
    NotFound(PathBuf),

    /// Manifest exists but could not be read
    #[error("Failed to read manifest {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    /// Manifest is not a valid document
    #[error("Failed to parse manifest {path}: {reason}")]
    ParseFailed { path: PathBuf, reason: String },

    /// Manifest could not be written back
    #[error("Failed to write manifest {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },
}

/// External tool errors
#[derive(Debug, Error)]
pub enum ToolError {
    /// Executable is not on PATH
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// The process could not be spawned or waited on
    #[error("Failed to run {program}: {reason}")]
    SpawnFailed { program: String, reason: String },
}

/// Output errors
#[derive(Debug, Error)]
pub enum OutputError {
    /// Output file could not be written
    #[error("Failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },
}
