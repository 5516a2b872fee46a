//! npm package.json handling

use std::path::{Path, PathBuf};

use caretaker_core::error::ManifestError;
use serde_json::{Map, Value};

/// Result type for manifest operations
pub type Result<T> = std::result::Result<T, ManifestError>;

/// A package.json document.
///
/// Kept as an ordered JSON map so that rewriting one field leaves every other
/// key, and the key order, untouched.
#[derive(Debug, Clone)]
pub struct PackageJson {
    path: PathBuf,
    doc: Map<String, Value>,
}

impl PackageJson {
    /// Load package.json from path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ManifestError::NotFound(path.to_path_buf()),
            _ => ManifestError::ReadFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        })?;

        let doc = match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(doc)) => doc,
            Ok(_) => {
                return Err(ManifestError::ParseFailed {
                    path: path.to_path_buf(),
                    reason: "top-level value is not an object".to_string(),
                })
            }
            Err(e) => {
                return Err(ManifestError::ParseFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            doc,
        })
    }

    /// Package name
    pub fn name(&self) -> Option<&str> {
        self.doc.get("name").and_then(Value::as_str)
    }

    /// Package version
    pub fn version(&self) -> Option<&str> {
        self.doc.get("version").and_then(Value::as_str)
    }

    /// Replace the version field, returning the previous value
    pub fn set_version(&mut self, version: &str) -> Option<String> {
        let old = self.version().map(str::to_string);
        self.doc
            .insert("version".to_string(), Value::String(version.to_string()));
        old
    }

    /// Check whether `name` is declared under `devDependencies`
    pub fn has_dev_dependency(&self, name: &str) -> bool {
        self.doc
            .get("devDependencies")
            .and_then(Value::as_object)
            .is_some_and(|deps| deps.contains_key(name))
    }

    /// Save package.json back to where it was loaded from
    pub fn save(&self) -> Result<()> {
        let write_failed = |reason: String| ManifestError::WriteFailed {
            path: self.path.clone(),
            reason,
        };

        let content =
            serde_json::to_string_pretty(&self.doc).map_err(|e| write_failed(e.to_string()))?;

        // Ensure trailing newline
        let content = format!("{}\n", content.trim_end());

        std::fs::write(&self.path, content).map_err(|e| write_failed(e.to_string()))
    }
}
