//! Caretaker Adapters - project manifest access
//!
//! Reads and rewrites the project manifest for version bumps and
//! dev-dependency checks.

pub mod npm;

pub use npm::{update_version, PackageJson, VersionUpdate};
