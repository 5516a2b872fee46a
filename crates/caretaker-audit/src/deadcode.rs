//! Dead code audit
//!
//! The dead-code scanner prints grouped sections:
//!
//! ```text
//! Unused files (2)
//!   app/old/page.tsx
//!   lib/legacy.ts
//! Unused dependencies (1)
//!   lodash
//! ```
//!
//! Output is read with a small state machine: a header line selects the
//! section, indented lines are items of the current section.

use std::path::Path;

use caretaker_adapters::PackageJson;
use caretaker_core::config::AuditConfig;
use tracing::{debug, info, instrument, warn};

use crate::runner::ToolRunner;
use crate::types::{Availability, LineOutcome};

/// Parser state: which section the following items belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeadCodeSection {
    /// Before any recognized header
    #[default]
    Idle,
    Files,
    Dependencies,
    Exports,
}

impl DeadCodeSection {
    /// Section selected by a header line, if the line is a header
    pub fn from_header(line: &str) -> Option<Self> {
        let lower = line.to_lowercase();
        if lower.contains("unused files") {
            Some(Self::Files)
        } else if lower.contains("unused dependencies") {
            Some(Self::Dependencies)
        } else if lower.contains("unused exports") {
            Some(Self::Exports)
        } else {
            None
        }
    }

    /// Consume one line: returns the next state and the item it emits, if any
    pub fn transition(self, line: &str) -> (Self, LineOutcome<String>) {
        if let Some(next) = Self::from_header(line) {
            return (next, LineOutcome::Unrecognized);
        }

        let indented = line.starts_with(' ') || line.starts_with('\t');
        let item = line.trim();
        if self != Self::Idle && indented && !item.is_empty() {
            (self, LineOutcome::Finding(item.to_string()))
        } else {
            (self, LineOutcome::Unrecognized)
        }
    }
}

/// Dead code audit result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeadCodeReport {
    /// Whether the scanner ran
    pub availability: Availability,
    /// Files nothing imports
    pub unused_files: Vec<String>,
    /// Declared dependencies nothing uses
    pub unused_dependencies: Vec<String>,
    /// Exports nothing imports
    pub unused_exports: Vec<String>,
}

impl DeadCodeReport {
    /// Report for an audit that was not selected
    pub fn not_requested() -> Self {
        Self::default()
    }

    /// Report for a missing scanner
    pub fn unavailable() -> Self {
        Self {
            availability: Availability::Unavailable,
            ..Self::default()
        }
    }

    /// Parse scanner output into a report
    pub fn parse(output: &str) -> Self {
        let mut report = Self {
            availability: Availability::Ran,
            ..Self::default()
        };

        let mut state = DeadCodeSection::default();
        for line in output.lines() {
            let (next, outcome) = state.transition(line);
            state = next;
            let LineOutcome::Finding(item) = outcome else {
                continue;
            };
            match state {
                DeadCodeSection::Files => report.unused_files.push(item),
                DeadCodeSection::Dependencies => report.unused_dependencies.push(item),
                DeadCodeSection::Exports => report.unused_exports.push(item),
                DeadCodeSection::Idle => {}
            }
        }

        report
    }

    /// Total number of findings
    pub fn total(&self) -> usize {
        self.unused_files.len() + self.unused_dependencies.len() + self.unused_exports.len()
    }
}

/// Runs the dead-code scanner through a package script
#[derive(Debug, Clone)]
pub struct DeadCodeAuditor {
    package_manager: String,
    package: String,
    script: String,
}

impl DeadCodeAuditor {
    /// Create an auditor from the audit configuration
    pub fn new(config: &AuditConfig) -> Self {
        Self {
            package_manager: config.tools.package_manager.clone(),
            package: config.tools.deadcode_package.clone(),
            script: config.tools.deadcode_script.clone(),
        }
    }

    /// Whether the scanner is declared as a dev-dependency of the project
    pub fn is_installed(&self, root: &Path) -> bool {
        match PackageJson::load(&root.join("package.json")) {
            Ok(manifest) => manifest.has_dev_dependency(&self.package),
            Err(e) => {
                debug!(error = %e, "cannot read manifest for dead-code check");
                false
            }
        }
    }

    /// Run the audit. A missing scanner yields an `Unavailable` report.
    #[instrument(skip(self, runner), fields(package = %self.package))]
    pub fn audit(&self, runner: &dyn ToolRunner, root: &Path) -> DeadCodeReport {
        if !self.is_installed(root) {
            warn!(package = %self.package, "dead-code scanner not declared, skipping");
            return DeadCodeReport::unavailable();
        }

        info!(script = %self.script, "running dead-code audit");
        let args = vec!["run".to_string(), self.script.clone()];
        let output = match runner.run(&self.package_manager, &args, root) {
            Ok(output) => output,
            Err(e) => {
                warn!(error = %e, "dead-code scanner failed to run");
                return DeadCodeReport::unavailable();
            }
        };

        let report = DeadCodeReport::parse(&output.stdout);
        debug!(
            files = report.unused_files.len(),
            dependencies = report.unused_dependencies.len(),
            exports = report.unused_exports.len(),
            "dead-code findings parsed"
        );
        report
    }
}
