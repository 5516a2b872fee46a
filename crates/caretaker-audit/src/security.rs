//! Secret leak and dependency vulnerability audit

use std::fmt;
use std::path::Path;

use caretaker_core::config::AuditConfig;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::runner::ToolRunner;
use crate::types::{Availability, LineOutcome};

/// One line of secret scanner output that mentions a secret or leak
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretFinding {
    /// The trimmed output line
    pub description: String,
}

/// Parse one line of secret scanner output
pub fn parse_secret_line(line: &str) -> LineOutcome<SecretFinding> {
    let lower = line.to_lowercase();
    if lower.contains("secret") || lower.contains("leak") {
        LineOutcome::Finding(SecretFinding {
            description: line.trim().to_string(),
        })
    } else {
        LineOutcome::Unrecognized
    }
}

/// Outcome of the secret scan
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SecretScan {
    /// The scanner ran and found nothing
    Clean,
    /// The scanner reported findings
    Leaks(Vec<SecretFinding>),
    /// The scanner was not run; no claim is made about secrets
    #[default]
    Skipped,
}

impl SecretScan {
    /// Whether the scanner reported leaks
    pub fn has_leaks(&self) -> bool {
        matches!(self, Self::Leaks(_))
    }

    /// Reported findings, empty unless leaks were found
    pub fn findings(&self) -> &[SecretFinding] {
        match self {
            Self::Leaks(findings) => findings,
            _ => &[],
        }
    }
}

/// Dependency audit verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DependencyStatus {
    #[default]
    Pass,
    Warn,
    Fail,
}

impl fmt::Display for DependencyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pass => "PASS",
            Self::Warn => "WARN",
            Self::Fail => "FAIL",
        })
    }
}

/// Vulnerability counts by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct VulnerabilityCounts {
    pub critical: u64,
    pub high: u64,
    pub moderate: u64,
    pub low: u64,
}

/// Dependency audit result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DependencyAudit {
    /// Verdict derived from the counts
    pub status: DependencyStatus,
    /// Counts by severity
    pub counts: VulnerabilityCounts,
}

impl DependencyAudit {
    /// Derive the verdict: critical or high fails, moderate warns
    pub fn from_counts(counts: VulnerabilityCounts) -> Self {
        let status = if counts.critical > 0 || counts.high > 0 {
            DependencyStatus::Fail
        } else if counts.moderate > 0 {
            DependencyStatus::Warn
        } else {
            DependencyStatus::Pass
        };
        Self { status, counts }
    }
}

#[derive(Debug, Deserialize)]
struct NpmAuditReport {
    vulnerabilities: Option<serde_json::Value>,
    #[serde(default)]
    metadata: NpmAuditMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct NpmAuditMetadata {
    #[serde(default)]
    vulnerabilities: VulnerabilityCounts,
}

/// Parse `npm audit --json` output. `None` when the document is not an
/// audit report.
pub fn parse_npm_audit(json: &str) -> Option<VulnerabilityCounts> {
    let report: NpmAuditReport = match serde_json::from_str(json) {
        Ok(report) => report,
        Err(e) => {
            debug!(error = %e, "dependency audit output is not valid JSON");
            return None;
        }
    };
    if report.vulnerabilities.is_none() {
        debug!("dependency audit output has no vulnerabilities section");
        return None;
    }
    Some(report.metadata.vulnerabilities)
}

/// Security audit result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityReport {
    /// Whether the audit was run
    pub availability: Availability,
    /// Secret scan outcome
    pub secrets: SecretScan,
    /// Dependency audit outcome
    pub dependencies: DependencyAudit,
}

impl SecurityReport {
    /// Report for an audit that was not selected
    pub fn not_requested() -> Self {
        Self::default()
    }

    /// No leaks were reported and dependencies did not fail
    pub fn success(&self) -> bool {
        !self.secrets.has_leaks() && self.dependencies.status != DependencyStatus::Fail
    }
}

/// Runs the secret scanner and the dependency audit
#[derive(Debug, Clone)]
pub struct SecurityAuditor {
    secrets_program: String,
    package_manager: String,
}

impl SecurityAuditor {
    /// Create an auditor from the audit configuration
    pub fn new(config: &AuditConfig) -> Self {
        Self {
            secrets_program: config.tools.secrets.clone(),
            package_manager: config.tools.package_manager.clone(),
        }
    }

    /// Run both checks
    #[instrument(skip(self, runner))]
    pub fn audit(&self, runner: &dyn ToolRunner, root: &Path) -> SecurityReport {
        info!("running security audit");
        let report = SecurityReport {
            availability: Availability::Ran,
            secrets: self.scan_secrets(runner, root),
            dependencies: self.audit_dependencies(runner, root),
        };
        debug!(
            leaks = report.secrets.findings().len(),
            dependency_status = %report.dependencies.status,
            success = report.success(),
            "security audit finished"
        );
        report
    }

    fn scan_secrets(&self, runner: &dyn ToolRunner, root: &Path) -> SecretScan {
        if !runner.is_available(&self.secrets_program) {
            warn!(program = %self.secrets_program, "secret scanner not found, secrets are not checked");
            return SecretScan::Skipped;
        }

        let args: Vec<String> = ["detect", "--source", ".", "-v", "--no-git"]
            .iter()
            .map(|a| a.to_string())
            .collect();

        let output = match runner.run(&self.secrets_program, &args, root) {
            Ok(output) => output,
            Err(e) => {
                warn!(error = %e, "secret scanner failed to run");
                return SecretScan::Skipped;
            }
        };

        if output.success() {
            return SecretScan::Clean;
        }

        let findings = output
            .stderr
            .lines()
            .chain(output.stdout.lines())
            .filter_map(|line| parse_secret_line(line).finding())
            .collect();
        SecretScan::Leaks(findings)
    }

    fn audit_dependencies(&self, runner: &dyn ToolRunner, root: &Path) -> DependencyAudit {
        let args = vec!["audit".to_string(), "--json".to_string()];

        // npm exits non-zero when it finds vulnerabilities, so the status is ignored
        let output = match runner.run(&self.package_manager, &args, root) {
            Ok(output) => output,
            Err(e) => {
                warn!(error = %e, "dependency audit failed to run, assuming pass");
                return DependencyAudit::default();
            }
        };

        match parse_npm_audit(&output.stdout) {
            Some(counts) => DependencyAudit::from_counts(counts),
            None => {
                warn!("dependency audit output not understood, assuming pass");
                DependencyAudit::default()
            }
        }
    }
}
