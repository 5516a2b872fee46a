//! Maintenance report aggregation

mod markdown;

use std::fmt;

use chrono::{DateTime, Local};

use crate::complexity::{ComplexityReport, Severity};
use crate::deadcode::DeadCodeReport;
use crate::security::SecurityReport;

/// Number of complexity items per severity that become actions
const TOP_COMPLEXITY_ACTIONS: usize = 3;

/// Overall maintenance verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverallStatus {
    Pass,
    Warning,
    Fail,
}

impl OverallStatus {
    /// Status with its icon
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Pass => "✅ PASS",
            Self::Warning => "⚠️ WARNING",
            Self::Fail => "❌ FAIL",
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pass => "PASS",
            Self::Warning => "WARNING",
            Self::Fail => "FAIL",
        })
    }
}

/// Action priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Urgent,
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Urgent => "URGENT",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        })
    }
}

/// One recommended follow-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Split up an overly complex function
    ReduceComplexity {
        severity: Severity,
        location: String,
        ccn: u32,
    },
    /// Remove leaked secrets
    FixSecretLeaks { count: usize },
    /// Upgrade vulnerable dependencies
    FixVulnerabilities { critical: u64, high: u64 },
    /// Uninstall unused dependencies
    RemoveUnusedDependencies { count: usize },
    /// Delete unused files
    RemoveUnusedFiles { count: usize },
    /// Drop unused exports
    RemoveUnusedExports { count: usize },
}

impl Action {
    /// Priority of this action
    pub fn priority(&self) -> Priority {
        match self {
            Self::ReduceComplexity {
                severity: Severity::Critical,
                ..
            } => Priority::Urgent,
            Self::ReduceComplexity { .. } => Priority::High,
            Self::FixSecretLeaks { .. } => Priority::Urgent,
            Self::FixVulnerabilities { .. } => Priority::High,
            Self::RemoveUnusedDependencies { .. } | Self::RemoveUnusedFiles { .. } => {
                Priority::Medium
            }
            Self::RemoveUnusedExports { .. } => Priority::Low,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.priority())?;
        match self {
            Self::ReduceComplexity { location, ccn, .. } => {
                write!(f, "Reduce complexity of `{}` (CCN: {})", location, ccn)
            }
            Self::FixSecretLeaks { count } => write!(f, "Fix leaked secrets ({} findings)", count),
            Self::FixVulnerabilities { critical, high } => write!(
                f,
                "Fix dependency vulnerabilities (Critical: {}, High: {})",
                critical, high
            ),
            Self::RemoveUnusedDependencies { count } => {
                write!(f, "Remove unused dependencies ({})", count)
            }
            Self::RemoveUnusedFiles { count } => write!(f, "Remove unused files ({})", count),
            Self::RemoveUnusedExports { count } => write!(f, "Remove unused exports ({})", count),
        }
    }
}

/// Combined result of the three audits
#[derive(Debug, Clone)]
pub struct MaintenanceReport {
    /// Project display name
    pub project: String,
    /// When the audits ran
    pub generated_at: DateTime<Local>,
    /// Package manager named in fix hints
    pub package_manager: String,
    /// Complexity audit
    pub complexity: ComplexityReport,
    /// Security audit
    pub security: SecurityReport,
    /// Dead code audit
    pub deadcode: DeadCodeReport,
}

impl MaintenanceReport {
    /// Create a report stamped with the current time
    pub fn new(
        project: impl Into<String>,
        complexity: ComplexityReport,
        security: SecurityReport,
        deadcode: DeadCodeReport,
    ) -> Self {
        Self {
            project: project.into(),
            generated_at: Local::now(),
            package_manager: "npm".to_string(),
            complexity,
            security,
            deadcode,
        }
    }

    /// Set the generation time
    pub fn with_timestamp(mut self, generated_at: DateTime<Local>) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// Set the package manager used in fix hints
    pub fn with_package_manager(mut self, package_manager: impl Into<String>) -> Self {
        self.package_manager = package_manager.into();
        self
    }

    /// Fail on security problems, warn on any complexity or dead-code finding
    pub fn status(&self) -> OverallStatus {
        if !self.security.success() {
            OverallStatus::Fail
        } else if self.complexity.total() > 0 || self.deadcode.total() > 0 {
            OverallStatus::Warning
        } else {
            OverallStatus::Pass
        }
    }

    /// Recommended actions in fixed precedence order
    pub fn actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();

        actions.extend(self.complexity_actions(Severity::Critical));

        if self.security.secrets.has_leaks() {
            actions.push(Action::FixSecretLeaks {
                count: self.security.secrets.findings().len(),
            });
        }

        let counts = self.security.dependencies.counts;
        if counts.critical > 0 || counts.high > 0 {
            actions.push(Action::FixVulnerabilities {
                critical: counts.critical,
                high: counts.high,
            });
        }

        actions.extend(self.complexity_actions(Severity::Danger));

        let deadcode = &self.deadcode;
        if !deadcode.unused_dependencies.is_empty() {
            actions.push(Action::RemoveUnusedDependencies {
                count: deadcode.unused_dependencies.len(),
            });
        }
        if !deadcode.unused_files.is_empty() {
            actions.push(Action::RemoveUnusedFiles {
                count: deadcode.unused_files.len(),
            });
        }
        if !deadcode.unused_exports.is_empty() {
            actions.push(Action::RemoveUnusedExports {
                count: deadcode.unused_exports.len(),
            });
        }

        actions
    }

    fn complexity_actions(&self, severity: Severity) -> impl Iterator<Item = Action> + '_ {
        self.complexity
            .bucket(severity)
            .iter()
            .take(TOP_COMPLEXITY_ACTIONS)
            .map(move |finding| Action::ReduceComplexity {
                severity,
                location: format!("{}:{}", finding.short_path(), finding.function),
                ccn: finding.ccn,
            })
    }

    /// Render the full Markdown report
    pub fn to_markdown(&self) -> String {
        markdown::render(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complexity::ComplexityFinding;
    use crate::security::{DependencyAudit, SecretFinding, SecretScan, VulnerabilityCounts};
    use crate::types::Availability;

    fn finding(path: &str, function: &str, ccn: u32) -> ComplexityFinding {
        ComplexityFinding {
            path: path.to_string(),
            function: function.to_string(),
            ccn,
            nloc: 80,
        }
    }

    fn clean_security() -> SecurityReport {
        SecurityReport {
            availability: Availability::Ran,
            secrets: SecretScan::Clean,
            dependencies: DependencyAudit::default(),
        }
    }

    fn report(
        complexity: ComplexityReport,
        security: SecurityReport,
        deadcode: DeadCodeReport,
    ) -> MaintenanceReport {
        MaintenanceReport::new("demo", complexity, security, deadcode)
    }

    #[test]
    fn test_status_pass() {
        let r = report(
            ComplexityReport::from_findings(Vec::new()),
            clean_security(),
            DeadCodeReport::parse(""),
        );
        assert_eq!(r.status(), OverallStatus::Pass);
        assert!(r.actions().is_empty());
    }

    #[test]
    fn test_status_skipped_secret_scan_still_passes() {
        let security = SecurityReport {
            availability: Availability::Ran,
            secrets: SecretScan::Skipped,
            dependencies: DependencyAudit::from_counts(VulnerabilityCounts::default()),
        };
        let r = report(
            ComplexityReport::not_requested(),
            security,
            DeadCodeReport::not_requested(),
        );
        assert!(r.security.success());
        assert_eq!(r.status(), OverallStatus::Pass);
    }

    #[test]
    fn test_status_warning_on_findings() {
        let r = report(
            ComplexityReport::from_findings(vec![finding("a/b.ts", "f", 20)]),
            clean_security(),
            DeadCodeReport::not_requested(),
        );
        assert_eq!(r.status(), OverallStatus::Warning);
    }

    #[test]
    fn test_status_fail_beats_warning() {
        let security = SecurityReport {
            secrets: SecretScan::Leaks(vec![]),
            ..clean_security()
        };
        let r = report(
            ComplexityReport::from_findings(vec![finding("a/b.ts", "f", 20)]),
            security,
            DeadCodeReport::not_requested(),
        );
        assert_eq!(r.status(), OverallStatus::Fail);
    }

    #[test]
    fn test_action_precedence() {
        let complexity = ComplexityReport::from_findings(vec![
            finding("app/x/danger1.tsx", "d1", 30),
            finding("app/x/crit1.tsx", "c1", 60),
            finding("app/x/warn.tsx", "w", 18),
            finding("app/x/danger2.tsx", "d2", 40),
            finding("app/x/crit2.tsx", "c2", 55),
            finding("app/x/crit3.tsx", "c3", 52),
            finding("app/x/crit4.tsx", "c4", 51),
            finding("app/x/danger3.tsx", "d3", 26),
            finding("app/x/danger4.tsx", "d4", 27),
        ]);
        let security = SecurityReport {
            availability: Availability::Ran,
            secrets: SecretScan::Leaks(vec![SecretFinding {
                description: "Secret: abc".to_string(),
            }]),
            dependencies: DependencyAudit::from_counts(VulnerabilityCounts {
                critical: 1,
                high: 2,
                moderate: 0,
                low: 0,
            }),
        };
        let deadcode = DeadCodeReport {
            availability: Availability::Ran,
            unused_files: vec!["a.ts".to_string()],
            unused_dependencies: vec!["lodash".to_string(), "moment".to_string()],
            unused_exports: vec!["x".to_string()],
        };

        let actions: Vec<String> = report(complexity, security, deadcode)
            .actions()
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(
            actions,
            vec![
                "[URGENT] Reduce complexity of `x/crit1.tsx:c1` (CCN: 60)",
                "[URGENT] Reduce complexity of `x/crit2.tsx:c2` (CCN: 55)",
                "[URGENT] Reduce complexity of `x/crit3.tsx:c3` (CCN: 52)",
                "[URGENT] Fix leaked secrets (1 findings)",
                "[HIGH] Fix dependency vulnerabilities (Critical: 1, High: 2)",
                "[HIGH] Reduce complexity of `x/danger2.tsx:d2` (CCN: 40)",
                "[HIGH] Reduce complexity of `x/danger1.tsx:d1` (CCN: 30)",
                "[HIGH] Reduce complexity of `x/danger4.tsx:d4` (CCN: 27)",
                "[MEDIUM] Remove unused dependencies (2)",
                "[MEDIUM] Remove unused files (1)",
                "[LOW] Remove unused exports (1)",
            ]
        );
    }

    #[test]
    fn test_single_critical_and_leak() {
        let security = SecurityReport {
            secrets: SecretScan::Leaks(vec![SecretFinding {
                description: "leak".to_string(),
            }]),
            ..clean_security()
        };
        let r = report(
            ComplexityReport::from_findings(vec![finding("src/big.ts", "huge", 70)]),
            security,
            DeadCodeReport::not_requested(),
        );

        let priorities: Vec<Priority> = r.actions().iter().map(Action::priority).collect();
        assert_eq!(priorities, vec![Priority::Urgent, Priority::Urgent]);
        assert!(matches!(r.actions()[0], Action::ReduceComplexity { ccn: 70, .. }));
        assert!(matches!(r.actions()[1], Action::FixSecretLeaks { count: 1 }));
    }
}
