//! Markdown rendering of the maintenance report

use crate::complexity::{ComplexityReport, Severity};
use crate::deadcode::DeadCodeReport;
use crate::security::{DependencyStatus, SecretScan, SecurityReport};

use super::{MaintenanceReport, OverallStatus};

/// Rows in the top functions table
const TOP_FUNCTIONS: usize = 10;
/// Items listed per dead-code or leak section
const LIST_LIMIT: usize = 10;

const GUIDANCE: &str = "\
## Refactoring Guidance

### Patterns for reducing complexity

1. **Guard clauses**: return early to flatten nesting
2. **Extract function**: give each function a single responsibility
3. **Strategy pattern**: replace conditional branches with polymorphism
4. **Table-driven logic**: turn switch or if-else chains into lookups
5. **Split components**: break large UI components into children

### Choosing what to fix first

1. Start with the **highest CCN** functions
2. Prefer **frequently changed files** (`git log --follow <file> | wc -l`)
3. Prefer code with **low test coverage**
4. Treat **security findings** as top priority";

pub(super) fn render(report: &MaintenanceReport) -> String {
    let mut lines = vec![
        "# Project Maintenance Report".to_string(),
        String::new(),
        format!(
            "**Generated**: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S")
        ),
        format!("**Project**: {}", report.project),
        format!("**Overall status**: {}", report.status().badge()),
        String::new(),
        "---".to_string(),
        String::new(),
    ];

    summary(report, &mut lines);
    actions(report, &mut lines);

    lines.push("## Details".to_string());
    lines.push(String::new());
    complexity_details(&report.complexity, &mut lines);
    security_details(&report.security, &report.package_manager, &mut lines);
    deadcode_details(&report.deadcode, &report.package_manager, &mut lines);

    lines.push(GUIDANCE.to_string());
    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(String::new());
    lines.push("*Generated by `caretaker maintenance`.*".to_string());
    lines.push(String::new());

    lines.join("\n")
}

fn summary(report: &MaintenanceReport, lines: &mut Vec<String>) {
    let complexity = &report.complexity;
    let security = &report.security;
    let deadcode = &report.deadcode;
    let counts = security.dependencies.counts;

    let complexity_status = if complexity.total() > 0 {
        OverallStatus::Warning
    } else {
        OverallStatus::Pass
    };
    let security_status = if security.success() {
        OverallStatus::Pass
    } else {
        OverallStatus::Fail
    };
    let deadcode_status = if deadcode.total() > 0 {
        OverallStatus::Warning
    } else {
        OverallStatus::Pass
    };

    lines.extend([
        "## Summary".to_string(),
        String::new(),
        "| Category | Status | High severity | Action required |".to_string(),
        "|----------|--------|---------------|-----------------|".to_string(),
        format!(
            "| Complexity | {} | {} | {} |",
            complexity_status.badge(),
            complexity.critical.len(),
            complexity.critical.len() + complexity.danger.len()
        ),
        format!(
            "| Security | {} | {} | {} |",
            security_status.badge(),
            security.secrets.findings().len(),
            counts.critical + counts.high
        ),
        format!(
            "| Dead code | {} | 0 | {} |",
            deadcode_status.badge(),
            deadcode.unused_files.len() + deadcode.unused_dependencies.len()
        ),
        String::new(),
        "---".to_string(),
        String::new(),
    ]);
}

fn actions(report: &MaintenanceReport, lines: &mut Vec<String>) {
    lines.push("## Priority Actions".to_string());
    lines.push(String::new());

    let actions = report.actions();
    if actions.is_empty() {
        lines.push("None - all clear!".to_string());
    } else {
        lines.extend(
            actions
                .iter()
                .enumerate()
                .map(|(i, action)| format!("{}. {}", i + 1, action)),
        );
    }

    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(String::new());
}

fn severity_label(severity: Option<Severity>) -> &'static str {
    match severity {
        Some(Severity::Critical) => "🔴 Critical",
        Some(Severity::Danger) => "🟠 Danger",
        _ => "🟡 Warning",
    }
}

fn complexity_details(complexity: &ComplexityReport, lines: &mut Vec<String>) {
    lines.push("### 1. Complexity".to_string());
    lines.push(String::new());

    if !complexity.availability.ran() {
        lines.push("⚠️ Complexity scan was skipped (scanner not run).".to_string());
    } else if complexity.total() == 0 {
        lines.push("✅ No functions exceed the complexity thresholds.".to_string());
    } else {
        lines.push(format!("**Found**: {} warnings", complexity.total()));
        lines.push(String::new());
        lines.push("| Severity | CCN range | Count |".to_string());
        lines.push("|----------|-----------|-------|".to_string());
        for severity in Severity::ALL {
            lines.push(format!(
                "| {} | {} | {} |",
                severity,
                severity.range(),
                complexity.bucket(severity).len()
            ));
        }
        lines.push(String::new());

        lines.push(format!("#### Top {} complex functions", TOP_FUNCTIONS));
        lines.push(String::new());
        lines.push("| File | Function | CCN | NLOC | Severity |".to_string());
        lines.push("|------|----------|-----|------|----------|".to_string());
        for finding in complexity.iter().take(TOP_FUNCTIONS) {
            lines.push(format!(
                "| `{}` | `{}` | {} | {} | {} |",
                finding.short_path(),
                finding.function,
                finding.ccn,
                finding.nloc,
                severity_label(finding.severity())
            ));
        }
    }

    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(String::new());
}

fn security_details(security: &SecurityReport, package_manager: &str, lines: &mut Vec<String>) {
    lines.push("### 2. Security".to_string());
    lines.push(String::new());

    if !security.availability.ran() {
        lines.push("⚠️ Security audit was not run.".to_string());
        lines.push(String::new());
        lines.push("---".to_string());
        lines.push(String::new());
        return;
    }

    match &security.secrets {
        SecretScan::Clean => lines.push("✅ **Secret scan**: no leaks".to_string()),
        SecretScan::Skipped => lines.push(
            "⚠️ **Secret scan**: skipped, secret scanner not available. Secrets were not checked."
                .to_string(),
        ),
        SecretScan::Leaks(findings) => {
            lines.push(format!("❌ **Secret scan**: {} findings", findings.len()));
            lines.push(String::new());
            lines.push(
                "⚠️ **Fix immediately!** Remove secrets before committing.".to_string(),
            );
            if !findings.is_empty() {
                lines.push(String::new());
                lines.extend(
                    findings
                        .iter()
                        .take(LIST_LIMIT)
                        .map(|f| format!("- `{}`", f.description)),
                );
                more(findings.len(), lines);
            }
        }
    }
    lines.push(String::new());

    let counts = security.dependencies.counts;
    match security.dependencies.status {
        DependencyStatus::Pass => {
            lines.push("✅ **Dependency scan**: no blocking vulnerabilities".to_string())
        }
        status => {
            let icon = if status == DependencyStatus::Fail {
                "❌"
            } else {
                "⚠️"
            };
            lines.extend([
                format!("{} **Dependency scan**: vulnerabilities found", icon),
                String::new(),
                format!("- Critical: {}", counts.critical),
                format!("- High: {}", counts.high),
                format!("- Moderate: {}", counts.moderate),
                format!("- Low: {}", counts.low),
                String::new(),
                format!(
                    "**Fix**: check whether `{} audit fix` resolves them.",
                    package_manager
                ),
            ]);
        }
    }

    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(String::new());
}

fn deadcode_details(deadcode: &DeadCodeReport, package_manager: &str, lines: &mut Vec<String>) {
    lines.push("### 3. Dead Code".to_string());
    lines.push(String::new());

    if !deadcode.availability.ran() {
        lines.push("⚠️ Dead-code scan was skipped (scanner not installed).".to_string());
    } else if deadcode.total() == 0 {
        lines.push("✅ No dead code found.".to_string());
    } else {
        lines.extend([
            format!("**Found**: {} issues", deadcode.total()),
            String::new(),
            "| Category | Count |".to_string(),
            "|----------|-------|".to_string(),
            format!("| Unused files | {} |", deadcode.unused_files.len()),
            format!(
                "| Unused dependencies | {} |",
                deadcode.unused_dependencies.len()
            ),
            format!("| Unused exports | {} |", deadcode.unused_exports.len()),
        ]);

        if !deadcode.unused_dependencies.is_empty() {
            lines.push(String::new());
            lines.push("#### Unused dependencies".to_string());
            lines.push(String::new());
            lines.extend(
                deadcode
                    .unused_dependencies
                    .iter()
                    .take(LIST_LIMIT)
                    .map(|dep| format!("- `{}` → `{} uninstall {}`", dep, package_manager, dep)),
            );
            more(deadcode.unused_dependencies.len(), lines);
        }

        if !deadcode.unused_files.is_empty() {
            lines.push(String::new());
            lines.push("#### Unused files".to_string());
            lines.push(String::new());
            lines.extend(
                deadcode
                    .unused_files
                    .iter()
                    .take(LIST_LIMIT)
                    .map(|file| format!("- `{}`", file)),
            );
            more(deadcode.unused_files.len(), lines);
        }
    }

    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(String::new());
}

fn more(total: usize, lines: &mut Vec<String>) {
    if total > LIST_LIMIT {
        lines.push(String::new());
        lines.push(format!("... +{} more", total - LIST_LIMIT));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complexity::ComplexityFinding;
    use crate::security::{DependencyAudit, VulnerabilityCounts};
    use crate::types::Availability;
    use chrono::{Local, TimeZone};

    fn report(
        complexity: ComplexityReport,
        security: SecurityReport,
        deadcode: DeadCodeReport,
    ) -> MaintenanceReport {
        let at = Local.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        MaintenanceReport::new("RoastPlus", complexity, security, deadcode).with_timestamp(at)
    }

    fn clean_security() -> SecurityReport {
        SecurityReport {
            availability: Availability::Ran,
            secrets: SecretScan::Clean,
            dependencies: DependencyAudit::default(),
        }
    }

    #[test]
    fn test_all_clear() {
        let md = report(
            ComplexityReport::from_findings(Vec::new()),
            clean_security(),
            DeadCodeReport::parse(""),
        )
        .to_markdown();

        assert!(md.starts_with("# Project Maintenance Report\n"));
        assert!(md.contains("**Generated**: 2025-03-01 09:30:00"));
        assert!(md.contains("**Project**: RoastPlus"));
        assert!(md.contains("**Overall status**: ✅ PASS"));
        assert!(md.contains("None - all clear!"));
        assert!(md.contains("✅ No functions exceed the complexity thresholds."));
        assert!(md.contains("✅ **Secret scan**: no leaks"));
        assert!(md.contains("✅ No dead code found."));
        assert!(md.contains("## Refactoring Guidance"));
    }

    #[test]
    fn test_skipped_sections() {
        let md = report(
            ComplexityReport::unavailable(),
            SecurityReport {
                secrets: SecretScan::Skipped,
                ..clean_security()
            },
            DeadCodeReport::unavailable(),
        )
        .to_markdown();

        assert!(md.contains("Complexity scan was skipped"));
        assert!(md.contains("**Secret scan**: skipped"));
        assert!(md.contains("Dead-code scan was skipped"));
        assert!(md.contains("**Overall status**: ✅ PASS"));
    }

    #[test]
    fn test_complexity_tables() {
        let findings = (0..12).map(|i| ComplexityFinding {
            path: format!("app/feature/f{}.tsx", i),
            function: format!("f{}", i),
            ccn: 20 + i * 4,
            nloc: 60,
        });
        let md = report(
            ComplexityReport::from_findings(findings),
            clean_security(),
            DeadCodeReport::not_requested(),
        )
        .to_markdown();

        assert!(md.contains("**Found**: 12 warnings"));
        assert!(md.contains("| Critical | 51+ | 4 |"));
        assert!(md.contains("| Danger | 26-50 | 6 |"));
        assert!(md.contains("| Warning | 16-25 | 2 |"));
        assert!(md.contains("| `feature/f11.tsx` | `f11` | 64 | 60 | 🔴 Critical |"));
        // only ten rows in the top table
        assert!(!md.contains("| `feature/f0.tsx` | `f0` |"));
        assert!(md.contains("**Overall status**: ⚠️ WARNING"));
    }

    #[test]
    fn test_dependency_vulnerabilities() {
        let security = SecurityReport {
            dependencies: DependencyAudit::from_counts(VulnerabilityCounts {
                critical: 0,
                high: 2,
                moderate: 1,
                low: 3,
            }),
            ..clean_security()
        };
        let md = report(
            ComplexityReport::not_requested(),
            security,
            DeadCodeReport::not_requested(),
        )
        .with_package_manager("pnpm")
        .to_markdown();

        assert!(md.contains("❌ **Dependency scan**: vulnerabilities found"));
        assert!(md.contains("- High: 2"));
        assert!(md.contains("`pnpm audit fix`"));
        assert!(md.contains("1. [HIGH] Fix dependency vulnerabilities (Critical: 0, High: 2)"));
        assert!(md.contains("**Overall status**: ❌ FAIL"));
    }

    #[test]
    fn test_unused_dependencies_truncated() {
        let deadcode = DeadCodeReport {
            availability: Availability::Ran,
            unused_dependencies: (0..13).map(|i| format!("dep{}", i)).collect(),
            ..DeadCodeReport::default()
        };
        let md = report(ComplexityReport::not_requested(), clean_security(), deadcode)
            .to_markdown();

        assert!(md.contains("| Unused dependencies | 13 |"));
        assert!(md.contains("- `dep0` → `npm uninstall dep0`"));
        assert!(md.contains("- `dep9` → `npm uninstall dep9`"));
        assert!(!md.contains("`dep10`"));
        assert!(md.contains("... +3 more"));
    }
}
