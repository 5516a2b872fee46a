//! Cyclomatic complexity audit
//!
//! Drives a lizard-style scanner in warnings-only mode and buckets the
//! reported functions by CCN. Recognized warning lines look like
//!
//! ```text
//! app/page.tsx:12: warning: Home has 120 NLOC, 30 CCN, 800 token, 0 PARAM, 150 length
//! ```
//!
//! The line number is optional, and `CCN <n>` / `NLOC <n>` orderings are
//! accepted as well. A missing NLOC value reads as 0.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use caretaker_core::config::AuditConfig;
use regex::Regex;
use tracing::{debug, info, instrument, warn};

use crate::runner::ToolRunner;
use crate::types::{Availability, LineOutcome};

static WARNING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<path>.+?):(?:\d+:)?\s*warning:\s*(?P<function>.+?)\s+has\s+(?P<metrics>.+)$")
        .expect("Invalid regex")
});

static CCN_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:(?P<before>\d+)\s+CCN\b|\bCCN\s*(?P<after>\d+))").expect("Invalid regex")
});

static NLOC_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:(?P<before>\d+)\s+NLOC\b|\bNLOC\s*(?P<after>\d+))").expect("Invalid regex")
});

/// Complexity severity bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// CCN 51 and above
    Critical,
    /// CCN 26 to 50
    Danger,
    /// CCN 16 to 25
    Warning,
}

impl Severity {
    /// All buckets, most severe first
    pub const ALL: [Severity; 3] = [Severity::Critical, Severity::Danger, Severity::Warning];

    /// Bucket for a CCN value; below 16 is not reported
    pub fn from_ccn(ccn: u32) -> Option<Self> {
        match ccn {
            51.. => Some(Self::Critical),
            26..=50 => Some(Self::Danger),
            16..=25 => Some(Self::Warning),
            _ => None,
        }
    }

    /// CCN range covered by this bucket
    pub fn range(&self) -> &'static str {
        match self {
            Self::Critical => "51+",
            Self::Danger => "26-50",
            Self::Warning => "16-25",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Critical => "Critical",
            Self::Danger => "Danger",
            Self::Warning => "Warning",
        })
    }
}

/// One function reported by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexityFinding {
    /// Source file as printed by the scanner
    pub path: String,
    /// Function name
    pub function: String,
    /// Cyclomatic complexity
    pub ccn: u32,
    /// Non-comment lines of code
    pub nloc: u32,
}

impl ComplexityFinding {
    /// Severity bucket of this finding
    pub fn severity(&self) -> Option<Severity> {
        Severity::from_ccn(self.ccn)
    }

    /// Last two path components, for compact display
    pub fn short_path(&self) -> String {
        let parts: Vec<&str> = self
            .path
            .split(['/', '\\'])
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() > 1 {
            parts[parts.len() - 2..].join("/")
        } else {
            self.path.clone()
        }
    }
}

/// Parse one line of scanner output
pub fn parse_warning_line(line: &str) -> LineOutcome<ComplexityFinding> {
    let Some(caps) = WARNING_LINE.captures(line.trim_end()) else {
        return LineOutcome::Unrecognized;
    };
    let metrics = &caps["metrics"];

    let Some(ccn) = metric(&CCN_VALUE, metrics) else {
        return LineOutcome::Unrecognized;
    };
    let nloc = metric(&NLOC_VALUE, metrics).unwrap_or(0);

    LineOutcome::Finding(ComplexityFinding {
        path: caps["path"].trim().to_string(),
        function: caps["function"].trim().to_string(),
        ccn,
        nloc,
    })
}

fn metric(pattern: &Regex, metrics: &str) -> Option<u32> {
    let caps = pattern.captures(metrics)?;
    caps.name("before")
        .or_else(|| caps.name("after"))?
        .as_str()
        .parse()
        .ok()
}

/// Complexity audit result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplexityReport {
    /// Whether the scanner ran
    pub availability: Availability,
    /// CCN 51+
    pub critical: Vec<ComplexityFinding>,
    /// CCN 26-50
    pub danger: Vec<ComplexityFinding>,
    /// CCN 16-25
    pub warning: Vec<ComplexityFinding>,
}

impl ComplexityReport {
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

    /// Bucket findings by severity. Each bucket is sorted by descending CCN;
    /// equal scores keep their input order. Findings below 16 are dropped.
    pub fn from_findings(findings: impl IntoIterator<Item = ComplexityFinding>) -> Self {
        let mut report = Self {
            availability: Availability::Ran,
            ..Self::default()
        };

        for finding in findings {
            match finding.severity() {
                Some(Severity::Critical) => report.critical.push(finding),
                Some(Severity::Danger) => report.danger.push(finding),
                Some(Severity::Warning) => report.warning.push(finding),
                None => {}
            }
        }

        for bucket in [&mut report.critical, &mut report.danger, &mut report.warning] {
            bucket.sort_by(|a, b| b.ccn.cmp(&a.ccn));
        }

        report
    }

    /// Findings in one bucket
    pub fn bucket(&self, severity: Severity) -> &[ComplexityFinding] {
        match severity {
            Severity::Critical => &self.critical,
            Severity::Danger => &self.danger,
            Severity::Warning => &self.warning,
        }
    }

    /// All findings, most severe first
    pub fn iter(&self) -> impl Iterator<Item = &ComplexityFinding> {
        self.critical
            .iter()
            .chain(self.danger.iter())
            .chain(self.warning.iter())
    }

    /// Total number of findings
    pub fn total(&self) -> usize {
        self.critical.len() + self.danger.len() + self.warning.len()
    }
}

/// Runs the complexity scanner over the configured targets
#[derive(Debug, Clone)]
pub struct ComplexityAuditor {
    program: String,
    targets: Vec<PathBuf>,
    ccn_threshold: u32,
    nloc_threshold: u32,
}

impl ComplexityAuditor {
    /// Create an auditor from the audit configuration
    pub fn new(config: &AuditConfig) -> Self {
        Self {
            program: config.tools.complexity.clone(),
            targets: config.targets.clone(),
            ccn_threshold: config.ccn_threshold,
            nloc_threshold: config.nloc_threshold,
        }
    }

    fn args(&self, targets: &[&PathBuf]) -> Vec<String> {
        let mut args: Vec<String> = targets.iter().map(|t| t.display().to_string()).collect();
        args.extend([
            "-C".to_string(),
            self.ccn_threshold.to_string(),
            "-L".to_string(),
            self.nloc_threshold.to_string(),
            "-w".to_string(),
        ]);
        args
    }

    /// Run the audit. A missing scanner yields an `Unavailable` report.
    #[instrument(skip(self, runner), fields(program = %self.program))]
    pub fn audit(&self, runner: &dyn ToolRunner, root: &Path) -> ComplexityReport {
        if !runner.is_available(&self.program) {
            warn!(program = %self.program, "complexity scanner not found, skipping");
            return ComplexityReport::unavailable();
        }

        let targets: Vec<&PathBuf> = self
            .targets
            .iter()
            .filter(|t| root.join(t).exists())
            .collect();
        if targets.is_empty() {
            warn!(targets = ?self.targets, "no complexity targets exist, nothing to scan");
            return ComplexityReport::from_findings(Vec::new());
        }

        info!(target_count = targets.len(), "running complexity audit");
        let output = match runner.run(&self.program, &self.args(&targets), root) {
            Ok(output) => output,
            Err(e) => {
                warn!(error = %e, "complexity scanner failed to run");
                return ComplexityReport::unavailable();
            }
        };

        let report = ComplexityReport::from_findings(
            output
                .stdout
                .lines()
                .filter_map(|line| parse_warning_line(line).finding()),
        );
        debug!(
            critical = report.critical.len(),
            danger = report.danger.len(),
            warning = report.warning.len(),
            "complexity findings bucketed"
        );
        report
    }
}
