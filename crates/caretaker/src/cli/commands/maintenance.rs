//! Maintenance command

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use caretaker_adapters::PackageJson;
use caretaker_audit::{
    Availability, ComplexityAuditor, ComplexityReport, DeadCodeAuditor, DeadCodeReport,
    MaintenanceReport, OverallStatus, SecretScan, SecurityAuditor, SecurityReport, SystemRunner,
    ToolRunner,
};
use caretaker_core::config::{load_config_or_default, AuditConfig, Config};
use caretaker_core::error::OutputError;

use crate::cli::{output, Cli};

/// Run project maintenance audits
#[derive(Debug, Args)]
pub struct MaintenanceCommand {
    /// Run every audit (the default when no audit is selected)
    #[arg(long)]
    pub all: bool,

    /// Run the cyclomatic complexity audit
    #[arg(long)]
    pub complexity: bool,

    /// Run the secret and dependency audit
    #[arg(long)]
    pub security: bool,

    /// Run the dead-code audit
    #[arg(long)]
    pub deadcode: bool,

    /// CCN threshold passed to the complexity scanner
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub ccn_threshold: Option<u32>,

    /// NLOC threshold passed to the complexity scanner
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub nloc_threshold: Option<u32>,

    /// Directories to scan for complexity
    #[arg(long = "target", value_name = "PATH", num_args = 1..)]
    pub targets: Vec<PathBuf>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Audits chosen on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Selection {
    complexity: bool,
    security: bool,
    deadcode: bool,
}

impl MaintenanceCommand {
    fn selection(&self) -> Selection {
        let none_selected = !self.complexity && !self.security && !self.deadcode;
        let all = self.all || none_selected;
        Selection {
            complexity: all || self.complexity,
            security: all || self.security,
            deadcode: all || self.deadcode,
        }
    }

    /// Command-line overrides on top of the configured audit settings
    fn audit_config(&self, config: &Config) -> AuditConfig {
        let mut audit = config.audit.clone();
        if let Some(ccn) = self.ccn_threshold {
            audit.ccn_threshold = ccn;
        }
        if let Some(nloc) = self.nloc_threshold {
            audit.nloc_threshold = nloc;
        }
        if !self.targets.is_empty() {
            audit.targets = self.targets.clone();
        }
        audit
    }

    /// Execute the maintenance command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let cwd = std::env::current_dir()?;
        self.run(&SystemRunner::new(), &cwd, cli.quiet)
    }

    /// Run the selected audits in `cwd` and emit the report
    fn run(&self, runner: &dyn ToolRunner, cwd: &Path, quiet: bool) -> anyhow::Result<()> {
        let selection = self.selection();
        info!(?selection, output = ?self.output, "executing maintenance command");

        let (config, _) = load_config_or_default(cwd);
        let audit = self.audit_config(&config);

        let report = run_audits(runner, cwd, &config, &audit, selection, quiet);
        let markdown = report.to_markdown();

        match &self.output {
            Some(path) => {
                let path = cwd.join(path);
                write_report(&path, &markdown)?;
                if !quiet {
                    output::success(&format!(
                        "Report written to {}",
                        output::path_style().apply_to(path.display())
                    ));
                }
            }
            None => print!("{}", markdown),
        }

        let status = report.status();
        let line = format!("Overall status: {}", status.badge());
        match status {
            OverallStatus::Pass => output::success(&line),
            OverallStatus::Warning | OverallStatus::Fail => output::warning(&line),
        }

        if !report.security.success() {
            anyhow::bail!("security audit failed");
        }
        Ok(())
    }
}

fn run_audits(
    runner: &dyn ToolRunner,
    root: &Path,
    config: &Config,
    audit: &AuditConfig,
    selection: Selection,
    quiet: bool,
) -> MaintenanceReport {
    let progress = |message: &str| {
        if !quiet {
            output::info(message);
        }
    };

    let complexity = if selection.complexity {
        progress("Running complexity audit...");
        let report = ComplexityAuditor::new(audit).audit(runner, root);
        if report.availability == Availability::Unavailable {
            output::warning(&format!(
                "{} not available; complexity audit skipped",
                audit.tools.complexity
            ));
        }
        report
    } else {
        ComplexityReport::not_requested()
    };

    let security = if selection.security {
        progress("Running security audit...");
        let report = SecurityAuditor::new(audit).audit(runner, root);
        if report.secrets == SecretScan::Skipped {
            output::warning(&format!(
                "{} not available; secrets were not checked",
                audit.tools.secrets
            ));
        }
        report
    } else {
        SecurityReport::not_requested()
    };

    let deadcode = if selection.deadcode {
        progress("Running dead-code audit...");
        let report = DeadCodeAuditor::new(audit).audit(runner, root);
        if report.availability == Availability::Unavailable {
            output::warning(&format!(
                "{} not installed; dead-code audit skipped",
                audit.tools.deadcode_package
            ));
        }
        report
    } else {
        DeadCodeReport::not_requested()
    };

    MaintenanceReport::new(project_name(config, root), complexity, security, deadcode)
        .with_package_manager(audit.tools.package_manager.clone())
}

/// Configured name, else the manifest name, else the directory name
fn project_name(config: &Config, root: &Path) -> String {
    if let Some(name) = &config.project {
        return name.clone();
    }
    if let Some(name) = PackageJson::load(&root.join("package.json"))
        .ok()
        .and_then(|manifest| manifest.name().map(str::to_string))
    {
        return name;
    }
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
}

fn write_report(path: &Path, markdown: &str) -> Result<(), OutputError> {
    let write_failed = |e: std::io::Error| OutputError::WriteFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_failed)?;
    }
    std::fs::write(path, markdown).map_err(write_failed)
}
