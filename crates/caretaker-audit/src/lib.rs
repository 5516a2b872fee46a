//! Caretaker Audit - project maintenance audits
//!
//! Runs external scanners through a [`ToolRunner`], scrapes their output
//! into typed reports and aggregates them into a [`MaintenanceReport`].
//! A missing scanner never fails an audit; it is recorded in the report.

pub mod complexity;
pub mod deadcode;
pub mod report;
pub mod runner;
pub mod security;
pub mod types;

pub use complexity::{ComplexityAuditor, ComplexityFinding, ComplexityReport, Severity};
pub use deadcode::{DeadCodeAuditor, DeadCodeReport};
pub use report::{Action, MaintenanceReport, OverallStatus, Priority};
pub use runner::{SystemRunner, ToolOutput, ToolRunner};
pub use security::{
    DependencyAudit, DependencyStatus, SecretScan, SecurityAuditor, SecurityReport,
    VulnerabilityCounts,
};
pub use types::{Availability, LineOutcome};
