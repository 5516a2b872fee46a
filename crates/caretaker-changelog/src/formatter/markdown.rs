//! Markdown release notes formatter

use tracing::{debug, instrument};

use super::ReleaseNotesFormatter;
use crate::types::{ParsedCommit, ReleaseNotes};

/// Markdown release notes formatter
#[derive(Debug, Default)]
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self
    }
}

fn entry_line(commit: &ParsedCommit) -> String {
    match &commit.scope {
        Some(scope) => format!("- **{}**: {}", scope, commit.description),
        None => format!("- {}", commit.description),
    }
}

impl ReleaseNotesFormatter for MarkdownFormatter {
    #[instrument(skip(self, notes), fields(version = %notes.version, commit_count = notes.commits.len()))]
    fn format(&self, notes: &ReleaseNotes) -> String {
        let mut lines = vec![
            format!("# v{} ({})", notes.version, notes.date.format("%Y-%m-%d")),
            String::new(),
        ];

        for (category, commits) in notes.commits.sections() {
            lines.push(format!("## {}", category.title()));
            lines.push(String::new());
            lines.extend(commits.iter().map(entry_line));
            lines.push(String::new());
        }

        let output = lines.join("\n");
        debug!(output_len = output.len(), "markdown release notes formatted");
        output
    }
}
