//! Release notes formatters

mod markdown;

pub use markdown::MarkdownFormatter;

use crate::types::ReleaseNotes;

/// Trait for release notes formatters
pub trait ReleaseNotesFormatter: Send + Sync {
    /// Format release notes to string
    fn format(&self, notes: &ReleaseNotes) -> String;
}
