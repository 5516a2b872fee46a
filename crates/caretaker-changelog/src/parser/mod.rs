//! Commit parsing

mod conventional;

pub use conventional::ConventionalParser;

use crate::types::{CommitType, ParsedCommit};
use caretaker_git::CommitInfo;

/// Structured form of a conventional commit header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitHeader {
    /// Commit type
    pub commit_type: CommitType,
    /// Scope (optional, in parentheses)
    pub scope: Option<String>,
    /// Trimmed description
    pub description: String,
}

/// Trait for commit parsers
pub trait CommitParser: Send + Sync {
    /// Parse a single header line; `None` means the line is not conventional
    fn parse_header(&self, line: &str) -> Option<CommitHeader>;

    /// Parse a commit. Never fails: unparsed headers become `CommitType::Other`
    /// with the raw first line as description.
    fn parse(&self, commit: &CommitInfo) -> ParsedCommit {
        let full_message = commit.full_message.clone();
        match self.parse_header(&commit.message) {
            Some(header) => ParsedCommit {
                commit_type: header.commit_type,
                scope: header.scope,
                description: header.description,
                hash: commit.short_hash.clone(),
                full_message,
            },
            None => ParsedCommit {
                commit_type: CommitType::Other,
                scope: None,
                description: commit.message.clone(),
                hash: commit.short_hash.clone(),
                full_message,
            },
        }
    }
}
