//! Git types

use chrono::{DateTime, Utc};

/// Information about a git commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// Commit hash (full)
    pub hash: String,
    /// Short hash (first 7 characters)
    pub short_hash: String,
    /// First line of the trimmed message
    pub message: String,
    /// Trimmed raw message
    pub full_message: String,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
}

impl CommitInfo {
    /// Create a new CommitInfo from the raw commit message
    pub fn new(
        hash: impl Into<String>,
        raw_message: impl AsRef<str>,
        author: impl Into<String>,
        author_email: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let hash = hash.into();
        let short_hash = hash.chars().take(7).collect();

        let full_message = raw_message.as_ref().trim().to_string();
        let message = full_message.lines().next().unwrap_or_default().trim_end().to_string();

        Self {
            hash,
            short_hash,
            message,
            full_message,
            author: author.into(),
            author_email: author_email.into(),
            timestamp,
        }
    }
}
