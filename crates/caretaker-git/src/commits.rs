//! Commit history operations

use chrono::{TimeZone, Utc};
use git2::Sort;
use tracing::{debug, info, instrument};

use caretaker_core::error::GitError;

use crate::repository::{GitRepo, Result};
use crate::types::CommitInfo;

impl GitRepo {
    /// Get the commits reachable from `to` (default `HEAD`) but not from `from`,
    /// newest first.
    #[instrument(skip(self))]
    pub fn commits_in_range(&self, from: &str, to: Option<&str>) -> Result<Vec<CommitInfo>> {
        let to = to.unwrap_or("HEAD");
        let range = format!("{}..{}", from, to);
        info!(range = %range, "reading commit range");

        let from_commit = self.resolve_commit(from)?;
        let to_commit = self.resolve_commit(to)?;

        let invalid = |e: git2::Error| GitError::InvalidRange {
            range: range.clone(),
            reason: e.message().to_string(),
        };

        let mut revwalk = self.repo.revwalk().map_err(invalid)?;
        revwalk
            .set_sorting(Sort::TOPOLOGICAL | Sort::TIME)
            .map_err(invalid)?;
        revwalk.push(to_commit.id()).map_err(invalid)?;
        revwalk.hide(from_commit.id()).map_err(invalid)?;

        let mut commits = Vec::new();

        for oid in revwalk {
            let oid = oid.map_err(invalid)?;
            let commit = self.repo.find_commit(oid)?;
            commits.push(commit_to_info(&commit));
        }

        debug!(range = %range, count = commits.len(), "commit range read");
        Ok(commits)
    }
}

/// Convert a git2 Commit to CommitInfo
fn commit_to_info(commit: &git2::Commit<'_>) -> CommitInfo {
    let hash = commit.id().to_string();
    let author = commit.author();

    let message = String::from_utf8_lossy(commit.message_bytes());

    let timestamp = Utc
        .timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now);

    CommitInfo::new(
        hash,
        message,
        author.name().unwrap_or("Unknown"),
        author.email().unwrap_or("unknown@example.com"),
        timestamp,
    )
}
