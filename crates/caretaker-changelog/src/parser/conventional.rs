//! Conventional Commits parser
//!
//! Recognizes headers of the form `type[(scope)]: description` where `type`
//! is one of the eleven keywords below, matched case-insensitively.

use regex::Regex;
use std::sync::LazyLock;

use super::{CommitHeader, CommitParser};
use crate::types::CommitType;

/// Regex for parsing conventional commit headers
static CONVENTIONAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?P<type>feat|fix|refactor|docs|style|perf|test|chore|ci|revert|build)(?:\((?P<scope>[^)]+)\))?:\s*(?P<description>.+)",
    )
    .expect("Invalid regex")
});

/// Parser for Conventional Commits headers
#[derive(Debug, Default)]
pub struct ConventionalParser;

impl ConventionalParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }
}

impl CommitParser for ConventionalParser {
    fn parse_header(&self, line: &str) -> Option<CommitHeader> {
        let caps = CONVENTIONAL_REGEX.captures(line)?;

        let commit_type = caps.name("type")?.as_str().parse::<CommitType>().ok()?;
        let scope = caps.name("scope").map(|m| m.as_str().to_string());
        let description = caps.name("description")?.as_str().trim().to_string();

        Some(CommitHeader {
            commit_type,
            scope,
            description,
        })
    }
}
