//! Caretaker Changelog - release notes generation
//!
//! This crate provides conventional commit parsing, categorization and
//! Markdown release notes rendering.

pub mod formatter;
pub mod generator;
pub mod parser;
pub mod types;

pub use generator::ReleaseNotesGenerator;
pub use parser::{CommitHeader, CommitParser, ConventionalParser};
pub use types::{CategorizedCommits, Category, CommitType, ParsedCommit, ReleaseNotes};
