//! Caretaker Git - commit history access
//!
//! This crate reads the commits between two references for release notes
//! generation.

mod commits;
mod repository;
pub mod types;

pub use repository::{GitRepo, Result};
pub use types::CommitInfo;
