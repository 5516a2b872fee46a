//! Caretaker Core - shared error types and configuration
//!
//! This crate provides the error taxonomy and the configuration layer used by
//! the release notes and maintenance pipelines.

pub mod config;
pub mod error;

pub use error::{CaretakerError, Result};
