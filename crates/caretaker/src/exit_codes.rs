//! Exit codes for the CLI

/// Success
pub const SUCCESS: i32 = 0;

/// Any fatal error, including a failed security audit
pub const ERROR: i32 = 1;
