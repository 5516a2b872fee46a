//! Shared audit types

/// Whether an audit actually produced data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    /// The tool ran and its output was parsed
    Ran,
    /// The tool is not installed or could not be started
    Unavailable,
    /// The audit was not selected for this run
    #[default]
    NotRequested,
}

impl Availability {
    /// Whether results are present
    pub fn ran(&self) -> bool {
        matches!(self, Self::Ran)
    }
}

/// Result of scraping one line of tool output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome<T> {
    /// The line matched the expected grammar
    Finding(T),
    /// The line is noise or in an unexpected format; callers drop it
    Unrecognized,
}

impl<T> LineOutcome<T> {
    /// Convert into an `Option`, dropping unrecognized lines
    pub fn finding(self) -> Option<T> {
        match self {
            Self::Finding(item) => Some(item),
            Self::Unrecognized => None,
        }
    }
}
