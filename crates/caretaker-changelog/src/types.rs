//! Release notes types

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

/// Conventional commit type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitType {
    /// New feature
    Feat,
    /// Bug fix
    Fix,
    /// Refactoring
    Refactor,
    /// Documentation
    Docs,
    /// Code style (formatting, etc.)
    Style,
    /// Performance improvement
    Perf,
    /// Tests
    Test,
    /// Chores (maintenance)
    Chore,
    /// CI configuration
    Ci,
    /// Reverting changes
    Revert,
    /// Build system
    Build,
    /// Header did not follow the conventional format
    Other,
}

impl CommitType {
    /// Lowercase keyword for this type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Refactor => "refactor",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Perf => "perf",
            Self::Test => "test",
            Self::Chore => "chore",
            Self::Ci => "ci",
            Self::Revert => "revert",
            Self::Build => "build",
            Self::Other => "other",
        }
    }

    /// Release notes category this type is listed under
    pub fn category(&self) -> Category {
        match self {
            Self::Feat => Category::Added,
            Self::Fix => Category::Fixed,
            Self::Other => Category::Other,
            _ => Category::Changed,
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommitType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feat" => Ok(Self::Feat),
            "fix" => Ok(Self::Fix),
            "refactor" => Ok(Self::Refactor),
            "docs" => Ok(Self::Docs),
            "style" => Ok(Self::Style),
            "perf" => Ok(Self::Perf),
            "test" => Ok(Self::Test),
            "chore" => Ok(Self::Chore),
            "ci" => Ok(Self::Ci),
            "revert" => Ok(Self::Revert),
            "build" => Ok(Self::Build),
            _ => Err(()),
        }
    }
}

/// Release notes section. Variant order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Added,
    Fixed,
    Changed,
    Other,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 4] = [
        Category::Added,
        Category::Fixed,
        Category::Changed,
        Category::Other,
    ];

    /// Section heading
    pub fn title(&self) -> &'static str {
        match self {
            Self::Added => "Added",
            Self::Fixed => "Fixed",
            Self::Changed => "Changed",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A commit after header parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    /// Commit type, `Other` for non-conventional headers
    pub commit_type: CommitType,
    /// Scope (optional, in parentheses)
    pub scope: Option<String>,
    /// Description, or the raw first line for `Other`
    pub description: String,
    /// Short commit hash
    pub hash: String,
    /// Full commit message
    pub full_message: String,
}

impl ParsedCommit {
    /// Category this commit is listed under
    pub fn category(&self) -> Category {
        self.commit_type.category()
    }
}

/// Commits grouped by category, input order preserved inside each group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorizedCommits {
    groups: BTreeMap<Category, Vec<ParsedCommit>>,
}

impl CategorizedCommits {
    /// Create an empty grouping
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a commit to its category
    pub fn push(&mut self, commit: ParsedCommit) {
        self.groups.entry(commit.category()).or_default().push(commit);
    }

    /// Commits in one category
    pub fn get(&self, category: Category) -> &[ParsedCommit] {
        self.groups.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Non-empty categories in display order
    pub fn sections(&self) -> impl Iterator<Item = (Category, &[ParsedCommit])> {
        self.groups
            .iter()
            .filter(|(_, commits)| !commits.is_empty())
            .map(|(category, commits)| (*category, commits.as_slice()))
    }

    /// Total number of commits
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Check if there are no commits at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Release notes for one version
#[derive(Debug, Clone)]
pub struct ReleaseNotes {
    /// Version without the `v` prefix
    pub version: String,
    /// Release date
    pub date: NaiveDate,
    /// Categorized commits
    pub commits: CategorizedCommits,
}

impl ReleaseNotes {
    /// Create release notes; leading `v` characters are stripped from the version
    pub fn new(version: &str, date: NaiveDate, commits: CategorizedCommits) -> Self {
        Self {
            version: version.trim_start_matches('v').to_string(),
            date,
            commits,
        }
    }
}
