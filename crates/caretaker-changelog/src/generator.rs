//! Release notes generation

use caretaker_git::CommitInfo;
use chrono::{Local, NaiveDate};
use tracing::{debug, instrument};

use crate::formatter::{MarkdownFormatter, ReleaseNotesFormatter};
use crate::parser::{CommitParser, ConventionalParser};
use crate::types::{CategorizedCommits, Category, ReleaseNotes};

/// Release notes generator
pub struct ReleaseNotesGenerator {
    parser: Box<dyn CommitParser>,
    formatter: Box<dyn ReleaseNotesFormatter>,
}

impl ReleaseNotesGenerator {
    /// Create a new generator with default parser and formatter
    pub fn new() -> Self {
        Self {
            parser: Box::new(ConventionalParser::new()),
            formatter: Box::new(MarkdownFormatter::new()),
        }
    }

    /// Use a custom parser
    pub fn with_parser<P: CommitParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Group commits into release notes categories
    #[instrument(skip(self, commits), fields(commit_count = commits.len()))]
    pub fn categorize(&self, commits: &[CommitInfo]) -> CategorizedCommits {
        let mut grouped = CategorizedCommits::new();
        for commit in commits {
            grouped.push(self.parser.parse(commit));
        }

        debug!(
            added = grouped.get(Category::Added).len(),
            fixed = grouped.get(Category::Fixed).len(),
            changed = grouped.get(Category::Changed).len(),
            other = grouped.get(Category::Other).len(),
            "commits categorized"
        );
        grouped
    }

    /// Render categorized commits; `date` defaults to today
    pub fn render(
        &self,
        version: &str,
        commits: CategorizedCommits,
        date: Option<NaiveDate>,
    ) -> String {
        let date = date.unwrap_or_else(|| Local::now().date_naive());
        let notes = ReleaseNotes::new(version, date, commits);
        self.formatter.format(&notes)
    }
}

impl Default for ReleaseNotesGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::CommitHeader;
    use crate::types::CommitType;
    use chrono::Utc;

    fn make_commit(hash: &str, message: &str) -> CommitInfo {
        CommitInfo::new(hash, message, "Test Author", "test@example.com", Utc::now())
    }

    fn example_commits() -> Vec<CommitInfo> {
        vec![
            make_commit("1111111aaaa", "feat(ui): add button"),
            make_commit("2222222bbbb", "weird message"),
            make_commit("3333333cccc", "fix: null check"),
        ]
    }

    #[test]
    fn test_categorize_example() {
        let grouped = ReleaseNotesGenerator::new().categorize(&example_commits());

        let added = grouped.get(Category::Added);
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].description, "add button");
        assert_eq!(added[0].scope.as_deref(), Some("ui"));
        assert_eq!(added[0].hash, "1111111");

        let fixed = grouped.get(Category::Fixed);
        assert_eq!(fixed.len(), 1);
        assert_eq!(fixed[0].description, "null check");

        let other = grouped.get(Category::Other);
        assert_eq!(other.len(), 1);
        assert_eq!(other[0].commit_type, CommitType::Other);
        assert_eq!(other[0].description, "weird message");

        assert!(grouped.get(Category::Changed).is_empty());
    }

    #[test]
    fn test_categorize_preserves_order_within_category() {
        let commits = vec![
            make_commit("a", "docs: one"),
            make_commit("b", "feat: x"),
            make_commit("c", "chore: two"),
            make_commit("d", "perf: three"),
        ];
        let grouped = ReleaseNotesGenerator::new().categorize(&commits);

        let changed: Vec<&str> = grouped
            .get(Category::Changed)
            .iter()
            .map(|c| c.description.as_str())
            .collect();
        assert_eq!(changed, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_render_section_order() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let generator = ReleaseNotesGenerator::new();
        let grouped = generator.categorize(&example_commits());
        let output = generator.render("v1.2.0", grouped, Some(date));

        assert!(output.starts_with("# v1.2.0 (2025-01-31)\n"));
        let added = output.find("## Added").unwrap();
        let fixed = output.find("## Fixed").unwrap();
        let other = output.find("## Other").unwrap();
        assert!(added < fixed && fixed < other);
        assert!(!output.contains("## Changed"));
    }

    #[test]
    fn test_render_defaults_to_today() {
        let output = ReleaseNotesGenerator::new().render("1.0.0", CategorizedCommits::new(), None);
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        assert!(output.contains(&today));
    }

    struct EverythingIsAFix;

    impl CommitParser for EverythingIsAFix {
        fn parse_header(&self, line: &str) -> Option<CommitHeader> {
            Some(CommitHeader {
                commit_type: CommitType::Fix,
                scope: None,
                description: line.to_string(),
            })
        }
    }

    #[test]
    fn test_custom_parser() {
        let generator = ReleaseNotesGenerator::new().with_parser(EverythingIsAFix);
        let grouped = generator.categorize(&example_commits());
        assert_eq!(grouped.get(Category::Fixed).len(), 3);
    }
}
