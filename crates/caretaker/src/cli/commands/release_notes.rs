//! Release notes command

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

use caretaker_adapters::update_version;
use caretaker_changelog::{Category, ReleaseNotesGenerator};
use caretaker_core::config::load_config_or_default;
use caretaker_core::error::OutputError;
use caretaker_git::GitRepo;

use crate::cli::{output, Cli};

/// Generate release notes from a commit range
#[derive(Debug, Args)]
pub struct ReleaseNotesCommand {
    /// Start of the range (exclusive), usually the previous release tag
    #[arg(long, value_name = "REF")]
    pub from: String,

    /// End of the range (inclusive); defaults to HEAD
    #[arg(long, value_name = "REF")]
    pub to: Option<String>,

    /// Version for the heading (defaults to --to)
    #[arg(long = "version", value_name = "VERSION")]
    pub release_version: Option<String>,

    /// Output file (defaults to the configured release notes file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write the version into package.json
    #[arg(long)]
    pub update_package_json: bool,
}

impl ReleaseNotesCommand {
    /// Version for the heading: explicit `--version`, else `--to`
    fn version(&self) -> anyhow::Result<&str> {
        self.release_version
            .as_deref()
            .or(self.to.as_deref())
            .context("--version or --to is required")
    }

    /// Execute the release notes command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let cwd = std::env::current_dir()?;
        self.run(&cwd, cli.quiet)
    }

    /// Generate release notes for the repository containing `cwd`
    fn run(&self, cwd: &Path, quiet: bool) -> anyhow::Result<()> {
        info!(
            from = %self.from,
            to = ?self.to,
            version = ?self.release_version,
            update_package_json = self.update_package_json,
            "executing release-notes command"
        );
        let version = self.version()?;
        let (config, _) = load_config_or_default(cwd);

        let range_end = self.to.as_deref().unwrap_or("HEAD");
        if !quiet {
            eprintln!(
                "{} {}",
                output::header("Generating release notes for"),
                output::version_style().apply_to(version)
            );
            eprintln!(
                "{}",
                output::key_value("range", &format!("{}..{}", self.from, range_end))
            );
        }

        let repo = GitRepo::discover(cwd)?;
        let commits = repo.commits_in_range(&self.from, self.to.as_deref())?;

        if commits.is_empty() {
            output::warning(&format!(
                "No commits found between {} and {}; nothing written.",
                self.from, range_end
            ));
            return Ok(());
        }

        let generator = ReleaseNotesGenerator::new();
        let grouped = generator.categorize(&commits);

        if !quiet {
            output::info(&format!("Found {} commits", commits.len()));
            for category in Category::ALL {
                eprintln!(
                    "{}",
                    output::key_value(category.title(), &grouped.get(category).len().to_string())
                );
            }
        }

        let notes = generator.render(version, grouped, None);

        let output_path = match &self.output {
            Some(path) => cwd.join(path),
            None => cwd.join(&config.release_notes.output),
        };
        std::fs::write(&output_path, &notes).map_err(|e| OutputError::WriteFailed {
            path: output_path.clone(),
            reason: e.to_string(),
        })?;

        if !quiet {
            output::success(&format!(
                "Release notes written to {}",
                output::path_style().apply_to(output_path.display())
            ));
        }

        if self.update_package_json {
            let manifest_path = cwd.join(&config.release_notes.manifest);
            match update_version(&manifest_path, version) {
                Ok(update) => {
                    if !quiet {
                        output::success(&format!(
                            "{}: {} → {}",
                            manifest_path.display(),
                            update.old.as_deref().unwrap_or("unknown"),
                            update.new
                        ));
                    }
                }
                Err(e) => {
                    warn!(error = %e, "manifest version update failed");
                    output::warning(&format!("Could not update {}: {}", manifest_path.display(), e));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Commands;
    use caretaker_core::error::GitError;
    use clap::Parser;
    use git2::{Repository, Signature};
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> ReleaseNotesCommand {
        let mut argv = vec!["caretaker", "release-notes"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::ReleaseNotes(cmd) => cmd,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    fn commit(repo: &Repository, message: &str) -> git2::Oid {
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    /// Repository with a `v1.1.0` tag followed by two commits
    fn setup_repo() -> TempDir {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let base = commit(&repo, "chore: initial commit");
        let object = repo.find_object(base, None).unwrap();
        repo.tag_lightweight("v1.1.0", &object, false).unwrap();
        commit(&repo, "feat(ui): add button");
        commit(&repo, "fix: null check");

        temp
    }

    #[test]
    fn test_parse_full() {
        let cmd = parse(&[
            "--from",
            "v1.1.0",
            "--to",
            "v1.2.0",
            "--version",
            "1.2.0",
            "--output",
            "notes.md",
            "--update-package-json",
        ]);

        assert_eq!(cmd.from, "v1.1.0");
        assert_eq!(cmd.to.as_deref(), Some("v1.2.0"));
        assert_eq!(cmd.release_version.as_deref(), Some("1.2.0"));
        assert_eq!(cmd.output, Some(PathBuf::from("notes.md")));
        assert!(cmd.update_package_json);
        assert_eq!(cmd.version().unwrap(), "1.2.0");
    }

    #[test]
    fn test_version_defaults_to_to() {
        let cmd = parse(&["--from", "v1.1.0", "--to", "v1.2.0"]);
        assert_eq!(cmd.version().unwrap(), "v1.2.0");
    }

    #[test]
    fn test_version_required() {
        let cmd = parse(&["--from", "v1.1.0"]);
        let err = cmd.version().unwrap_err();
        assert_eq!(err.to_string(), "--version or --to is required");
    }

    #[test]
    fn test_from_is_required() {
        assert!(Cli::try_parse_from(["caretaker", "release-notes", "--to", "v1.2.0"]).is_err());
    }

    #[test]
    fn test_writes_notes_and_updates_manifest() {
        let temp = setup_repo();
        std::fs::write(
            temp.path().join("package.json"),
            "{\n  \"name\": \"app\",\n  \"version\": \"1.1.0\"\n}\n",
        )
        .unwrap();
        let cmd = parse(&[
            "--from",
            "v1.1.0",
            "--version",
            "v1.2.0",
            "--output",
            "NOTES.md",
            "--update-package-json",
        ]);

        cmd.run(temp.path(), true).unwrap();

        let notes = std::fs::read_to_string(temp.path().join("NOTES.md")).unwrap();
        assert!(notes.starts_with("# v1.2.0 ("));
        assert!(notes.contains("add button"));
        assert!(notes.contains("null check"));

        let manifest = std::fs::read_to_string(temp.path().join("package.json")).unwrap();
        assert!(manifest.contains("\"version\": \"1.2.0\""));
    }

    #[test]
    fn test_missing_manifest_is_only_a_warning() {
        let temp = setup_repo();
        let cmd = parse(&["--from", "v1.1.0", "--to", "HEAD", "--update-package-json"]);

        cmd.run(temp.path(), true).unwrap();
        assert!(!temp.path().join("package.json").exists());
    }

    #[test]
    fn test_empty_range_writes_nothing() {
        let temp = setup_repo();
        let cmd = parse(&["--from", "HEAD", "--version", "1.2.0", "--output", "NOTES.md"]);

        cmd.run(temp.path(), true).unwrap();
        assert!(!temp.path().join("NOTES.md").exists());
    }

    #[test]
    fn test_unknown_from_is_error() {
        let temp = setup_repo();
        let cmd = parse(&["--from", "v9.9.9", "--version", "1.2.0", "--output", "NOTES.md"]);

        let err = cmd.run(temp.path(), true).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GitError>(),
            Some(GitError::ReferenceNotFound { .. })
        ));
        assert!(!temp.path().join("NOTES.md").exists());
    }

    #[test]
    fn test_output_in_missing_directory_is_error() {
        let temp = setup_repo();
        let cmd = parse(&[
            "--from",
            "v1.1.0",
            "--version",
            "1.2.0",
            "--output",
            "missing/dir/NOTES.md",
        ]);

        let err = cmd.run(temp.path(), true).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OutputError>(),
            Some(OutputError::WriteFailed { .. })
        ));
    }
}
