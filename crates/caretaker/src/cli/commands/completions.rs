//! Shell completions command

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use tracing::info;

use caretaker_core::error::OutputError;

use crate::cli::{output, Cli};

const BIN_NAME: &str = "caretaker";

/// Generate shell completions
#[derive(Debug, Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Write the completion script for `shell` into `out`
fn write_completions(shell: Shell, out: &mut dyn Write) {
    generate(shell, &mut Cli::command(), BIN_NAME, out);
}

impl CompletionsCommand {
    /// Execute the completions command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(shell = %self.shell, "executing completions command");

        let Some(path) = &self.output else {
            write_completions(self.shell, &mut io::stdout());
            return Ok(());
        };

        let mut file = std::fs::File::create(path).map_err(|e| OutputError::WriteFailed {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        write_completions(self.shell, &mut file);

        if !cli.quiet {
            output::success(&format!(
                "Completions written to {}",
                output::path_style().apply_to(path.display())
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Commands;
    use clap::Parser;

    #[test]
    fn test_parse_shell() {
        let cli = Cli::try_parse_from(["caretaker", "completions", "zsh", "-o", "_caretaker"])
            .unwrap();
        let Commands::Completions(cmd) = cli.command else {
            panic!("expected completions command");
        };
        assert_eq!(cmd.shell, Shell::Zsh);
        assert_eq!(cmd.output, Some(PathBuf::from("_caretaker")));
    }

    #[test]
    fn test_unknown_shell_rejected() {
        assert!(Cli::try_parse_from(["caretaker", "completions", "tcsh"]).is_err());
    }

    #[test]
    fn test_bash_script_mentions_subcommands() {
        let mut buf = Vec::new();
        write_completions(Shell::Bash, &mut buf);
        let script = String::from_utf8(buf).unwrap();

        assert!(script.contains(BIN_NAME));
        assert!(script.contains("release-notes"));
        assert!(script.contains("maintenance"));
    }
}
