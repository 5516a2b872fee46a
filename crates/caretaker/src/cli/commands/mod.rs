//! CLI commands

mod completions;
mod maintenance;
mod release_notes;

pub use completions::CompletionsCommand;
pub use maintenance::MaintenanceCommand;
pub use release_notes::ReleaseNotesCommand;
