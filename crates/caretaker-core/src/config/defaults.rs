//! Default configuration values

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "caretaker.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "caretaker.yaml";

/// Default release notes output file
pub const DEFAULT_RELEASE_NOTES_FILE: &str = "RELEASE_NOTES.md";

/// Default project manifest
pub const DEFAULT_MANIFEST_FILE: &str = "package.json";

/// Default cyclomatic complexity threshold
pub const DEFAULT_CCN_THRESHOLD: u32 = 15;

/// Default NLOC threshold
pub const DEFAULT_NLOC_THRESHOLD: u32 = 50;

/// Directories scanned for complexity when none are configured
pub const DEFAULT_TARGETS: &[&str] = &["app", "components", "hooks", "lib", "types", "scripts"];

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".caretaker.toml",
        ".caretaker.yaml",
    ]
}
