//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_thresholds(config)?;
    validate_targets(config)?;
    validate_tools(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_thresholds(config: &Config) -> Result<()> {
    if config.audit.ccn_threshold == 0 {
        return Err(ConfigError::InvalidValue {
            field: "audit.ccn_threshold".to_string(),
            message: "must be greater than zero".to_string(),
        }
        .into());
    }

    if config.audit.nloc_threshold == 0 {
        return Err(ConfigError::InvalidValue {
            field: "audit.nloc_threshold".to_string(),
            message: "must be greater than zero".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_targets(config: &Config) -> Result<()> {
    if config.audit.targets.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "audit.targets".to_string(),
            message: "at least one target directory is required".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_tools(config: &Config) -> Result<()> {
    let tools = &config.audit.tools;
    let named = [
        ("audit.tools.complexity", &tools.complexity),
        ("audit.tools.secrets", &tools.secrets),
        ("audit.tools.package_manager", &tools.package_manager),
        ("audit.tools.deadcode_package", &tools.deadcode_package),
        ("audit.tools.deadcode_script", &tools.deadcode_script),
    ];

    for (field, value) in named {
        if value.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                message: "cannot be empty".to_string(),
            }
            .into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_zero_threshold() {
        let mut config = Config::default();
        config.audit.nloc_threshold = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_empty_targets() {
        let mut config = Config::default();
        config.audit.targets.clear();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_blank_tool() {
        let mut config = Config::default();
        config.audit.tools.secrets = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }
}
