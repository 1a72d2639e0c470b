//! Policy loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::PolicyConfig;
use crate::config::validation::{validate_policy, ValidationError};

/// Error type for policy loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate a policy from TOML text.
pub fn parse_policy(content: &str) -> Result<PolicyConfig, ConfigError> {
    let config: PolicyConfig = toml::from_str(content)?;
    validate_policy(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate a policy from a TOML file.
pub fn load_policy(path: &Path) -> Result<PolicyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_policy(&content)?;

    tracing::debug!(
        path = %path.display(),
        sites = config.sites.len(),
        "Policy loaded"
    );
    Ok(config)
}
