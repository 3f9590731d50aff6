//! Error types for the CLI.

use sonic_pkg::config::ConfigError;
use sonic_pkg::descriptor::ManifestError;
use sonic_pkg::manager::ManagerError;
use sonic_pkg::publisher::PublishError;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Configuration problem, including missing required settings.
    Config(String),

    /// A package source failed validation.
    Validation(String),

    /// A publisher operation failed.
    Publish(PublishError),

    /// A manager operation failed.
    Manager(ManagerError),

    /// A manifest could not be read or parsed.
    Manifest(ManifestError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "{}", msg),
            CliError::Validation(msg) => write!(f, "validation failed: {}", msg),
            CliError::Publish(err) => write!(f, "{}", err),
            CliError::Manager(err) => write!(f, "{}", err),
            CliError::Manifest(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Publish(err) => Some(err),
            CliError::Manager(err) => Some(err),
            CliError::Manifest(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PublishError> for CliError {
    fn from(err: PublishError) -> Self {
        CliError::Publish(err)
    }
}

impl From<ManagerError> for CliError {
    fn from(err: ManagerError) -> Self {
        CliError::Manager(err)
    }
}

impl From<ManifestError> for CliError {
    fn from(err: ManifestError) -> Self {
        CliError::Manifest(err)
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
