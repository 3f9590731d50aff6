//! Common utilities shared across CLI commands.

use std::path::PathBuf;

use tracing::debug;

use sonic_pkg::config::ConfigFile;
use sonic_pkg::descriptor::PackageDescriptor;
use sonic_pkg::manager::ManagerConfig;
use sonic_pkg::publisher::Repository;

use crate::error::CliError;

/// Load config or return default.
pub fn load_config() -> ConfigFile {
    match ConfigFile::load() {
        Ok(config) => config,
        Err(e) => {
            debug!("Config not loaded, using defaults: {}", e);
            ConfigFile::default()
        }
    }
}

/// Resolve the repository path from CLI args and config.
///
/// CLI takes precedence, then config.
pub fn require_repo_path(
    cli_repo: Option<PathBuf>,
    config: &ConfigFile,
) -> Result<PathBuf, CliError> {
    cli_repo
        .or_else(|| config.repository.path.clone())
        .ok_or_else(|| {
            CliError::Config(
                "No repository specified. Use --repo or run \
                 'sonic-pkg config set repository.path <path>'."
                    .to_string(),
            )
        })
}

/// Open the repository resolved from CLI args and config.
pub fn open_repository(
    cli_repo: Option<PathBuf>,
    config: &ConfigFile,
) -> Result<Repository, CliError> {
    let path = require_repo_path(cli_repo, config)?;
    Ok(Repository::open(path)?)
}

/// Build the manager configuration from CLI overrides and config.
pub fn resolve_manager_config(
    cli_prefix: Option<PathBuf>,
    no_verify: bool,
    config: &ConfigFile,
) -> ManagerConfig {
    let mut manager = config.manager_config();
    if let Some(prefix) = cli_prefix {
        manager.prefix = prefix;
    }
    if no_verify {
        manager = manager.with_verify_checksums(false);
    }
    manager
}

/// Print a package descriptor's fields, one per line.
pub fn print_descriptor(descriptor: &PackageDescriptor) {
    println!("{} {}", descriptor.name, descriptor.version);

    if let Some(ref description) = descriptor.description {
        println!("  description: {}", description);
    }
    if let Some(ref license) = descriptor.license {
        println!("  license:     {}", license);
    }
    if let Some(ref author) = descriptor.author {
        match descriptor.author_email {
            Some(ref email) => println!("  author:      {} <{}>", author, email),
            None => println!("  author:      {}", author),
        }
    }
    if let Some(ref maintainer) = descriptor.maintainer {
        match descriptor.maintainer_email {
            Some(ref email) => println!("  maintainer:  {} <{}>", maintainer, email),
            None => println!("  maintainer:  {}", maintainer),
        }
    }
    if let Some(ref url) = descriptor.url {
        println!("  url:         {}", url);
    }
    if let Some(ref keywords) = descriptor.keywords {
        println!("  keywords:    {}", keywords);
    }

    if !descriptor.scripts.is_empty() {
        println!("  scripts:");
        for script in &descriptor.scripts {
            println!("    {}", script);
        }
    }

    if !descriptor.classifiers.is_empty() {
        println!("  classifiers:");
        for classifier in &descriptor.classifiers {
            println!("    {}", classifier.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_repo_path_cli_wins() {
        let mut config = ConfigFile::default();
        config.repository.path = Some(PathBuf::from("/from/config"));

        let path = require_repo_path(Some(PathBuf::from("/from/cli")), &config).unwrap();
        assert_eq!(path, PathBuf::from("/from/cli"));

        let path = require_repo_path(None, &config).unwrap();
        assert_eq!(path, PathBuf::from("/from/config"));
    }

    #[test]
    fn test_require_repo_path_unconfigured() {
        let result = require_repo_path(None, &ConfigFile::default());
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_resolve_manager_config_overrides() {
        let config = ConfigFile::default();

        let manager = resolve_manager_config(Some(PathBuf::from("/opt/sonic")), true, &config);
        assert_eq!(manager.prefix, PathBuf::from("/opt/sonic"));
        assert!(!manager.verify_checksums);

        let manager = resolve_manager_config(None, false, &config);
        assert_eq!(manager.prefix, config.install.prefix);
        assert!(manager.verify_checksums);
    }
}
