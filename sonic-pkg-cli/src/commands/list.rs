//! List command - list installed packages or the repository index.

use std::path::PathBuf;

use sonic_pkg::manager::PackageInstaller;
use sonic_pkg::publisher::IndexManager;

use crate::commands::common::{load_config, open_repository, resolve_manager_config};
use crate::error::CliError;

/// Run the list command.
///
/// Lists installed packages by default; `--available` lists every release
/// in the repository index instead.
pub fn run(
    available: bool,
    repo: Option<PathBuf>,
    prefix: Option<PathBuf>,
) -> Result<(), CliError> {
    if available {
        list_available(repo)
    } else {
        list_installed(prefix)
    }
}

/// List every release in the repository index.
fn list_available(repo: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config();
    let repo = open_repository(repo, &config)?;
    let index = IndexManager::open(repo.root())?;

    println!(
        "Package index: {} (publisher: {}, sequence: {})",
        index.index_path().display(),
        index.index().publisher,
        index.sequence()
    );
    println!();

    if index.entries().is_empty() {
        println!("No releases published.");
        return Ok(());
    }

    for entry in index.entries() {
        println!(
            "  {:<20} {:<10} {}",
            entry.name, entry.version, entry.artifact
        );
    }
    Ok(())
}

/// List installed packages.
fn list_installed(prefix: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config();
    let manager_config = resolve_manager_config(prefix, false, &config);
    let installer = PackageInstaller::new(manager_config);

    let records = installer.list_installed()?;

    println!("Installed packages ({})", installer.config().prefix.display());
    println!();

    if records.is_empty() {
        println!("No packages installed.");
        return Ok(());
    }

    for record in records {
        println!(
            "  {:<20} {:<10} scripts: {}",
            record.name,
            record.version,
            record.scripts.join(", ")
        );
    }
    Ok(())
}
