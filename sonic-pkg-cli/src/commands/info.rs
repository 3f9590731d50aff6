//! Info command - show everything known about one package.

use std::path::PathBuf;

use sonic_pkg::descriptor::{read_manifest_file, MANIFEST_FILENAME};
use sonic_pkg::manager::PackageInstaller;
use sonic_pkg::publisher::{get_release_status, IndexManager, ReleaseStatus};

use crate::commands::common::{load_config, open_repository, print_descriptor, resolve_manager_config};
use crate::error::CliError;

/// Run the info command.
pub fn run(name: String, repo: Option<PathBuf>, prefix: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config();
    let repo = open_repository(repo, &config)?;

    // Authored source, if present in the repository
    if repo.package_exists(&name) {
        let manifest_path = repo.package_dir(&name).join(MANIFEST_FILENAME);
        let descriptor = read_manifest_file(&manifest_path)?;
        print_descriptor(&descriptor);

        let status = match get_release_status(&repo, &name) {
            ReleaseStatus::NotBuilt => "not built".to_string(),
            ReleaseStatus::Built { artifact_name } => format!("built ({})", artifact_name),
            ReleaseStatus::Published => "published".to_string(),
        };
        println!("  status:      {}", status);
    } else {
        println!("{} (no authored source in this repository)", name);
    }

    // Published releases
    let index = IndexManager::open(repo.root())?;
    let versions = index.index().versions(&name);
    println!();
    if versions.is_empty() {
        println!("No published releases.");
    } else {
        let rendered: Vec<String> = versions.iter().map(|v| v.to_string()).collect();
        println!("Published versions: {}", rendered.join(", "));
        if let Some(latest) = index.latest(&name) {
            println!("Latest: {} ({})", latest.version, latest.artifact);
        }
    }

    // Installed state
    let manager_config = resolve_manager_config(prefix, false, &config);
    let installer = PackageInstaller::new(manager_config);
    match installer.list_installed()?.iter().find(|r| r.name == name) {
        Some(record) => println!(
            "Installed: {} (scripts: {})",
            record.version,
            record.scripts.join(", ")
        ),
        None => println!("Installed: no"),
    }

    Ok(())
}
