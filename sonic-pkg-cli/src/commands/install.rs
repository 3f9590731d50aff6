//! Install command - install a published package.

use std::path::PathBuf;

use sonic_pkg::descriptor::PackageVersion;
use sonic_pkg::manager::{InstallProgressCallback, InstallStage, PackageInstaller};

use crate::commands::common::{load_config, open_repository, resolve_manager_config};
use crate::error::CliError;

/// Run the install command.
pub fn run(
    name: String,
    version: Option<String>,
    repo: Option<PathBuf>,
    prefix: Option<PathBuf>,
    no_verify: bool,
) -> Result<(), CliError> {
    let config = load_config();
    let repo = open_repository(repo, &config)?;

    let wanted = version
        .map(|v| {
            PackageVersion::parse(&v)
                .map_err(|e| CliError::Config(format!("invalid version '{}': {}", v, e)))
        })
        .transpose()?;

    let manager_config = resolve_manager_config(prefix, no_verify, &config);
    let installer = PackageInstaller::new(manager_config);

    let on_progress: InstallProgressCallback = Box::new(|stage, progress, message| {
        if progress >= 1.0 && stage != InstallStage::Complete {
            println!("  {}", message);
        }
    });

    let result = installer.install(&repo, &name, wanted.as_ref(), Some(on_progress))?;

    println!();
    match result.upgraded_from {
        Some(ref old) => println!(
            "Upgraded {} {} -> {}",
            result.name, old, result.version
        ),
        None => println!("Installed {} {}", result.name, result.version),
    }
    for script in &result.scripts {
        println!("  {}", result.install_path.join(script).display());
    }
    Ok(())
}
