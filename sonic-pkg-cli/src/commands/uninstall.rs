//! Uninstall command - remove an installed package.

use std::path::PathBuf;

use sonic_pkg::manager::PackageInstaller;

use crate::commands::common::{load_config, resolve_manager_config};
use crate::error::CliError;

/// Run the uninstall command.
pub fn run(name: String, prefix: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config();
    let manager_config = resolve_manager_config(prefix, false, &config);
    let installer = PackageInstaller::new(manager_config);

    let result = installer.uninstall(&name)?;

    println!("Removed {} {}", result.name, result.version);
    for script in &result.removed_scripts {
        println!("  removed {}", script);
    }
    Ok(())
}
