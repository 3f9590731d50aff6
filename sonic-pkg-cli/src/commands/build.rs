//! Build command - build a package artifact.

use std::path::PathBuf;

use sonic_pkg::publisher::build_package;

use crate::commands::common::{load_config, open_repository};
use crate::error::CliError;

/// Run the build command.
pub fn run(name: String, repo: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config();
    let repo = open_repository(repo, &config)?;

    let result = build_package(&repo, &name)?;

    println!("Built {} {}", result.name, result.version);
    println!("  artifact: {}", result.artifact.path.display());
    println!("  checksum: {}", result.artifact.checksum);
    println!("  size:     {} bytes", result.artifact.size);
    Ok(())
}
