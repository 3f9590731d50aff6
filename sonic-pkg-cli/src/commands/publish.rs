//! Publish command - build and record a release.

use std::path::PathBuf;

use sonic_pkg::publisher::publish_package;

use crate::commands::common::{load_config, open_repository};
use crate::error::CliError;

/// Run the publish command.
pub fn run(name: String, repo: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config();
    let repo = open_repository(repo, &config)?;

    let outcome = publish_package(&repo, &name)?;

    println!("Published {} {}", outcome.name, outcome.version);
    println!("  artifact: {}", outcome.artifact_name);
    println!("  checksum: {}", outcome.checksum);
    println!("  index sequence: {}", outcome.sequence);
    println!();
    println!("This release is now immutable; ship changes by bumping the version.");
    Ok(())
}
