//! Init command - initialize a package repository.

use std::path::PathBuf;

use sonic_pkg::publisher::Repository;

use super::common::load_config;
use crate::error::CliError;

/// Run the init command.
pub fn run(path: PathBuf, publisher: String) -> Result<(), CliError> {
    let repo = Repository::init(&path, &publisher)?;

    println!("Initialized package repository: {}", repo.root().display());
    println!("  packages/   package sources");
    println!("  dist/       built artifacts");
    println!("  index.toml  package index (publisher: {})", publisher);

    // Remember the repository as the default if none is configured yet
    let mut config = load_config();
    if config.repository.path.is_none() {
        config.repository.path = Some(repo.root().to_path_buf());
        config.save()?;
        println!();
        println!(
            "Set repository.path = {} in {}",
            repo.root().display(),
            sonic_pkg::config::config_file_path().display()
        );
    }

    println!();
    println!("Author a package under packages/<name>/ with a package.toml");
    println!("manifest, then run 'sonic-pkg publish <name>'.");
    Ok(())
}
