//! Validate command - check a package source directory.

use std::path::PathBuf;

use sonic_pkg::descriptor::{read_manifest_file, MANIFEST_FILENAME};

use crate::commands::common::print_descriptor;
use crate::error::CliError;

/// Run the validate command.
///
/// Parses the manifest in the source directory, reports every field and
/// checks that each declared script file exists.
pub fn run(source_dir: PathBuf) -> Result<(), CliError> {
    let manifest_path = source_dir.join(MANIFEST_FILENAME);
    let descriptor = read_manifest_file(&manifest_path)?;

    println!("Manifest: {}", manifest_path.display());
    println!();
    print_descriptor(&descriptor);
    println!();

    let missing: Vec<&str> = descriptor
        .scripts
        .iter()
        .filter(|script| !source_dir.join(script).is_file())
        .map(|script| script.as_str())
        .collect();

    if !missing.is_empty() {
        return Err(CliError::Validation(format!(
            "declared scripts not found in {}: {}",
            source_dir.display(),
            missing.join(", ")
        )));
    }

    if descriptor.scripts.is_empty() {
        println!("Note: no scripts declared; the package cannot be built.");
    } else {
        println!("All declared scripts present.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_source(temp: &TempDir, manifest: &str) -> PathBuf {
        let dir = temp.path().join("sonic-chassisd");
        fs::create_dir_all(dir.join("scripts")).unwrap();
        fs::write(dir.join(MANIFEST_FILENAME), manifest).unwrap();
        dir
    }

    #[test]
    fn test_validate_complete_source() {
        let temp = TempDir::new().unwrap();
        let dir = write_source(
            &temp,
            "[package]\nname = \"sonic-chassisd\"\nversion = \"1.0\"\nscripts = [\"scripts/chassisd\"]\n",
        );
        fs::write(dir.join("scripts/chassisd"), "#!/bin/sh\n").unwrap();

        assert!(run(dir).is_ok());
    }

    #[test]
    fn test_validate_reports_missing_script() {
        let temp = TempDir::new().unwrap();
        let dir = write_source(
            &temp,
            "[package]\nname = \"sonic-chassisd\"\nversion = \"1.0\"\nscripts = [\"scripts/chassisd\"]\n",
        );

        let result = run(dir);
        assert!(matches!(result, Err(CliError::Validation(_))));
    }

    #[test]
    fn test_validate_missing_manifest() {
        let temp = TempDir::new().unwrap();
        let result = run(temp.path().to_path_buf());
        assert!(matches!(result, Err(CliError::Manifest(_))));
    }
}
