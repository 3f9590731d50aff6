//! Package manifest reading and writing.
//!
//! A package source directory declares its descriptor in a `package.toml`
//! manifest with a single `[package]` table:
//!
//! ```toml
//! [package]
//! name = "sonic-chassisd"
//! version = "1.0"
//! description = "Chassis daemon for SONiC"
//! scripts = ["scripts/chassisd"]
//! ```
//!
//! Parsing is strict in both directions. Unknown keys are rejected so typos
//! cannot silently drop metadata, and the semantic checks here (name shape,
//! script paths, URL scheme, install-name collisions) run on read and on
//! write so an invalid manifest can neither enter nor leave the system.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::core::PackageDescriptor;
use super::naming::{is_valid_package_name, is_valid_script_path, script_install_name};

/// Standard manifest filename inside a package source directory and at the
/// root of a built artifact.
pub const MANIFEST_FILENAME: &str = "package.toml";

/// Errors from reading, validating or serializing a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("failed to read manifest at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document is not valid TOML or fails field-level validation.
    #[error("invalid manifest: {0}")]
    Parse(#[from] toml::de::Error),

    /// The descriptor could not be serialized.
    #[error("failed to serialize manifest: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The package name contains characters that cannot appear in artifact
    /// filenames.
    #[error("invalid package name '{0}'")]
    InvalidName(String),

    /// A declared script path is absolute or traverses outside the package.
    #[error("invalid script path '{0}': scripts are package-relative paths")]
    InvalidScriptPath(String),

    /// Two declared scripts would install under the same name.
    #[error("scripts '{first}' and '{second}' both install as '{name}'")]
    ScriptNameCollision {
        first: String,
        second: String,
        name: String,
    },

    /// The project URL has an unsupported scheme.
    #[error("invalid url '{0}': expected http:// or https://")]
    InvalidUrl(String),
}

/// Top-level manifest document: exactly one `[package]` table.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    package: PackageDescriptor,
}

/// Check the semantic rules that serde's type checks cannot express.
///
/// # Errors
///
/// Returns the first violated rule: invalid name, invalid script path,
/// colliding install names or malformed URL.
pub fn validate_descriptor(descriptor: &PackageDescriptor) -> Result<(), ManifestError> {
    if !is_valid_package_name(&descriptor.name) {
        return Err(ManifestError::InvalidName(descriptor.name.clone()));
    }

    let mut install_names: HashMap<&str, &str> = HashMap::new();
    for script in &descriptor.scripts {
        if !is_valid_script_path(script) {
            return Err(ManifestError::InvalidScriptPath(script.clone()));
        }
        let name = script_install_name(script);
        if let Some(first) = install_names.insert(name, script) {
            return Err(ManifestError::ScriptNameCollision {
                first: first.to_string(),
                second: script.clone(),
                name: name.to_string(),
            });
        }
    }

    if let Some(url) = &descriptor.url {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ManifestError::InvalidUrl(url.clone()));
        }
    }

    Ok(())
}

/// Parse and validate a manifest document.
///
/// # Errors
///
/// Returns a [`ManifestError`] if the document is not valid TOML, contains
/// unknown keys, has a malformed version or classifier, or violates the
/// semantic rules checked by [`validate_descriptor`].
pub fn parse_manifest(document: &str) -> Result<PackageDescriptor, ManifestError> {
    let manifest: Manifest = toml::from_str(document)?;
    validate_descriptor(&manifest.package)?;
    Ok(manifest.package)
}

/// Serialize a descriptor to a manifest document.
///
/// Validation runs first so an invalid descriptor cannot be persisted.
///
/// # Errors
///
/// Returns a [`ManifestError`] if the descriptor fails validation or cannot
/// be encoded.
pub fn serialize_manifest(descriptor: &PackageDescriptor) -> Result<String, ManifestError> {
    validate_descriptor(descriptor)?;
    let manifest = Manifest {
        package: descriptor.clone(),
    };
    Ok(toml::to_string_pretty(&manifest)?)
}

/// Read and parse the manifest file at `path`.
///
/// # Errors
///
/// Returns [`ManifestError::Read`] if the file cannot be read, otherwise the
/// same errors as [`parse_manifest`].
pub fn read_manifest_file(path: &Path) -> Result<PackageDescriptor, ManifestError> {
    let document = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_manifest(&document)
}
