//! Package descriptor types and manifest parsing.
//!
//! This module provides the core data structures for the sonic-pkg package
//! ecosystem, including the package descriptor, the controlled classifier
//! vocabulary, version handling and the repository index model.
//!
//! # Overview
//!
//! SONiC platform daemon packages are distributed as compressed archives
//! containing a manifest and the declared entry-point scripts. The
//! descriptor system consists of:
//!
//! - **PackageDescriptor**: Complete declared identity of a package
//!   (name, version, metadata, entry points)
//! - **PackageVersion**: Dotted release versions with canonical spelling
//! - **Classifier**: Entries from the built-in classifier vocabulary
//! - **PackageIndex**: Catalog of all published releases of a repository
//!
//! # File Formats
//!
//! Two TOML-based file formats are used:
//!
//! - `package.toml` - Package manifest (per package, also embedded in
//!   built artifacts)
//! - `index.toml` - Package index (per repository)
//!
//! Both are strict: unknown keys, malformed versions and classifiers
//! outside the vocabulary are rejected at parse time.

mod classifiers;
mod core;
mod index;
mod manifest;
mod naming;
mod version;

// Core types
pub use self::core::PackageDescriptor;
pub use classifiers::{Classifier, ClassifierError};
pub use version::{PackageVersion, VersionError};

// Manifest and index
pub use index::{parse_index, serialize_index, IndexEntry, IndexError, PackageIndex};
pub use manifest::{
    parse_manifest, read_manifest_file, serialize_manifest, validate_descriptor, ManifestError,
    MANIFEST_FILENAME,
};

// Naming utilities
pub use naming::{
    artifact_filename, is_valid_package_name, is_valid_script_path, script_install_name,
};
