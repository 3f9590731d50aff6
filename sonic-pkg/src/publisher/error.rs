//! Error types for the publisher module.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::descriptor::{IndexError, ManifestError};

/// Result type for publisher operations.
pub type PublishResult<T> = Result<T, PublishError>;

/// Errors that can occur during publishing operations.
#[derive(Debug)]
pub enum PublishError {
    /// Repository already exists at the specified path.
    RepositoryExists(PathBuf),

    /// No repository found at the specified path.
    RepositoryNotFound(PathBuf),

    /// Repository marker file is invalid or corrupted.
    InvalidRepository(String),

    /// Failed to create directory.
    CreateDirectoryFailed { path: PathBuf, source: io::Error },

    /// Failed to read file.
    ReadFailed { path: PathBuf, source: io::Error },

    /// Failed to write file.
    WriteFailed { path: PathBuf, source: io::Error },

    /// Package not found in the repository.
    PackageNotFound(String),

    /// The manifest declares a different name than its source directory.
    NameMismatch { directory: String, manifest: String },

    /// The package manifest is missing or invalid.
    Manifest(ManifestError),

    /// The index file is invalid or could not be encoded.
    Index(IndexError),

    /// The exact name and version is already published.
    DuplicateRelease { name: String, version: String },

    /// A declared script is missing from the package source.
    MissingScript { script: String, path: PathBuf },

    /// A declared script resolves to something other than a regular file.
    ScriptNotFile { script: String, path: PathBuf },

    /// The package declares no entry points, so there is nothing to install.
    NoScripts(String),

    /// Archive building failed.
    ArchiveFailed { path: PathBuf, source: io::Error },
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishError::RepositoryExists(path) => {
                write!(f, "repository already exists at {}", path.display())
            }
            PublishError::RepositoryNotFound(path) => {
                write!(f, "no repository found at {}", path.display())
            }
            PublishError::InvalidRepository(msg) => {
                write!(f, "invalid repository: {}", msg)
            }
            PublishError::CreateDirectoryFailed { path, source } => {
                write!(
                    f,
                    "failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            PublishError::ReadFailed { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            PublishError::WriteFailed { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
            PublishError::PackageNotFound(name) => {
                write!(f, "package not found: {}", name)
            }
            PublishError::NameMismatch { directory, manifest } => {
                write!(
                    f,
                    "manifest declares name '{}' but lives in directory '{}'",
                    manifest, directory
                )
            }
            PublishError::Manifest(err) => {
                write!(f, "{}", err)
            }
            PublishError::Index(err) => {
                write!(f, "{}", err)
            }
            PublishError::DuplicateRelease { name, version } => {
                write!(
                    f,
                    "release {} {} is already published; published releases are immutable, bump the version instead",
                    name, version
                )
            }
            PublishError::MissingScript { script, path } => {
                write!(
                    f,
                    "declared script '{}' not found at {}",
                    script,
                    path.display()
                )
            }
            PublishError::ScriptNotFile { script, path } => {
                write!(
                    f,
                    "declared script '{}' is not a regular file: {}",
                    script,
                    path.display()
                )
            }
            PublishError::NoScripts(name) => {
                write!(f, "package '{}' declares no entry-point scripts", name)
            }
            PublishError::ArchiveFailed { path, source } => {
                write!(f, "failed to build archive {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for PublishError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PublishError::CreateDirectoryFailed { source, .. } => Some(source),
            PublishError::ReadFailed { source, .. } => Some(source),
            PublishError::WriteFailed { source, .. } => Some(source),
            PublishError::ArchiveFailed { source, .. } => Some(source),
            PublishError::Manifest(err) => Some(err),
            PublishError::Index(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ManifestError> for PublishError {
    fn from(err: ManifestError) -> Self {
        PublishError::Manifest(err)
    }
}

impl From<IndexError> for PublishError {
    fn from(err: IndexError) -> Self {
        PublishError::Index(err)
    }
}
